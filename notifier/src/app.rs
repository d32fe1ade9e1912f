use std::sync::Arc;

use payment_api::PaymentApiClient;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::background::{
    CommandWake, NoPeriodicWake, PaymentService, PeriodicWake, PollSchedule, PollingController,
};
use crate::commands::Command;
use crate::config::AppConfig;
use crate::notification::{AlertStyle, Notifier, TraySink};
use crate::payment::Classifier;

const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Application shared state accessible from the command loop and axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    /// Inbound host commands
    command_tx: mpsc::Sender<Command>,
    config: AppConfig,
    controller: PollingController,
    tray: Arc<TraySink>,
    shutdown_token: CancellationToken,
}

impl SharedState {
    /// Wire the notifier components from config.
    ///
    /// Returns the receiving half of the command queue for the command loop.
    pub fn new(config: AppConfig) -> Result<(Self, mpsc::Receiver<Command>), anyhow::Error> {
        let (ws_tx, _) = broadcast::channel(256);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let shutdown_token = CancellationToken::new();

        let client = PaymentApiClient::with_timeout(&config.api_base_url, config.http_timeout)?;
        let service = Arc::new(PaymentService::new(
            client,
            Classifier::new(&config.credit_keywords),
        ));

        let tray = Arc::new(TraySink::new(ws_tx.clone()));
        let style = AlertStyle {
            icon: config.icon.clone(),
            badge: config.badge.clone(),
            landing_url: config.landing_url.clone(),
        };
        let notifier = Arc::new(Notifier::new(config.locale, style, tray.clone()));

        let wake: Arc<dyn PeriodicWake> = if config.periodic_wake_enabled {
            Arc::new(CommandWake::new(command_tx.clone(), shutdown_token.clone()))
        } else {
            Arc::new(NoPeriodicWake)
        };

        let controller = PollingController::new(
            service.clone(),
            service,
            notifier,
            wake,
            PollSchedule {
                poll_interval: config.poll_interval,
                wake_interval: config.periodic_wake_interval,
            },
        );

        let state = Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                command_tx,
                config,
                controller,
                tray,
                shutdown_token,
            }),
        };
        Ok((state, command_rx))
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    pub fn controller(&self) -> &PollingController {
        &self.inner.controller
    }

    pub fn tray(&self) -> &Arc<TraySink> {
        &self.inner.tray
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }

    /// Queue a host command without waiting for it to be applied.
    pub fn send_command(&self, command: Command) -> Result<(), String> {
        self.inner
            .command_tx
            .try_send(command)
            .map_err(|e| format!("Command queue full or closed: {e}"))
    }
}
