//! Inbound host commands and the loop that applies them.
//!
//! Commands arrive as `{"type": "START_BACKGROUND"}`-style JSON messages over
//! WebSocket or HTTP. They are fire-and-forget: nothing is sent back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::background::PollingController;
use crate::notification::TraySink;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    StartBackground,
    StopBackground,
    CheckNow,
    /// The user opened the alert with this collapse tag.
    NotificationClick { tag: String },
}

impl Command {
    /// Parse a host message. Returns `None` for anything that is not a command.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

/// Apply one command.
///
/// `CHECK_NOW` runs on its own task so a slow cycle never holds up the
/// command queue.
pub async fn dispatch(controller: &PollingController, tray: &TraySink, command: Command) {
    tracing::debug!(?command, "Dispatching command");
    match command {
        Command::StartBackground => {
            controller.start().await;
        }
        Command::StopBackground => {
            controller.stop().await;
        }
        Command::CheckNow => {
            let controller = controller.clone();
            tokio::spawn(async move {
                controller.run_once().await;
            });
        }
        Command::NotificationClick { tag } => {
            if tray.open(&tag).is_none() {
                tracing::debug!(tag = %tag, "Clicked notification is no longer in the tray");
            }
        }
    }
}

/// Drain the command queue until shutdown or until every sender is gone.
pub async fn command_loop(
    controller: PollingController,
    tray: Arc<TraySink>,
    mut rx: mpsc::Receiver<Command>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            command = rx.recv() => match command {
                Some(command) => dispatch(&controller, &tray, command).await,
                None => break,
            },
        }
    }
    tracing::info!("Command loop stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::broadcast;

    use super::*;
    use crate::background::{
        AckError, Acknowledger, AnnouncementSource, FetchError, NoPeriodicWake, PollSchedule,
    };
    use crate::notification::{AlertStyle, Locale, Notifier};
    use crate::payment::PaymentEvent;

    #[derive(Default)]
    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl AnnouncementSource for CountingSource {
        async fn fetch_pending(&self) -> Result<Vec<PaymentEvent>, FetchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct NoopAcker;

    #[async_trait]
    impl Acknowledger for NoopAcker {
        async fn acknowledge(&self, _event_id: &str) -> Result<(), AckError> {
            Ok(())
        }
    }

    fn setup() -> (PollingController, Arc<TraySink>, Arc<CountingSource>) {
        let (tx, _) = broadcast::channel(16);
        let tray = Arc::new(TraySink::new(tx));
        let source = Arc::new(CountingSource::default());
        let notifier = Arc::new(Notifier::new(Locale::Hindi, AlertStyle::default(), tray.clone()));
        let controller = PollingController::new(
            source.clone(),
            Arc::new(NoopAcker),
            notifier,
            Arc::new(NoPeriodicWake),
            PollSchedule::default(),
        );
        (controller, tray, source)
    }

    #[test]
    fn parse_host_messages() {
        assert_eq!(
            Command::parse(r#"{"type":"START_BACKGROUND"}"#),
            Some(Command::StartBackground)
        );
        assert_eq!(
            Command::parse(r#"{"type":"STOP_BACKGROUND"}"#),
            Some(Command::StopBackground)
        );
        assert_eq!(Command::parse(r#"{"type":"CHECK_NOW"}"#), Some(Command::CheckNow));
        assert_eq!(
            Command::parse(r#"{"type":"NOTIFICATION_CLICK","tag":"payment-a1"}"#),
            Some(Command::NotificationClick {
                tag: "payment-a1".into()
            })
        );
    }

    #[test]
    fn parse_rejects_other_messages() {
        assert_eq!(Command::parse(r#"{"type":"ping"}"#), None);
        assert_eq!(Command::parse(r#"{"type":"NOTIFICATION_CLICK"}"#), None);
        assert_eq!(Command::parse("CHECK_NOW"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop_commands_drive_controller() {
        let (controller, tray, _) = setup();

        dispatch(&controller, &tray, Command::StartBackground).await;
        assert!(controller.is_running().await);

        dispatch(&controller, &tray, Command::StopBackground).await;
        assert!(!controller.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn check_now_runs_a_cycle_without_starting() {
        let (controller, tray, source) = setup();

        dispatch(&controller, &tray, Command::CheckNow).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(source.0.load(Ordering::SeqCst), 1);
        assert!(!controller.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn command_loop_applies_queued_commands() {
        let (controller, tray, source) = setup();
        let (tx, rx) = mpsc::channel(8);
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(command_loop(controller.clone(), tray, rx, shutdown.clone()));

        tx.send(Command::StartBackground).await.unwrap();
        tx.send(Command::CheckNow).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(controller.is_running().await);
        assert_eq!(source.0.load(Ordering::SeqCst), 1);

        shutdown.cancel();
        handle.await.unwrap();
    }
}
