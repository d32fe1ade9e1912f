//! Headless payment notifier.
//!
//! Starts the axum web server, the command loop, background monitoring and
//! signal handling.

use tracing_subscriber::EnvFilter;

use payment_notifier_lib::app::SharedState;
use payment_notifier_lib::{commands, server, shutdown};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting payment notifier");

    let config = payment_notifier_lib::init_foundation()?;
    let (state, command_rx) = SharedState::new(config)?;

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tokio::spawn(commands::command_loop(
        state.controller().clone(),
        state.tray().clone(),
        command_rx,
        state.shutdown_token().clone(),
    ));

    if state.config().auto_start {
        let controller = state.controller().clone();
        tokio::spawn(async move {
            controller.activate().await;
        });
    } else {
        tracing::info!("AUTO_START disabled; waiting for START_BACKGROUND");
    }

    tracing::info!(
        port = state.server_port(),
        "Payment notifier running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    shutdown::graceful_shutdown(&state).await;
    if let Err(e) = server_handle.await {
        tracing::warn!("Server task ended abnormally: {e}");
    }
    Ok(())
}
