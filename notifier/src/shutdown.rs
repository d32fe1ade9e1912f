use std::time::Duration;

use tokio::time::sleep;

use crate::app::SharedState;

pub async fn graceful_shutdown(state: &SharedState) {
    tracing::info!("Shutdown sequence started");

    state.controller().stop().await;
    tracing::info!("Shutdown: poll timer stopped");

    state.shutdown_token().cancel();
    tracing::info!("Shutdown: command loop, wake-up and server cancelled");

    sleep(Duration::from_millis(200)).await;
    tracing::info!("Shutdown sequence completed");
}
