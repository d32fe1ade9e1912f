pub mod app;
pub mod background;
pub mod commands;
pub mod config;
pub mod events;
pub mod notification;
pub mod payment;
pub mod server;
pub mod shutdown;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load environment and settings.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    for def in config::missing_required(|key| std::env::var(key).ok()) {
        tracing::warn!(
            "Missing setting {} ({}), using default {:?}",
            def.key,
            def.description,
            def.default
        );
    }

    let config = AppConfig::load()?;
    tracing::info!(
        base_url = %config.api_base_url,
        poll_interval_secs = config.poll_interval.as_secs(),
        port = config.server_port,
        "Settings loaded"
    );
    Ok(config)
}
