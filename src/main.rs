use slack_interactions::{config::Settings, router, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing()?;

    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded .env file"),
        Err(_) => warn!(".env file not found, ignoring..."),
    }

    let settings = Settings::from_env()?;

    info!(
        addr = %settings.addr(),
        version = env!("CARGO_PKG_VERSION"),
        "running axum server"
    );
    let listener = tokio::net::TcpListener::bind(settings.addr()).await?;
    axum::serve(listener, router::get_router()).await?;

    Ok(())
}
