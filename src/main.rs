use myra_api::{
    api::{create_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let address = config.bind_address();

    if config.ai_enable {
        tracing::warn!("AI_ENABLE is set but no outfit generator is configured, using deterministic engine");
    }

    // Initialize application state
    let state = AppState::with_config(config);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
