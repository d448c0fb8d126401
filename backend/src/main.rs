use passreset_backend::{app, config::Config, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "passreset_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        identity_service_url = config.identity_service_url.as_deref().unwrap_or("<unset>"),
        identity_service_key = %config
            .identity_service_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "<unset>".into()),
        allowed_origins = ?config.allowed_origins,
        bind_addr = %config.bind_addr,
        "Loaded configuration from environment/.env"
    );
    if !config.identity_configured() {
        tracing::warn!("Identity service URL or key missing; reset requests will be refused");
    }
    if config.allowed_origins.is_empty() {
        tracing::warn!("No allowed origin configured; origin check is disabled");
    }

    let addr = config.bind_addr;
    let state = AppState::from_config(config)?;
    let app = app(state);

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
