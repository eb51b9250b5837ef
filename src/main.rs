use lease_auditor::{
    api::{build_router, AppState},
    config::{Config, LoggingConfig},
    negotiation::HttpChatClient,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var("LEASE_AUDITOR_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load(Some(&config_path))?;

    init_tracing(&config.logging);

    if config.chat.api_key.is_none() {
        tracing::warn!(
            "No chat API key configured; negotiation chat requests will likely be rejected upstream"
        );
    }

    let chat_client = HttpChatClient::new(config.chat.clone())?;
    let state = AppState {
        chat_client: Arc::new(chat_client),
    };

    let router = build_router(state, config.server.body_limit_bytes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Lease auditor listening on {}", addr);
    info!("Chat collaborator: {}", config.chat.completions_url());

    axum::serve(listener, router).await?;

    Ok(())
}
