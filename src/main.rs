use std::sync::Arc;

use anyhow::Context;
use taskpilot_server::{
    app_state::AppState, data_access::data_context::DataContext, map_routes, settings::Settings,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let data_context = DataContext::new(&settings.database_path)
        .with_context(|| format!("failed to open database {}", settings.database_path))?;
    let address = settings.bind_address();
    let state = Arc::new(AppState::new(data_context, settings));

    let app = map_routes(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "taskpilot server listening");
    info!("realtime events: ws://{address}/v1/realtime?token=...");

    axum::serve(listener, app).await.context("server stopped unexpectedly")?;
    Ok(())
}
