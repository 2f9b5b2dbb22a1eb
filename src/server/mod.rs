//! HTTP surface and process lifecycle: tool listing, tool invocation,
//! start-up announcement, graceful shutdown.

use crate::config::ServerConfig;
use crate::store::students::StudentStore;
use crate::tools::{self, ToolContext, ToolError};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;

pub fn router(ctx: ToolContext) -> Router {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(invoke_tool))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn list_tools() -> Json<Vec<&'static str>> {
    Json(tools::TOOL_NAMES.to_vec())
}

async fn invoke_tool(
    State(ctx): State<ToolContext>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> Result<Json<Value>, ToolError> {
    let payload = tools::dispatch(&ctx, &name, args).await?;
    Ok(Json(payload))
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let data_file = config.resolved_data_file()?;
    let store = StudentStore::new(&data_file);
    let ctx = ToolContext::new(store, config.strict_validation);

    tracing::info!(store = %data_file.display(), "student store ready");
    tracing::info!(tools = ?tools::TOOL_NAMES, "registered tools");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
