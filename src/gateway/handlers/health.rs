//! 根路径问候和健康检查处理器

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;

use crate::config::ModelConfig;
use crate::gateway::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    generator: String,
    models: ModelConfig,
}

/// GET /
pub async fn handle_index() -> &'static str {
    "Hello from the Gemini relay!"
}

/// GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        generator: state.generator().name().to_string(),
        models: state.models().clone(),
    }))
}
