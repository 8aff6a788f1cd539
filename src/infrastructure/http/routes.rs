//! HTTP Routes
//!
//! Endpoints:
//! - /            GET  首页（合成表单）
//! - /details     GET  模型与运行参数详情
//! - /api/tts     GET  文本合成，返回 audio/wav
//! - /api/ping    GET  健康检查

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::index))
        .route("/details", get(handlers::details))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/tts", get(handlers::tts))
}
