//! Page Handlers - 首页与详情页

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::templates;

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(templates::render_index(&state.index_handler.handle()))
}

/// 每次请求重新读取配置文件
pub async fn details(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let view = state.details_handler.handle().await?;
    Ok(Html(templates::render_details(&view)))
}
