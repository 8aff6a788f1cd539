//! HTTP Middleware
//!
//! 记录 4xx / 5xx 响应，附带耗时

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 状态码错误日志中间件
///
/// 错误详情在 `ApiError::into_response()` 中记录，这里只记录请求维度的信息
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}
