//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// 请求日志中间件
///
/// 每个请求记录一行：方法、路径、状态码、耗时与 User-Agent。
/// 4xx/5xx 以 warn 级别输出。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        warn!(%request_id, %method, %uri, status = status.as_u16(), duration_ms, ?user_agent, "请求失败");
    } else {
        info!(%request_id, %method, %uri, status = status.as_u16(), duration_ms, ?user_agent, "请求完成");
    }

    response
}
