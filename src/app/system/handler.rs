//! 系统处理器：问候、服务信息与健康检查

use axum::{extract::State, response::Json};

use super::model::{HealthResponse, InfoResponse};
use crate::app::AppState;
use crate::core::response::iso_timestamp;

pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: state.info.name.clone(),
        version: state.info.version.clone(),
        environment: state.info.environment.clone(),
        timestamp: iso_timestamp(chrono::Utc::now()),
    })
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let environment = state
        .info
        .expose_env
        .then(|| state.info.masked_environment());

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: iso_timestamp(chrono::Utc::now()),
        environment,
    })
}
