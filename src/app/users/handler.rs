//! 用户处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{CreateUser, UpdateUser, User, UserId};
use crate::app::AppState;
use crate::core::{error::CoreError, response::MessageResponse};

/// 路径中的 id 无法解析为非负整数时按不存在处理
fn parse_id(raw: &str) -> Result<UserId, CoreError> {
    raw.trim()
        .parse::<UserId>()
        .map_err(|_| CoreError::user_not_found())
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.user_service.list())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, CoreError> {
    let user = state.user_service.get(parse_id(&id)?)?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let user = state.user_service.create(payload);
    (StatusCode::CREATED, Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<User>, CoreError> {
    let user = state.user_service.update(parse_id(&id)?, payload)?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CoreError> {
    state.user_service.delete(parse_id(&id)?)?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
