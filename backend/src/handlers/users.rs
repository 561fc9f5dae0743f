//! HTTP handlers for the user directory

use axum::{
    extract::{Path, State},
    Json,
};
use shared::User;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::{CreateUser, UpdateUser, UserService};
use crate::AppState;

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserService::new(state.repos).find_all().await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<Json<User>> {
    let user = UserService::new(state.repos).create(input).await?;
    Ok(Json(user))
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<User>> {
    let user = UserService::new(state.repos).find_one(id).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = UserService::new(state.repos).update(id, input).await?;
    Ok(Json(user))
}

pub async fn delete_user(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<()>> {
    UserService::new(state.repos).remove(id).await?;
    Ok(Json(()))
}
