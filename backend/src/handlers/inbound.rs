//! HTTP handlers for inbound transactions

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Inbound;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::{CreateInbound, InboundService, UpdateInbound};
use crate::AppState;

pub async fn list_inbound(State(state): State<AppState>) -> AppResult<Json<Vec<Inbound>>> {
    let service = InboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let records = service.find_all().await?;
    Ok(Json(records))
}

/// Record an inbound transaction
pub async fn create_inbound(
    State(state): State<AppState>,
    Json(input): Json<CreateInbound>,
) -> AppResult<Json<Inbound>> {
    let service = InboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let inbound = service.create(input).await?;
    Ok(Json(inbound))
}

pub async fn get_inbound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Inbound>> {
    let service = InboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let inbound = service.find_one(id).await?;
    Ok(Json(inbound))
}

pub async fn update_inbound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateInbound>,
) -> AppResult<Json<Inbound>> {
    let service = InboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let inbound = service.update(id, input).await?;
    Ok(Json(inbound))
}

pub async fn delete_inbound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = InboundService::new(state.repos, state.locks, state.config.inventory.clone());
    service.remove(id).await?;
    Ok(Json(()))
}
