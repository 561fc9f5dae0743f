//! HTTP handlers for outbound transactions

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Outbound;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::{CreateOutbound, OutboundService, UpdateOutbound};
use crate::AppState;

pub async fn list_outbound(State(state): State<AppState>) -> AppResult<Json<Vec<Outbound>>> {
    let service = OutboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let records = service.find_all().await?;
    Ok(Json(records))
}

/// Record an outbound transaction; rejected when stock is short
pub async fn create_outbound(
    State(state): State<AppState>,
    Json(input): Json<CreateOutbound>,
) -> AppResult<Json<Outbound>> {
    let service = OutboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let outbound = service.create(input).await?;
    Ok(Json(outbound))
}

pub async fn get_outbound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Outbound>> {
    let service = OutboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let outbound = service.find_one(id).await?;
    Ok(Json(outbound))
}

pub async fn update_outbound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateOutbound>,
) -> AppResult<Json<Outbound>> {
    let service = OutboundService::new(state.repos, state.locks, state.config.inventory.clone());
    let outbound = service.update(id, input).await?;
    Ok(Json(outbound))
}

pub async fn delete_outbound(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = OutboundService::new(state.repos, state.locks, state.config.inventory.clone());
    service.remove(id).await?;
    Ok(Json(()))
}
