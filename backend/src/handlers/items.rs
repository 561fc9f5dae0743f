//! HTTP handlers for the item catalog

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Item;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::{CreateItem, ItemService, UpdateItem};
use crate::AppState;

/// List all items
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let service = ItemService::new(state.repos, state.locks, state.config.inventory.clone());
    let items = service.find_all().await?;
    Ok(Json(items))
}

/// Register an item and its inventory record
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.repos, state.locks, state.config.inventory.clone());
    let item = service.create(input).await?;
    Ok(Json(item))
}

pub async fn get_item(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.repos, state.locks, state.config.inventory.clone());
    let item = service.find_one(id).await?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let service = ItemService::new(state.repos, state.locks, state.config.inventory.clone());
    let item = service.update(id, input).await?;
    Ok(Json(item))
}

pub async fn delete_item(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<()>> {
    let service = ItemService::new(state.repos, state.locks, state.config.inventory.clone());
    service.remove(id).await?;
    Ok(Json(()))
}
