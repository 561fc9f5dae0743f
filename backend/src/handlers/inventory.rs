//! HTTP handlers for inventory records

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Inventory;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{CreateInventory, InventoryService, UpdateInventory};
use crate::AppState;

fn service(state: AppState) -> InventoryService {
    InventoryService::new(state.repos, state.locks, state.config.inventory.clone())
}

/// List all inventory records
pub async fn list_inventory(State(state): State<AppState>) -> AppResult<Json<Vec<Inventory>>> {
    let records = service(state).find_all().await?;
    Ok(Json(records))
}

/// Records at or below safe stock
pub async fn list_low_stock(State(state): State<AppState>) -> AppResult<Json<Vec<Inventory>>> {
    let records = service(state).below_safe_stock().await?;
    Ok(Json(records))
}

pub async fn create_inventory(
    State(state): State<AppState>,
    Json(input): Json<CreateInventory>,
) -> AppResult<Json<Inventory>> {
    let inventory = service(state).create_from_input(input).await?;
    Ok(Json(inventory))
}

/// Get the inventory record for an item code
pub async fn get_inventory_by_item_code(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> AppResult<Json<Inventory>> {
    let inventory = service(state)
        .find_by_item_code(&item_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory".to_string()))?;
    Ok(Json(inventory))
}

pub async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Inventory>> {
    let inventory = service(state).find_one(id).await?;
    Ok(Json(inventory))
}

pub async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateInventory>,
) -> AppResult<Json<Inventory>> {
    let inventory = service(state).update(id, input).await?;
    Ok(Json(inventory))
}

pub async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    service(state).remove(id).await?;
    Ok(Json(()))
}
