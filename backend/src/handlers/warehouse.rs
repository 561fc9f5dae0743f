//! HTTP handlers for warehouses

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Warehouse;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::{CreateWarehouse, UpdateWarehouse, WarehouseService};
use crate::AppState;

pub async fn list_warehouses(State(state): State<AppState>) -> AppResult<Json<Vec<Warehouse>>> {
    let service = WarehouseService::new(state.repos);
    let warehouses = service.find_all().await?;
    Ok(Json(warehouses))
}

pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(input): Json<CreateWarehouse>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.repos);
    let warehouse = service.create(input).await?;
    Ok(Json(warehouse))
}

pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.repos);
    let warehouse = service.find_one(id).await?;
    Ok(Json(warehouse))
}

pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateWarehouse>,
) -> AppResult<Json<Warehouse>> {
    let service = WarehouseService::new(state.repos);
    let warehouse = service.update(id, input).await?;
    Ok(Json(warehouse))
}

pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = WarehouseService::new(state.repos);
    service.remove(id).await?;
    Ok(Json(()))
}
