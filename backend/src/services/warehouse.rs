//! Warehouse registry

use serde::Deserialize;
use shared::{next_sequential_code, validate_natural_key, Warehouse, WAREHOUSE_CODE_PREFIX};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

/// Warehouse service
#[derive(Clone)]
pub struct WarehouseService {
    repos: Repositories,
}

/// Input for registering a warehouse. `warehouse_code` is generated when omitted.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouse {
    pub warehouse_code: Option<String>,
    #[validate(length(min = 1, message = "Warehouse name is required"))]
    pub warehouse_name: String,
    pub location: String,
    #[validate(range(min = 0, message = "Capacity cannot be negative"))]
    pub capacity: i32,
    pub current_stock: Option<i32>,
    pub manager: String,
    pub phone: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWarehouse {
    pub warehouse_name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub current_stock: Option<i32>,
    pub manager: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

impl UpdateWarehouse {
    pub fn apply_to(self, warehouse: &mut Warehouse) {
        if let Some(warehouse_name) = self.warehouse_name {
            warehouse.warehouse_name = warehouse_name;
        }
        if let Some(location) = self.location {
            warehouse.location = location;
        }
        if let Some(capacity) = self.capacity {
            warehouse.capacity = capacity;
        }
        if let Some(current_stock) = self.current_stock {
            warehouse.current_stock = current_stock;
        }
        if let Some(manager) = self.manager {
            warehouse.manager = manager;
        }
        if let Some(phone) = self.phone {
            warehouse.phone = phone;
        }
        if let Some(description) = self.description {
            warehouse.description = description;
        }
    }
}

impl WarehouseService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, input: CreateWarehouse) -> AppResult<Warehouse> {
        input.validate()?;

        let warehouse_code = match input.warehouse_code {
            Some(code) => {
                validate_natural_key(&code).map_err(|message| AppError::Validation {
                    field: "warehouseCode".to_string(),
                    message: message.to_string(),
                })?;
                code
            }
            None => {
                let warehouses = self.find_all().await?;
                next_sequential_code(
                    WAREHOUSE_CODE_PREFIX,
                    warehouses.iter().map(|w| w.warehouse_code.as_str()),
                )
            }
        };

        let warehouse = Warehouse {
            id: Uuid::new_v4(),
            warehouse_code,
            warehouse_name: input.warehouse_name,
            location: input.location,
            capacity: input.capacity,
            current_stock: input.current_stock.unwrap_or(0),
            manager: input.manager,
            phone: input.phone,
            description: input.description.unwrap_or_default(),
        };

        let warehouse = self.repos.warehouses.create(warehouse).await?;
        tracing::info!(warehouse_code = %warehouse.warehouse_code, "Warehouse registered");
        Ok(warehouse)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Warehouse>> {
        self.repos.warehouses.find_all(&RecordFilter::all()).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Warehouse> {
        self.repos
            .warehouses
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))
    }

    pub async fn find_by_warehouse_code(&self, warehouse_code: &str) -> AppResult<Warehouse> {
        self.repos
            .warehouses
            .find_by_key(warehouse_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Warehouse".to_string()))
    }

    pub async fn update(&self, id: Uuid, input: UpdateWarehouse) -> AppResult<Warehouse> {
        let mut warehouse = self.find_one(id).await?;
        input.apply_to(&mut warehouse);
        self.repos.warehouses.save(warehouse).await
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        self.repos.warehouses.delete(id).await?;
        tracing::info!(%id, "Warehouse removed");
        Ok(())
    }
}
