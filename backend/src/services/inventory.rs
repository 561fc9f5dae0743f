//! Inventory store: one stock record per item code

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use shared::{validate_natural_key, Inventory};
use uuid::Uuid;

use super::StockLocks;
use crate::config::InventoryConfig;
use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

/// Service owning the stock records
#[derive(Clone)]
pub struct InventoryService {
    repos: Repositories,
    locks: StockLocks,
    config: InventoryConfig,
}

/// Input for creating an inventory record directly
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventory {
    pub item_code: String,
    pub item_name: String,
    pub unit: Option<String>,
}

/// Fields of an inventory record that may be edited directly.
///
/// `current_stock` is accepted as-is; no floor is applied.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventory {
    pub item_name: Option<String>,
    pub current_stock: Option<i32>,
    pub safe_stock: Option<i32>,
    pub unit: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub last_inbound_date: Option<NaiveDate>,
    pub last_outbound_date: Option<NaiveDate>,
}

impl UpdateInventory {
    pub fn apply_to(self, inventory: &mut Inventory) {
        if let Some(item_name) = self.item_name {
            inventory.item_name = item_name;
        }
        if let Some(current_stock) = self.current_stock {
            inventory.current_stock = current_stock;
        }
        if let Some(safe_stock) = self.safe_stock {
            inventory.safe_stock = safe_stock;
        }
        if let Some(unit) = self.unit {
            inventory.unit = unit;
        }
        if let Some(location) = self.location {
            inventory.location = location;
        }
        if let Some(status) = self.status {
            inventory.status = status;
        }
        if let Some(date) = self.last_inbound_date {
            inventory.last_inbound_date = Some(date);
        }
        if let Some(date) = self.last_outbound_date {
            inventory.last_outbound_date = Some(date);
        }
    }
}

impl InventoryService {
    pub fn new(repos: Repositories, locks: StockLocks, config: InventoryConfig) -> Self {
        Self { repos, locks, config }
    }

    /// Create a zero-stock record for `item_code`.
    ///
    /// Callers that already hold the stock lock for the code use this
    /// directly; fails with `DuplicateEntry` if a record exists.
    pub async fn create(&self, item_code: &str, item_name: &str, unit: &str) -> AppResult<Inventory> {
        validate_natural_key(item_code).map_err(|message| AppError::Validation {
            field: "itemCode".to_string(),
            message: message.to_string(),
        })?;

        let inventory = Inventory {
            id: Uuid::new_v4(),
            item_code: item_code.to_string(),
            item_name: item_name.to_string(),
            current_stock: 0,
            safe_stock: self.config.default_safe_stock,
            unit: unit.to_string(),
            location: self.config.default_location.clone(),
            status: self.config.default_status.clone(),
            registered_date: Utc::now().date_naive(),
            last_inbound_date: None,
            last_outbound_date: None,
        };

        let inventory = self.repos.inventories.create(inventory).await?;
        tracing::info!(item_code = %inventory.item_code, "Inventory record created");
        Ok(inventory)
    }

    /// Create from request input, taking the stock lock for the code
    pub async fn create_from_input(&self, input: CreateInventory) -> AppResult<Inventory> {
        let _guard = self.locks.acquire(&input.item_code).await;
        let unit = input.unit.unwrap_or_else(|| self.config.default_unit.clone());
        self.create(&input.item_code, &input.item_name, &unit).await
    }

    pub async fn find_by_item_code(&self, item_code: &str) -> AppResult<Option<Inventory>> {
        tracing::debug!(item_code, "Looking up inventory");
        self.repos.inventories.find_by_key(item_code).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Inventory> {
        self.repos
            .inventories
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inventory".to_string()))
    }

    pub async fn find_all(&self) -> AppResult<Vec<Inventory>> {
        self.repos.inventories.find_all(&RecordFilter::all()).await
    }

    /// Records at or below their safe stock level
    pub async fn below_safe_stock(&self) -> AppResult<Vec<Inventory>> {
        let records = self.find_all().await?;
        Ok(records
            .into_iter()
            .filter(Inventory::is_below_safe_stock)
            .collect())
    }

    pub async fn update(&self, id: Uuid, input: UpdateInventory) -> AppResult<Inventory> {
        let item_code = self.find_one(id).await?.item_code;
        let _guard = self.locks.acquire(&item_code).await;

        let mut inventory = self.find_one(id).await?;
        input.apply_to(&mut inventory);

        let inventory = self.repos.inventories.save(inventory).await?;
        tracing::info!(item_code = %inventory.item_code, stock = inventory.current_stock, "Inventory updated");
        Ok(inventory)
    }

    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let item_code = self.find_one(id).await?.item_code;
        let _guard = self.locks.acquire(&item_code).await;

        self.repos.inventories.delete(id).await?;
        tracing::info!(%item_code, "Inventory record removed");
        Ok(())
    }

    /// Persist a stock record; the caller holds the lock for its code
    pub(crate) async fn save(&self, inventory: Inventory) -> AppResult<Inventory> {
        self.repos.inventories.save(inventory).await
    }
}
