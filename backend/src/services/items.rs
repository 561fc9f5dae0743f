//! Item catalog with generated item codes and companion inventory records

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{next_sequential_code, validate_natural_key, Item, ITEM_CODE_PREFIX};
use uuid::Uuid;
use validator::Validate;

use super::{InventoryService, StockLocks};
use crate::config::InventoryConfig;
use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

/// Item catalog service
#[derive(Clone)]
pub struct ItemService {
    repos: Repositories,
    locks: StockLocks,
    inventory: InventoryService,
}

/// Input for registering an item. `item_code` is generated when omitted.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub item_code: Option<String>,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub item_name: String,
    pub unit_price: Decimal,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    pub category: String,
    pub description: Option<String>,
}

/// Editable item fields; the item code is fixed once assigned
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    pub item_name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl UpdateItem {
    /// True when the change must be mirrored on the inventory record
    fn touches_inventory(&self) -> bool {
        self.item_name.is_some() || self.unit.is_some()
    }

    pub fn apply_to(self, item: &mut Item) {
        if let Some(item_name) = self.item_name {
            item.item_name = item_name;
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
    }
}

impl ItemService {
    pub fn new(repos: Repositories, locks: StockLocks, config: InventoryConfig) -> Self {
        let inventory = InventoryService::new(repos.clone(), locks.clone(), config);
        Self {
            repos,
            locks,
            inventory,
        }
    }

    async fn resolve_code(&self, requested: Option<String>) -> AppResult<String> {
        match requested {
            Some(code) => {
                validate_natural_key(&code).map_err(|message| AppError::Validation {
                    field: "itemCode".to_string(),
                    message: message.to_string(),
                })?;
                if self.repos.items.find_by_key(&code).await?.is_some() {
                    return Err(AppError::DuplicateEntry("itemCode".to_string()));
                }
                Ok(code)
            }
            None => {
                let items = self.find_all().await?;
                Ok(next_sequential_code(
                    ITEM_CODE_PREFIX,
                    items.iter().map(|item| item.item_code.as_str()),
                ))
            }
        }
    }

    /// Register an item along with a zero-stock inventory record.
    ///
    /// If inbound stock already created an inventory record for the code,
    /// that record is kept and takes the item's name and unit.
    pub async fn create(&self, input: CreateItem) -> AppResult<Item> {
        input.validate()?;

        let item_code = self.resolve_code(input.item_code).await?;
        let _guard = self.locks.acquire(&item_code).await;

        let item = Item {
            id: Uuid::new_v4(),
            item_code,
            item_name: input.item_name,
            unit_price: input.unit_price,
            unit: input.unit,
            category: input.category,
            description: input.description,
            registered_date: Utc::now().date_naive(),
        };
        let item = self.repos.items.create(item).await?;

        match self.inventory.find_by_item_code(&item.item_code).await? {
            Some(mut inventory) => {
                inventory.item_name = item.item_name.clone();
                inventory.unit = item.unit.clone();
                self.inventory.save(inventory).await?;
            }
            None => {
                self.inventory
                    .create(&item.item_code, &item.item_name, &item.unit)
                    .await?;
            }
        }

        tracing::info!(item_code = %item.item_code, "Item registered");
        Ok(item)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Item>> {
        self.repos.items.find_all(&RecordFilter::all()).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Item> {
        self.repos
            .items
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    pub async fn find_by_item_code(&self, item_code: &str) -> AppResult<Item> {
        self.repos
            .items
            .find_by_key(item_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    /// Update an item; name and unit changes carry over to its inventory
    pub async fn update(&self, id: Uuid, input: UpdateItem) -> AppResult<Item> {
        let item_code = self.find_one(id).await?.item_code;
        let _guard = self.locks.acquire(&item_code).await;

        let mut item = self.find_one(id).await?;
        let sync_inventory = input.touches_inventory();
        input.apply_to(&mut item);
        let item = self.repos.items.save(item).await?;

        if sync_inventory {
            if let Some(mut inventory) = self.inventory.find_by_item_code(&item.item_code).await? {
                inventory.item_name = item.item_name.clone();
                inventory.unit = item.unit.clone();
                self.inventory.save(inventory).await?;
            }
        }

        tracing::info!(item_code = %item.item_code, "Item updated");
        Ok(item)
    }

    /// Delete an item and its inventory record
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let item_code = self.find_one(id).await?.item_code;
        let _guard = self.locks.acquire(&item_code).await;

        self.repos.items.delete(id).await?;
        if let Some(inventory) = self.inventory.find_by_item_code(&item_code).await? {
            self.repos.inventories.delete(inventory.id).await?;
        }

        tracing::info!(%item_code, "Item removed");
        Ok(())
    }
}
