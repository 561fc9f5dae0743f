//! Inbound (receiving) transactions and their effect on stock

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{line_amount, validate_natural_key, Inbound, Inventory};
use uuid::Uuid;

use super::{InventoryService, StockGuard, StockLocks};
use crate::config::InventoryConfig;
use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

/// Records incoming stock and keeps inventory in step
#[derive(Clone)]
pub struct InboundService {
    repos: Repositories,
    locks: StockLocks,
    inventory: InventoryService,
    default_unit: String,
}

/// Input for recording an inbound transaction
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInbound {
    /// Defaults to today
    pub inbound_date: Option<NaiveDate>,
    pub item_code: String,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub supplier: String,
    pub memo: Option<String>,
}

/// Editable fields of an inbound transaction
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInbound {
    pub inbound_date: Option<NaiveDate>,
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub supplier: Option<String>,
    pub memo: Option<String>,
}

impl UpdateInbound {
    pub fn apply_to(self, inbound: &mut Inbound) {
        if let Some(date) = self.inbound_date {
            inbound.inbound_date = date;
        }
        if let Some(item_code) = self.item_code {
            inbound.item_code = item_code;
        }
        if let Some(item_name) = self.item_name {
            inbound.item_name = item_name;
        }
        if let Some(quantity) = self.quantity {
            inbound.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            inbound.unit_price = unit_price;
        }
        if let Some(supplier) = self.supplier {
            inbound.supplier = supplier;
        }
        if let Some(memo) = self.memo {
            inbound.memo = memo;
        }
    }
}

/// `stock + delta`, rejecting results outside `i32`
pub(crate) fn shift_stock(inventory: &Inventory, delta: i32) -> AppResult<i32> {
    inventory.current_stock.checked_add(delta).ok_or_else(|| {
        AppError::ValidationError(format!(
            "Stock for {} would overflow: current stock {}, change {}",
            inventory.item_code, inventory.current_stock, delta
        ))
    })
}

/// `new - old` for a quantity edit
pub(crate) fn quantity_delta(new: i32, old: i32) -> AppResult<i32> {
    new.checked_sub(old)
        .ok_or_else(|| AppError::ValidationError(format!("Quantity change from {} to {} is out of range", old, new)))
}

/// Reject a quantity and unit price whose amount does not fit in a `Decimal`
pub(crate) fn check_amount(quantity: i32, unit_price: Decimal) -> AppResult<()> {
    match line_amount(quantity, unit_price) {
        Some(_) => Ok(()),
        None => Err(AppError::Validation {
            field: "unitPrice".to_string(),
            message: format!("Amount for {} units at {} is out of range", quantity, unit_price),
        }),
    }
}

pub(crate) fn negate(quantity: i32) -> AppResult<i32> {
    quantity
        .checked_neg()
        .ok_or_else(|| AppError::ValidationError(format!("Quantity {} is out of range", quantity)))
}

impl InboundService {
    pub fn new(repos: Repositories, locks: StockLocks, config: InventoryConfig) -> Self {
        let default_unit = config.default_unit.clone();
        let inventory = InventoryService::new(repos.clone(), locks.clone(), config);
        Self {
            repos,
            locks,
            inventory,
            default_unit,
        }
    }

    /// Record an inbound transaction and add its quantity to stock.
    ///
    /// Creates the inventory record when the item code has none yet.
    pub async fn create(&self, input: CreateInbound) -> AppResult<Inbound> {
        validate_natural_key(&input.item_code).map_err(|message| AppError::Validation {
            field: "itemCode".to_string(),
            message: message.to_string(),
        })?;
        check_amount(input.quantity, input.unit_price)?;

        let _guard = self.locks.acquire(&input.item_code).await;

        let inbound = Inbound {
            id: Uuid::new_v4(),
            inbound_date: input.inbound_date.unwrap_or_else(|| Utc::now().date_naive()),
            item_code: input.item_code,
            item_name: input.item_name,
            quantity: input.quantity,
            unit_price: input.unit_price,
            supplier: input.supplier,
            memo: input.memo.unwrap_or_default(),
        };

        let existing = self.inventory.find_by_item_code(&inbound.item_code).await?;
        let new_stock = match &existing {
            Some(inventory) => shift_stock(inventory, inbound.quantity)?,
            None => inbound.quantity,
        };

        let inbound = self.repos.inbounds.create(inbound).await?;

        let mut inventory = match existing {
            Some(inventory) => inventory,
            None => {
                tracing::info!(item_code = %inbound.item_code, "No inventory for inbound item, creating one");
                self.inventory
                    .create(&inbound.item_code, &inbound.item_name, &self.default_unit)
                    .await?
            }
        };
        inventory.current_stock = new_stock;
        inventory.last_inbound_date = Some(inbound.inbound_date);
        self.inventory.save(inventory).await?;

        tracing::info!(
            item_code = %inbound.item_code,
            quantity = inbound.quantity,
            stock = new_stock,
            "Inbound recorded"
        );
        Ok(inbound)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Inbound>> {
        self.repos.inbounds.find_all(&RecordFilter::all()).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Inbound> {
        self.repos
            .inbounds
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inbound".to_string()))
    }

    /// Read an inbound transaction and lock its item code plus `extra`.
    ///
    /// Retries when the item code changes while waiting, so the guard always
    /// covers the code the returned record holds.
    async fn lock_record(&self, id: Uuid, extra: Option<&str>) -> AppResult<(Inbound, StockGuard)> {
        loop {
            let before = self.find_one(id).await?;
            let mut codes = vec![before.item_code.as_str()];
            codes.extend(extra);
            let guard = self.locks.acquire_many(&codes).await;

            let current = self.find_one(id).await?;
            if current.item_code == before.item_code {
                return Ok((current, guard));
            }
            tracing::debug!(%id, "Item code changed while waiting for stock lock, retrying");
        }
    }

    /// Edit an inbound transaction, moving stock to match.
    ///
    /// When the item code changes, the old item loses the original quantity
    /// and the new item gains the new (or original) quantity. A new item
    /// without an inventory record is left alone.
    pub async fn update(&self, id: Uuid, input: UpdateInbound) -> AppResult<Inbound> {
        let (original, _guard) = self.lock_record(id, input.item_code.as_deref()).await?;
        check_amount(
            input.quantity.unwrap_or(original.quantity),
            input.unit_price.unwrap_or(original.unit_price),
        )?;
        let target_code = input
            .item_code
            .clone()
            .filter(|code| *code != original.item_code);

        let mut changes: Vec<Inventory> = Vec::new();

        match &target_code {
            Some(target_code) => {
                validate_natural_key(target_code).map_err(|message| AppError::Validation {
                    field: "itemCode".to_string(),
                    message: message.to_string(),
                })?;

                if let Some(mut old) = self.inventory.find_by_item_code(&original.item_code).await? {
                    old.current_stock = shift_stock(&old, negate(original.quantity)?)?;
                    changes.push(old);
                }

                let moved = input.quantity.unwrap_or(original.quantity);
                match self.inventory.find_by_item_code(target_code).await? {
                    Some(mut target) => {
                        target.current_stock = shift_stock(&target, moved)?;
                        changes.push(target);
                    }
                    None => {
                        tracing::debug!(%target_code, "No inventory for new item code, stock not moved");
                    }
                }
            }
            None => {
                if let Some(mut inventory) = self.inventory.find_by_item_code(&original.item_code).await? {
                    if let Some(quantity) = input.quantity {
                        let delta = quantity_delta(quantity, original.quantity)?;
                        inventory.current_stock = shift_stock(&inventory, delta)?;
                        if let Some(date) = input.inbound_date {
                            inventory.last_inbound_date = Some(date);
                        }
                        changes.push(inventory);
                    } else if let Some(date) = input.inbound_date {
                        inventory.last_inbound_date = Some(date);
                        changes.push(inventory);
                    }
                }
            }
        }

        for inventory in changes {
            self.inventory.save(inventory).await?;
        }

        let mut inbound = original;
        input.apply_to(&mut inbound);
        let inbound = self.repos.inbounds.save(inbound).await?;

        tracing::info!(id = %inbound.id, item_code = %inbound.item_code, "Inbound updated");
        Ok(inbound)
    }

    /// Delete an inbound transaction and take its quantity back out of stock
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let (inbound, _guard) = self.lock_record(id, None).await?;
        let inventory = match self.inventory.find_by_item_code(&inbound.item_code).await? {
            Some(mut inventory) => {
                inventory.current_stock = shift_stock(&inventory, negate(inbound.quantity)?)?;
                Some(inventory)
            }
            None => None,
        };

        self.repos.inbounds.delete(id).await?;
        if let Some(inventory) = inventory {
            self.inventory.save(inventory).await?;
        }

        tracing::info!(%id, item_code = %inbound.item_code, quantity = inbound.quantity, "Inbound removed");
        Ok(())
    }
}
