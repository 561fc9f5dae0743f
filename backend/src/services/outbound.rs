//! Outbound (shipping) transactions with stock sufficiency checks

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{Inventory, Outbound};
use uuid::Uuid;

use super::inbound::{check_amount, negate, quantity_delta, shift_stock};
use super::{InventoryService, StockGuard, StockLocks};
use crate::config::InventoryConfig;
use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

/// Records outgoing stock; never lets a shipment exceed what is on hand
#[derive(Clone)]
pub struct OutboundService {
    repos: Repositories,
    locks: StockLocks,
    inventory: InventoryService,
}

/// Input for recording an outbound transaction
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutbound {
    /// Defaults to today
    pub outbound_date: Option<NaiveDate>,
    pub item_code: String,
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub customer: String,
    pub memo: Option<String>,
}

/// Editable fields of an outbound transaction
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutbound {
    pub outbound_date: Option<NaiveDate>,
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub customer: Option<String>,
    pub memo: Option<String>,
}

impl UpdateOutbound {
    pub fn apply_to(self, outbound: &mut Outbound) {
        if let Some(date) = self.outbound_date {
            outbound.outbound_date = date;
        }
        if let Some(item_code) = self.item_code {
            outbound.item_code = item_code;
        }
        if let Some(item_name) = self.item_name {
            outbound.item_name = item_name;
        }
        if let Some(quantity) = self.quantity {
            outbound.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            outbound.unit_price = unit_price;
        }
        if let Some(customer) = self.customer {
            outbound.customer = customer;
        }
        if let Some(memo) = self.memo {
            outbound.memo = memo;
        }
    }
}

/// Deduct `quantity` from `inventory`, failing when stock would go negative
fn deduct(inventory: &Inventory, quantity: i32) -> AppResult<i32> {
    let remaining = shift_stock(inventory, negate(quantity)?)?;
    if remaining < 0 {
        return Err(AppError::InsufficientInventory {
            item_code: inventory.item_code.clone(),
            current_stock: inventory.current_stock,
            requested: quantity,
        });
    }
    Ok(remaining)
}

impl OutboundService {
    pub fn new(repos: Repositories, locks: StockLocks, config: InventoryConfig) -> Self {
        let inventory = InventoryService::new(repos.clone(), locks.clone(), config);
        Self {
            repos,
            locks,
            inventory,
        }
    }

    async fn require_inventory(&self, item_code: &str) -> AppResult<Inventory> {
        self.inventory
            .find_by_item_code(item_code)
            .await?
            .ok_or_else(|| AppError::inventory_not_found(item_code))
    }

    /// Record an outbound transaction and deduct its quantity from stock.
    ///
    /// Nothing is written when the item has no inventory record or too
    /// little stock.
    pub async fn create(&self, input: CreateOutbound) -> AppResult<Outbound> {
        check_amount(input.quantity, input.unit_price)?;
        let _guard = self.locks.acquire(&input.item_code).await;

        let mut inventory = self.require_inventory(&input.item_code).await?;
        if inventory.current_stock < input.quantity {
            return Err(AppError::InsufficientInventory {
                item_code: input.item_code,
                current_stock: inventory.current_stock,
                requested: input.quantity,
            });
        }
        let remaining = deduct(&inventory, input.quantity)?;

        let outbound = Outbound {
            id: Uuid::new_v4(),
            outbound_date: input.outbound_date.unwrap_or_else(|| Utc::now().date_naive()),
            item_code: input.item_code,
            item_name: input.item_name,
            quantity: input.quantity,
            unit_price: input.unit_price,
            customer: input.customer,
            memo: input.memo.unwrap_or_default(),
        };
        let outbound = self.repos.outbounds.create(outbound).await?;

        inventory.current_stock = remaining;
        inventory.last_outbound_date = Some(outbound.outbound_date);
        self.inventory.save(inventory).await?;

        tracing::info!(
            item_code = %outbound.item_code,
            quantity = outbound.quantity,
            stock = remaining,
            "Outbound recorded"
        );
        Ok(outbound)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Outbound>> {
        self.repos.outbounds.find_all(&RecordFilter::all()).await
    }

    pub async fn find_one(&self, id: Uuid) -> AppResult<Outbound> {
        self.repos
            .outbounds
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Outbound".to_string()))
    }

    /// Read an outbound transaction and lock its item code plus `extra`.
    ///
    /// Retries when the item code changes while waiting, so the guard always
    /// covers the code the returned record holds.
    async fn lock_record(&self, id: Uuid, extra: Option<&str>) -> AppResult<(Outbound, StockGuard)> {
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

    /// Edit an outbound transaction, moving stock to match.
    ///
    /// Every check runs before the first write, so a rejected edit leaves
    /// both inventory records and the transaction untouched.
    pub async fn update(&self, id: Uuid, input: UpdateOutbound) -> AppResult<Outbound> {
        let (original, _guard) = self.lock_record(id, input.item_code.as_deref()).await?;
        check_amount(
            input.quantity.unwrap_or(original.quantity),
            input.unit_price.unwrap_or(original.unit_price),
        )?;
        let mut current = self.require_inventory(&original.item_code).await?;
        let target_code = input
            .item_code
            .clone()
            .filter(|code| *code != original.item_code);

        let mut changes: Vec<Inventory> = Vec::new();

        match &target_code {
            Some(target_code) => {
                let mut target = self.require_inventory(target_code).await?;
                let moved = input.quantity.unwrap_or(original.quantity);
                let target_stock = deduct(&target, moved)?;

                current.current_stock = shift_stock(&current, original.quantity)?;
                target.current_stock = target_stock;
                target.last_outbound_date =
                    Some(input.outbound_date.unwrap_or(original.outbound_date));

                changes.push(current);
                changes.push(target);
            }
            None => match input.quantity {
                Some(quantity) if quantity != original.quantity => {
                    let delta = quantity_delta(quantity, original.quantity)?;
                    let new_stock = shift_stock(&current, negate(delta)?)?;
                    if new_stock < 0 {
                        return Err(AppError::InsufficientInventory {
                            item_code: current.item_code,
                            current_stock: current.current_stock,
                            requested: quantity,
                        });
                    }
                    current.current_stock = new_stock;
                    if let Some(date) = input.outbound_date {
                        current.last_outbound_date = Some(date);
                    }
                    changes.push(current);
                }
                _ => {
                    if let Some(date) = input.outbound_date {
                        current.last_outbound_date = Some(date);
                        changes.push(current);
                    }
                }
            },
        }

        for inventory in changes {
            self.inventory.save(inventory).await?;
        }

        let mut outbound = original;
        input.apply_to(&mut outbound);
        let outbound = self.repos.outbounds.save(outbound).await?;

        tracing::info!(id = %outbound.id, item_code = %outbound.item_code, "Outbound updated");
        Ok(outbound)
    }

    /// Delete an outbound transaction and return its quantity to stock
    pub async fn remove(&self, id: Uuid) -> AppResult<()> {
        let (outbound, _guard) = self.lock_record(id, None).await?;
        let inventory = match self.inventory.find_by_item_code(&outbound.item_code).await? {
            Some(mut inventory) => {
                inventory.current_stock = shift_stock(&inventory, outbound.quantity)?;
                Some(inventory)
            }
            None => None,
        };

        if let Some(inventory) = inventory {
            self.inventory.save(inventory).await?;
        }
        self.repos.outbounds.delete(id).await?;

        tracing::info!(%id, item_code = %outbound.item_code, quantity = outbound.quantity, "Outbound removed");
        Ok(())
    }
}
