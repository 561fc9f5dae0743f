//! Item catalog models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of auto-assigned item codes (`ITEM001`, `ITEM002`, ...)
pub const ITEM_CODE_PREFIX: &str = "ITEM";

/// A catalog entry describing a purchasable or sellable good
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    /// Unique natural key
    pub item_code: String,
    pub item_name: String,
    pub unit_price: Decimal,
    pub unit: String,
    pub category: String,
    pub description: Option<String>,
    pub registered_date: NaiveDate,
}
