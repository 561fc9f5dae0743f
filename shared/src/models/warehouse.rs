//! Warehouse models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of auto-assigned warehouse codes (`WH001`, `WH002`, ...)
pub const WAREHOUSE_CODE_PREFIX: &str = "WH";

/// A storage site. Tracked on its own; not linked to item stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: Uuid,
    pub warehouse_code: String,
    pub warehouse_name: String,
    pub location: String,
    pub capacity: i32,
    pub current_stock: i32,
    pub manager: String,
    pub phone: String,
    pub description: String,
}
