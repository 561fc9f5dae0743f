//! Stock-level models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reorder threshold given to new inventory records
pub const DEFAULT_SAFE_STOCK: i32 = 10;

/// Storage location given to new inventory records
pub const DEFAULT_LOCATION: &str = "A-1-1";

/// Status given to new inventory records
pub const DEFAULT_INVENTORY_STATUS: &str = "normal";

/// The live stock level for one item code.
///
/// `current_stock` is a cached derivation of the inbound and outbound
/// history for `item_code`; the transaction services keep it in sync
/// incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub id: Uuid,
    /// Unique natural key, one record per item code
    pub item_code: String,
    pub item_name: String,
    pub current_stock: i32,
    pub safe_stock: i32,
    pub unit: String,
    pub location: String,
    pub status: String,
    pub registered_date: NaiveDate,
    pub last_inbound_date: Option<NaiveDate>,
    pub last_outbound_date: Option<NaiveDate>,
}

impl Inventory {
    /// True when stock has fallen to or below the reorder threshold
    pub fn is_below_safe_stock(&self) -> bool {
        self.current_stock <= self.safe_stock
    }
}
