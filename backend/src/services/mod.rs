//! Business logic services for the inventory backend
//!
//! The inventory, inbound, outbound and item services together keep each
//! item's `currentStock` equal to its inbound total minus its outbound total.
//! They share one [`StockLocks`] so that every read-modify-write of a stock
//! record runs alone for its item code.

pub mod inbound;
pub mod inventory;
pub mod items;
pub mod locks;
pub mod outbound;
pub mod reporting;
pub mod users;
pub mod warehouse;

pub use inbound::{CreateInbound, InboundService, UpdateInbound};
pub use inventory::{CreateInventory, InventoryService, UpdateInventory};
pub use items::{CreateItem, ItemService, UpdateItem};
pub use locks::{StockGuard, StockLocks};
pub use outbound::{CreateOutbound, OutboundService, UpdateOutbound};
pub use reporting::{ReportingService, StatusQuery, DEFAULT_TOP_ITEMS};
pub use users::{CreateUser, UpdateUser, UserService};
pub use warehouse::{CreateWarehouse, UpdateWarehouse, WarehouseService};
