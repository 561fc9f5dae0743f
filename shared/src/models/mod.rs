//! Domain models for the inventory backend

mod inventory;
mod item;
mod report;
mod transaction;
mod user;
mod warehouse;

pub use inventory::*;
pub use item::*;
pub use report::*;
pub use transaction::*;
pub use user::*;
pub use warehouse::*;
