//! HTTP request handlers

pub mod health;
pub mod inbound;
pub mod inventory;
pub mod items;
pub mod outbound;
pub mod reporting;
pub mod users;
pub mod warehouse;

pub use health::*;
pub use inbound::*;
pub use inventory::*;
pub use items::*;
pub use outbound::*;
pub use reporting::*;
pub use users::*;
pub use warehouse::*;
