//! Shared types and models for the inventory backend
//!
//! Record shapes, report payloads and the code-generation rules used by the
//! backend services. Field names serialize in camelCase so stored and
//! exchanged payloads round-trip unchanged.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
