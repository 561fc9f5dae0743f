//! Administrative user models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status given to users created without one
pub const DEFAULT_USER_STATUS: &str = "active";

/// An administrative user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Unique natural key chosen by the operator
    pub user_id: String,
    pub user_name: String,
    pub role: String,
    pub department: String,
    pub email: String,
    pub status: String,
    pub description: String,
}
