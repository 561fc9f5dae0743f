//! Persistence collaborator for the services
//!
//! Services never touch a database directly; they go through
//! [`Repository`] trait objects bundled in [`Repositories`]. Two stores
//! implement it: [`PgStore`] (PostgreSQL via sqlx) and [`MemoryStore`]
//! (process-local, used by tests and when no database URL is configured).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{DateWindow, Inbound, Inventory, Item, Outbound, User, Warehouse};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

mod memory;
mod postgres;

pub use memory::{MemoryStore, MemoryTable};
pub use postgres::PgStore;

/// A persisted entity with a generated id and, optionally, a natural key
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// Field name of the natural key, used in conflict errors
    const KEY_FIELD: &'static str = "id";

    fn id(&self) -> Uuid;

    /// Caller-meaningful unique key (item code, warehouse code, user id)
    fn natural_key(&self) -> Option<&str> {
        None
    }

    /// Item code the record belongs to, for filtering
    fn item_code(&self) -> Option<&str> {
        None
    }

    /// Business date of the record, for date-window filtering
    fn record_date(&self) -> Option<NaiveDate> {
        None
    }
}

/// Criteria for [`Repository::find_all`].
///
/// Criteria that do not apply to an entity (a date window on items, say)
/// are ignored for that entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub item_code: Option<String>,
    pub window: DateWindow,
}

impl RecordFilter {
    /// No criteria: every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_item(item_code: impl Into<String>) -> Self {
        Self {
            item_code: Some(item_code.into()),
            window: DateWindow::unbounded(),
        }
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        let code_matches = match (&self.item_code, record.item_code()) {
            (Some(wanted), Some(code)) => wanted == code,
            _ => true,
        };
        let date_matches = record
            .record_date()
            .map_or(true, |date| self.window.contains(date));

        code_matches && date_matches
    }
}

/// Store operations the services rely on
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Insert a new record. Fails with `DuplicateEntry` if its natural key is taken.
    async fn create(&self, record: T) -> AppResult<T>;

    async fn find(&self, id: Uuid) -> AppResult<Option<T>>;

    /// Look up by natural key. Always `None` for entities without one.
    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>>;

    async fn find_all(&self, filter: &RecordFilter) -> AppResult<Vec<T>>;

    /// Insert or replace by id
    async fn save(&self, record: T) -> AppResult<T>;

    /// Remove by id. Fails with `NotFound` if absent.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

impl Record for Item {
    const ENTITY: &'static str = "Item";
    const KEY_FIELD: &'static str = "itemCode";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.item_code)
    }

    fn item_code(&self) -> Option<&str> {
        Some(&self.item_code)
    }
}

impl Record for Inventory {
    const ENTITY: &'static str = "Inventory";
    const KEY_FIELD: &'static str = "itemCode";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.item_code)
    }

    fn item_code(&self) -> Option<&str> {
        Some(&self.item_code)
    }
}

impl Record for Inbound {
    const ENTITY: &'static str = "Inbound";

    fn id(&self) -> Uuid {
        self.id
    }

    fn item_code(&self) -> Option<&str> {
        Some(&self.item_code)
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.inbound_date)
    }
}

impl Record for Outbound {
    const ENTITY: &'static str = "Outbound";

    fn id(&self) -> Uuid {
        self.id
    }

    fn item_code(&self) -> Option<&str> {
        Some(&self.item_code)
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.outbound_date)
    }
}

impl Record for Warehouse {
    const ENTITY: &'static str = "Warehouse";
    const KEY_FIELD: &'static str = "warehouseCode";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.warehouse_code)
    }
}

impl Record for User {
    const ENTITY: &'static str = "User";
    const KEY_FIELD: &'static str = "userId";

    fn id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.user_id)
    }
}

/// One repository per entity, shared by every service
#[derive(Clone)]
pub struct Repositories {
    pub items: Arc<dyn Repository<Item>>,
    pub inventories: Arc<dyn Repository<Inventory>>,
    pub inbounds: Arc<dyn Repository<Inbound>>,
    pub outbounds: Arc<dyn Repository<Outbound>>,
    pub warehouses: Arc<dyn Repository<Warehouse>>,
    pub users: Arc<dyn Repository<User>>,
    pool: Option<PgPool>,
}

impl Repositories {
    /// Repositories backed by PostgreSQL
    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            items: store.clone(),
            inventories: store.clone(),
            inbounds: store.clone(),
            outbounds: store.clone(),
            warehouses: store.clone(),
            users: store,
            pool: Some(pool),
        }
    }

    /// Repositories backed by a fresh, empty in-memory store
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            items: Arc::new(store.items),
            inventories: Arc::new(store.inventories),
            inbounds: Arc::new(store.inbounds),
            outbounds: Arc::new(store.outbounds),
            warehouses: Arc::new(store.warehouses),
            users: Arc::new(store.users),
            pool: None,
        }
    }

    /// Name of the backing store, for health reporting
    pub fn backend_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Check the backing store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
