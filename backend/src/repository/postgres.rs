use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{Inbound, Inventory, Item, Outbound, User, Warehouse};
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::Query,
    FromRow, PgPool, Postgres, QueryBuilder,
};
use uuid::Uuid;

use super::{Record, RecordFilter, Repository};
use crate::error::{AppError, AppResult};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Table mapping for a record stored in PostgreSQL.
///
/// `COLUMNS` lists every column in the order `bind_columns` binds them;
/// `id` always comes first.
pub trait PgRecord: Record {
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin + Into<Self>;

    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY_COLUMN: Option<&'static str> = None;
    const ITEM_COLUMN: Option<&'static str> = None;
    const DATE_COLUMN: Option<&'static str> = None;
    const ORDER_BY: &'static str;

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q>;
}

fn select_sql<T: PgRecord>() -> String {
    format!("SELECT {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
}

fn insert_sql<T: PgRecord>() -> String {
    let placeholders: Vec<String> = (1..=T::COLUMNS.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::TABLE,
        T::COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

fn upsert_sql<T: PgRecord>() -> String {
    let updates: Vec<String> = T::COLUMNS
        .iter()
        .skip(1)
        .map(|column| format!("{column} = EXCLUDED.{column}"))
        .collect();
    format!("{} ON CONFLICT (id) DO UPDATE SET {}", insert_sql::<T>(), updates.join(", "))
}

/// Map unique-constraint violations to `DuplicateEntry`
fn map_write_error<T: Record>(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AppError::DuplicateEntry(T::KEY_FIELD.to_string());
        }
    }
    err.into()
}

/// PostgreSQL-backed store for every entity
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl<T: PgRecord> Repository<T> for PgStore {
    async fn create(&self, record: T) -> AppResult<T> {
        let sql = insert_sql::<T>();
        record
            .bind_columns(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(map_write_error::<T>)?;
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<T>> {
        let sql = format!("{} WHERE id = $1", select_sql::<T>());
        let row = sqlx::query_as::<_, T::Row>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>> {
        let Some(column) = T::KEY_COLUMN else {
            return Ok(None);
        };
        let sql = format!("{} WHERE {} = $1", select_sql::<T>(), column);
        let row = sqlx::query_as::<_, T::Row>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_all(&self, filter: &RecordFilter) -> AppResult<Vec<T>> {
        let mut builder = QueryBuilder::<Postgres>::new(select_sql::<T>());
        builder.push(" WHERE TRUE");

        if let (Some(code), Some(column)) = (&filter.item_code, T::ITEM_COLUMN) {
            builder.push(format!(" AND {} = ", column)).push_bind(code.clone());
        }
        if let Some(column) = T::DATE_COLUMN {
            if let Some(start) = filter.window.start_date {
                builder.push(format!(" AND {} >= ", column)).push_bind(start);
            }
            if let Some(end) = filter.window.end_date {
                builder.push(format!(" AND {} <= ", column)).push_bind(end);
            }
        }
        builder.push(format!(" ORDER BY {}", T::ORDER_BY));

        let rows = builder
            .build_query_as::<T::Row>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, record: T) -> AppResult<T> {
        let sql = upsert_sql::<T>();
        record
            .bind_columns(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(map_write_error::<T>)?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(T::ENTITY.to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Table mappings
// ============================================================================

#[derive(Debug, FromRow)]
pub struct ItemRow {
    id: Uuid,
    item_code: String,
    item_name: String,
    unit_price: Decimal,
    unit: String,
    category: String,
    description: Option<String>,
    registered_date: NaiveDate,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            item_code: row.item_code,
            item_name: row.item_name,
            unit_price: row.unit_price,
            unit: row.unit,
            category: row.category,
            description: row.description,
            registered_date: row.registered_date,
        }
    }
}

impl PgRecord for Item {
    type Row = ItemRow;

    const TABLE: &'static str = "items";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "item_code",
        "item_name",
        "unit_price",
        "unit",
        "category",
        "description",
        "registered_date",
    ];
    const KEY_COLUMN: Option<&'static str> = Some("item_code");
    const ITEM_COLUMN: Option<&'static str> = Some("item_code");
    const ORDER_BY: &'static str = "item_code";

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.item_code.clone())
            .bind(self.item_name.clone())
            .bind(self.unit_price)
            .bind(self.unit.clone())
            .bind(self.category.clone())
            .bind(self.description.clone())
            .bind(self.registered_date)
    }
}

#[derive(Debug, FromRow)]
pub struct InventoryRow {
    id: Uuid,
    item_code: String,
    item_name: String,
    current_stock: i32,
    safe_stock: i32,
    unit: String,
    location: String,
    status: String,
    registered_date: NaiveDate,
    last_inbound_date: Option<NaiveDate>,
    last_outbound_date: Option<NaiveDate>,
}

impl From<InventoryRow> for Inventory {
    fn from(row: InventoryRow) -> Self {
        Inventory {
            id: row.id,
            item_code: row.item_code,
            item_name: row.item_name,
            current_stock: row.current_stock,
            safe_stock: row.safe_stock,
            unit: row.unit,
            location: row.location,
            status: row.status,
            registered_date: row.registered_date,
            last_inbound_date: row.last_inbound_date,
            last_outbound_date: row.last_outbound_date,
        }
    }
}

impl PgRecord for Inventory {
    type Row = InventoryRow;

    const TABLE: &'static str = "inventory";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "item_code",
        "item_name",
        "current_stock",
        "safe_stock",
        "unit",
        "location",
        "status",
        "registered_date",
        "last_inbound_date",
        "last_outbound_date",
    ];
    const KEY_COLUMN: Option<&'static str> = Some("item_code");
    const ITEM_COLUMN: Option<&'static str> = Some("item_code");
    const ORDER_BY: &'static str = "item_code";

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.item_code.clone())
            .bind(self.item_name.clone())
            .bind(self.current_stock)
            .bind(self.safe_stock)
            .bind(self.unit.clone())
            .bind(self.location.clone())
            .bind(self.status.clone())
            .bind(self.registered_date)
            .bind(self.last_inbound_date)
            .bind(self.last_outbound_date)
    }
}

#[derive(Debug, FromRow)]
pub struct InboundRow {
    id: Uuid,
    inbound_date: NaiveDate,
    item_code: String,
    item_name: String,
    quantity: i32,
    unit_price: Decimal,
    supplier: String,
    memo: Option<String>,
}

impl From<InboundRow> for Inbound {
    fn from(row: InboundRow) -> Self {
        Inbound {
            id: row.id,
            inbound_date: row.inbound_date,
            item_code: row.item_code,
            item_name: row.item_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            supplier: row.supplier,
            memo: row.memo.unwrap_or_default(),
        }
    }
}

impl PgRecord for Inbound {
    type Row = InboundRow;

    const TABLE: &'static str = "inbound";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "inbound_date",
        "item_code",
        "item_name",
        "quantity",
        "unit_price",
        "supplier",
        "memo",
    ];
    const ITEM_COLUMN: Option<&'static str> = Some("item_code");
    const DATE_COLUMN: Option<&'static str> = Some("inbound_date");
    const ORDER_BY: &'static str = "inbound_date, id";

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.inbound_date)
            .bind(self.item_code.clone())
            .bind(self.item_name.clone())
            .bind(self.quantity)
            .bind(self.unit_price)
            .bind(self.supplier.clone())
            .bind(self.memo.clone())
    }
}

#[derive(Debug, FromRow)]
pub struct OutboundRow {
    id: Uuid,
    outbound_date: NaiveDate,
    item_code: String,
    item_name: String,
    quantity: i32,
    unit_price: Decimal,
    customer: String,
    memo: Option<String>,
}

impl From<OutboundRow> for Outbound {
    fn from(row: OutboundRow) -> Self {
        Outbound {
            id: row.id,
            outbound_date: row.outbound_date,
            item_code: row.item_code,
            item_name: row.item_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            customer: row.customer,
            memo: row.memo.unwrap_or_default(),
        }
    }
}

impl PgRecord for Outbound {
    type Row = OutboundRow;

    const TABLE: &'static str = "outbound";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "outbound_date",
        "item_code",
        "item_name",
        "quantity",
        "unit_price",
        "customer",
        "memo",
    ];
    const ITEM_COLUMN: Option<&'static str> = Some("item_code");
    const DATE_COLUMN: Option<&'static str> = Some("outbound_date");
    const ORDER_BY: &'static str = "outbound_date, id";

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.outbound_date)
            .bind(self.item_code.clone())
            .bind(self.item_name.clone())
            .bind(self.quantity)
            .bind(self.unit_price)
            .bind(self.customer.clone())
            .bind(self.memo.clone())
    }
}

#[derive(Debug, FromRow)]
pub struct WarehouseRow {
    id: Uuid,
    warehouse_code: String,
    warehouse_name: String,
    location: String,
    capacity: i32,
    current_stock: i32,
    manager: String,
    phone: String,
    description: Option<String>,
}

impl From<WarehouseRow> for Warehouse {
    fn from(row: WarehouseRow) -> Self {
        Warehouse {
            id: row.id,
            warehouse_code: row.warehouse_code,
            warehouse_name: row.warehouse_name,
            location: row.location,
            capacity: row.capacity,
            current_stock: row.current_stock,
            manager: row.manager,
            phone: row.phone,
            description: row.description.unwrap_or_default(),
        }
    }
}

impl PgRecord for Warehouse {
    type Row = WarehouseRow;

    const TABLE: &'static str = "warehouses";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "warehouse_code",
        "warehouse_name",
        "location",
        "capacity",
        "current_stock",
        "manager",
        "phone",
        "description",
    ];
    const KEY_COLUMN: Option<&'static str> = Some("warehouse_code");
    const ORDER_BY: &'static str = "warehouse_code";

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.warehouse_code.clone())
            .bind(self.warehouse_name.clone())
            .bind(self.location.clone())
            .bind(self.capacity)
            .bind(self.current_stock)
            .bind(self.manager.clone())
            .bind(self.phone.clone())
            .bind(self.description.clone())
    }
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    id: Uuid,
    user_id: String,
    user_name: String,
    role: String,
    department: String,
    email: String,
    status: String,
    description: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            role: row.role,
            department: row.department,
            email: row.email,
            status: row.status,
            description: row.description.unwrap_or_default(),
        }
    }
}

impl PgRecord for User {
    type Row = UserRow;

    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_id",
        "user_name",
        "role",
        "department",
        "email",
        "status",
        "description",
    ];
    const KEY_COLUMN: Option<&'static str> = Some("user_id");
    const ORDER_BY: &'static str = "user_id";

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.id)
            .bind(self.user_id.clone())
            .bind(self.user_name.clone())
            .bind(self.role.clone())
            .bind(self.department.clone())
            .bind(self.email.clone())
            .bind(self.status.clone())
            .bind(self.description.clone())
    }
}
