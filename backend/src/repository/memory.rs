use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use shared::{Inbound, Inventory, Item, Outbound, User, Warehouse};
use uuid::Uuid;

use super::{Record, RecordFilter, Repository};
use crate::error::{AppError, AppResult};

/// In-memory table for one entity.
///
/// Intended for tests/dev. Rows keep insertion order; `find_all` is a scan.
#[derive(Debug)]
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<T>>> {
        self.rows
            .read()
            .map_err(|_| AppError::Internal(format!("{} table lock poisoned", T::ENTITY)))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.rows
            .write()
            .map_err(|_| AppError::Internal(format!("{} table lock poisoned", T::ENTITY)))
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryTable<T> {
    async fn create(&self, record: T) -> AppResult<T> {
        let mut rows = self.write()?;

        if rows.iter().any(|row| row.id() == record.id()) {
            return Err(AppError::DuplicateEntry("id".to_string()));
        }
        if let Some(key) = record.natural_key() {
            if rows.iter().any(|row| row.natural_key() == Some(key)) {
                return Err(AppError::DuplicateEntry(T::KEY_FIELD.to_string()));
            }
        }

        rows.push(record.clone());
        Ok(record)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<T>> {
        Ok(self.read()?.iter().find(|row| row.id() == id).cloned())
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<T>> {
        Ok(self
            .read()?
            .iter()
            .find(|row| row.natural_key() == Some(key))
            .cloned())
    }

    async fn find_all(&self, filter: &RecordFilter) -> AppResult<Vec<T>> {
        Ok(self
            .read()?
            .iter()
            .filter(|row| filter.matches(*row))
            .cloned()
            .collect())
    }

    async fn save(&self, record: T) -> AppResult<T> {
        let mut rows = self.write()?;

        if let Some(key) = record.natural_key() {
            let taken = rows
                .iter()
                .any(|row| row.id() != record.id() && row.natural_key() == Some(key));
            if taken {
                return Err(AppError::DuplicateEntry(T::KEY_FIELD.to_string()));
            }
        }

        match rows.iter_mut().find(|row| row.id() == record.id()) {
            Some(row) => *row = record.clone(),
            None => rows.push(record.clone()),
        }
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.write()?;
        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or_else(|| AppError::NotFound(T::ENTITY.to_string()))?;
        rows.remove(index);
        Ok(())
    }
}

/// A full set of empty in-memory tables
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub items: MemoryTable<Item>,
    pub inventories: MemoryTable<Inventory>,
    pub inbounds: MemoryTable<Inbound>,
    pub outbounds: MemoryTable<Outbound>,
    pub warehouses: MemoryTable<Warehouse>,
    pub users: MemoryTable<User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}
