//! Item catalog, warehouse registry and user directory tests

use inventory_backend::config::InventoryConfig;
use inventory_backend::repository::Repositories;
use inventory_backend::services::{
    CreateInbound, CreateItem, CreateUser, CreateWarehouse, InboundService, InventoryService,
    ItemService, StockLocks, UpdateItem, UpdateUser, UpdateWarehouse, UserService,
    WarehouseService,
};
use inventory_backend::AppError;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

struct Catalog {
    items: ItemService,
    inventory: InventoryService,
    inbound: InboundService,
    warehouses: WarehouseService,
    users: UserService,
}

fn catalog() -> Catalog {
    let repos = Repositories::in_memory();
    let locks = StockLocks::new();
    let config = InventoryConfig::default();
    Catalog {
        items: ItemService::new(repos.clone(), locks.clone(), config.clone()),
        inventory: InventoryService::new(repos.clone(), locks.clone(), config.clone()),
        inbound: InboundService::new(repos.clone(), locks, config),
        warehouses: WarehouseService::new(repos.clone()),
        users: UserService::new(repos),
    }
}

fn new_item(item_code: Option<&str>, item_name: &str) -> CreateItem {
    CreateItem {
        item_code: item_code.map(str::to_string),
        item_name: item_name.to_string(),
        unit_price: Decimal::new(999, 2),
        unit: "ea".to_string(),
        category: "parts".to_string(),
        description: None,
    }
}

fn new_warehouse(code: Option<&str>) -> CreateWarehouse {
    CreateWarehouse {
        warehouse_code: code.map(str::to_string),
        warehouse_name: "Main".to_string(),
        location: "Busan".to_string(),
        capacity: 1000,
        current_stock: None,
        manager: "Kim".to_string(),
        phone: "010-1234-5678".to_string(),
        description: None,
    }
}

fn new_user(user_id: &str, email: &str) -> CreateUser {
    CreateUser {
        user_id: user_id.to_string(),
        user_name: "Lee".to_string(),
        role: "manager".to_string(),
        department: "logistics".to_string(),
        email: email.to_string(),
        status: None,
        description: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_item_codes_are_sequential() {
        let catalog = catalog();
        let mut codes = Vec::new();
        for name in ["Widget", "Bolt", "Nut"] {
            codes.push(catalog.items.create(new_item(None, name)).await.unwrap().item_code);
        }
        assert_eq!(codes, vec!["ITEM001", "ITEM002", "ITEM003"]);
    }

    #[tokio::test]
    async fn test_item_code_follows_highest_in_use() {
        let catalog = catalog();
        catalog.items.create(new_item(Some("ITEM041"), "Widget")).await.unwrap();
        catalog.items.create(new_item(Some("CUSTOM-1"), "Bolt")).await.unwrap();

        let item = catalog.items.create(new_item(None, "Nut")).await.unwrap();
        assert_eq!(item.item_code, "ITEM042");
    }

    #[tokio::test]
    async fn test_item_create_adds_zero_stock_inventory() {
        let catalog = catalog();
        let item = catalog.items.create(new_item(None, "Widget")).await.unwrap();

        let inventory = catalog
            .inventory
            .find_by_item_code(&item.item_code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inventory.current_stock, 0);
        assert_eq!(inventory.item_name, "Widget");
        assert_eq!(item.registered_date, chrono::Utc::now().date_naive());
    }

    #[tokio::test]
    async fn test_item_create_keeps_stock_received_earlier() {
        let catalog = catalog();
        catalog
            .inbound
            .create(CreateInbound {
                inbound_date: None,
                item_code: "ITEM001".to_string(),
                item_name: "widget (draft)".to_string(),
                quantity: 12,
                unit_price: Decimal::ONE,
                supplier: "Acme".to_string(),
                memo: None,
            })
            .await
            .unwrap();

        catalog.items.create(new_item(Some("ITEM001"), "Widget")).await.unwrap();

        let inventory = catalog.inventory.find_by_item_code("ITEM001").await.unwrap().unwrap();
        assert_eq!(inventory.current_stock, 12);
        assert_eq!(inventory.item_name, "Widget");
    }

    #[tokio::test]
    async fn test_duplicate_item_code_conflicts() {
        let catalog = catalog();
        catalog.items.create(new_item(Some("ITEM001"), "Widget")).await.unwrap();

        let err = catalog
            .items
            .create(new_item(Some("ITEM001"), "Other"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(field) if field == "itemCode"));
    }

    #[tokio::test]
    async fn test_item_requires_name() {
        let catalog = catalog();
        let err = catalog.items.create(new_item(None, "")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_item_update_propagates_to_inventory() {
        let catalog = catalog();
        let item = catalog.items.create(new_item(None, "Widget")).await.unwrap();

        let updated = catalog
            .items
            .update(
                item.id,
                UpdateItem {
                    item_name: Some("Widget XL".to_string()),
                    unit: Some("box".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.item_code, item.item_code);

        let inventory = catalog
            .inventory
            .find_by_item_code(&item.item_code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(inventory.item_name, "Widget XL");
        assert_eq!(inventory.unit, "box");
    }

    #[tokio::test]
    async fn test_item_remove_deletes_inventory() {
        let catalog = catalog();
        let item = catalog.items.create(new_item(None, "Widget")).await.unwrap();

        catalog.items.remove(item.id).await.unwrap();

        assert!(catalog.inventory.find_by_item_code(&item.item_code).await.unwrap().is_none());
        assert!(matches!(
            catalog.items.find_by_item_code(&item.item_code).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            catalog.items.remove(item.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_warehouse_codes_and_defaults() {
        let catalog = catalog();
        let first = catalog.warehouses.create(new_warehouse(None)).await.unwrap();
        let second = catalog.warehouses.create(new_warehouse(None)).await.unwrap();

        assert_eq!(first.warehouse_code, "WH001");
        assert_eq!(second.warehouse_code, "WH002");
        assert_eq!(first.current_stock, 0);
        assert_eq!(first.description, "");

        let found = catalog.warehouses.find_by_warehouse_code("WH002").await.unwrap();
        assert_eq!(found.id, second.id);
    }

    #[tokio::test]
    async fn test_warehouse_duplicate_update_and_remove() {
        let catalog = catalog();
        let warehouse = catalog.warehouses.create(new_warehouse(Some("WH010"))).await.unwrap();

        let dup = catalog
            .warehouses
            .create(new_warehouse(Some("WH010")))
            .await
            .unwrap_err();
        assert!(matches!(dup, AppError::DuplicateEntry(field) if field == "warehouseCode"));

        let updated = catalog
            .warehouses
            .update(
                warehouse.id,
                UpdateWarehouse {
                    capacity: Some(2500),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.capacity, 2500);

        catalog.warehouses.remove(warehouse.id).await.unwrap();
        assert!(matches!(
            catalog.warehouses.find_one(warehouse.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            catalog.warehouses.update(Uuid::new_v4(), UpdateWarehouse::default()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_user_defaults_and_duplicates() {
        let catalog = catalog();
        let user = catalog.users.create(new_user("lee", "lee@example.com")).await.unwrap();
        assert_eq!(user.status, "active");
        assert_eq!(user.description, "");

        let err = catalog
            .users
            .create(new_user("lee", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(field) if field == "userId"));

        assert_eq!(catalog.users.find_by_user_id("lee").await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_user_email_is_validated() {
        let catalog = catalog();
        let err = catalog.users.create(new_user("kim", "not-an-email")).await.unwrap_err();
        assert!(err.is_validation());

        let user = catalog.users.create(new_user("kim", "kim@example.com")).await.unwrap();
        let err = catalog
            .users
            .update(
                user.id,
                UpdateUser {
                    email: Some("broken".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let updated = catalog
            .users
            .update(
                user.id,
                UpdateUser {
                    status: Some("inactive".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, "inactive");
        assert_eq!(updated.email, "kim@example.com");
    }

    #[tokio::test]
    async fn test_user_remove_missing_is_not_found() {
        let catalog = catalog();
        let err = catalog.users.remove(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Generated item codes never collide with caller-supplied ones
        #[test]
        fn prop_generated_item_codes_are_unique(
            supplied in prop::collection::btree_set(1u32..200, 0..8),
            generated in 1usize..8
        ) {
            let codes = tokio_test::block_on(async {
                let catalog = catalog();
                for n in &supplied {
                    let code = format!("ITEM{:03}", n);
                    catalog.items.create(new_item(Some(&code), "Widget")).await.unwrap();
                }
                for _ in 0..generated {
                    catalog.items.create(new_item(None, "Widget")).await.unwrap();
                }
                catalog.items.find_all().await.unwrap()
            });

            let mut seen = std::collections::HashSet::new();
            for item in &codes {
                prop_assert!(seen.insert(item.item_code.clone()));
            }
            prop_assert_eq!(codes.len(), supplied.len() + generated);
        }
    }
}
