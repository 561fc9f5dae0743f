//! Route definitions for the inventory API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/items", item_routes())
        .nest("/inventory", inventory_routes())
        .nest("/inbound", inbound_routes())
        .nest("/outbound", outbound_routes())
        .nest("/warehouses", warehouse_routes())
        .nest("/users", user_routes())
        .nest("/inbound-outbound", report_routes())
}

/// Item catalog routes
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route(
            "/:id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory).post(handlers::create_inventory),
        )
        .route("/low-stock", get(handlers::list_low_stock))
        .route("/item/:item_code", get(handlers::get_inventory_by_item_code))
        .route(
            "/:id",
            get(handlers::get_inventory)
                .put(handlers::update_inventory)
                .delete(handlers::delete_inventory),
        )
}

/// Inbound transaction routes
fn inbound_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_inbound).post(handlers::create_inbound))
        .route(
            "/:id",
            get(handlers::get_inbound)
                .put(handlers::update_inbound)
                .delete(handlers::delete_inbound),
        )
}

/// Outbound transaction routes
fn outbound_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_outbound).post(handlers::create_outbound),
        )
        .route(
            "/:id",
            get(handlers::get_outbound)
                .put(handlers::update_outbound)
                .delete(handlers::delete_outbound),
        )
}

/// Warehouse routes
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_warehouses).post(handlers::create_warehouse),
        )
        .route(
            "/:id",
            get(handlers::get_warehouse)
                .put(handlers::update_warehouse)
                .delete(handlers::delete_warehouse),
        )
}

/// User directory routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
}

/// Reporting routes (read-only)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(handlers::get_status))
        .route("/status/export", get(handlers::export_status))
        .route("/status/:item_code", get(handlers::get_status_by_item_code))
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/monthly-trend", get(handlers::get_monthly_trend))
        .route("/count-comparison", get(handlers::get_count_comparison))
        .route("/top-items", get(handlers::get_top_items))
}
