//! Reporting tests
//!
//! Status, monthly trend, count comparison, top items, dashboard and CSV
//! export over a seeded transaction history.

use chrono::NaiveDate;
use inventory_backend::config::InventoryConfig;
use inventory_backend::AppError;
use inventory_backend::repository::Repositories;
use inventory_backend::services::{
    CreateInbound, CreateOutbound, InboundService, OutboundService, ReportingService,
    StatusQuery, StockLocks,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::DateWindow;

struct Ledger {
    inbound: InboundService,
    outbound: OutboundService,
    reports: ReportingService,
}

fn ledger() -> Ledger {
    let repos = Repositories::in_memory();
    let locks = StockLocks::new();
    let config = InventoryConfig::default();
    Ledger {
        inbound: InboundService::new(repos.clone(), locks.clone(), config.clone()),
        outbound: OutboundService::new(repos.clone(), locks, config),
        reports: ReportingService::new(repos),
    }
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

impl Ledger {
    async fn receive(&self, code: &str, name: &str, quantity: i32, price: i64, on: NaiveDate) {
        self.inbound
            .create(CreateInbound {
                inbound_date: Some(on),
                item_code: code.to_string(),
                item_name: name.to_string(),
                quantity,
                unit_price: Decimal::new(price, 0),
                supplier: "Acme".to_string(),
                memo: None,
            })
            .await
            .unwrap();
    }

    async fn ship(&self, code: &str, quantity: i32, price: i64, on: NaiveDate) {
        self.outbound
            .create(CreateOutbound {
                outbound_date: Some(on),
                item_code: code.to_string(),
                item_name: "shipped".to_string(),
                quantity,
                unit_price: Decimal::new(price, 0),
                customer: "Shop".to_string(),
                memo: None,
            })
            .await
            .unwrap();
    }
}

/// ITEM001: in 100@10 (Jan), in 50@10 (Mar), out 30@20 (Feb)
/// ITEM002: in 10@5 (Feb), out 10@7 (Mar)
async fn seeded() -> Ledger {
    let ledger = ledger();
    ledger.receive("ITEM001", "Widget", 100, 10, date(1, 10)).await;
    ledger.receive("ITEM002", "Bolt", 10, 5, date(2, 5)).await;
    ledger.ship("ITEM001", 30, 20, date(2, 20)).await;
    ledger.receive("ITEM001", "Widget (new)", 50, 10, date(3, 1)).await;
    ledger.ship("ITEM002", 10, 7, date(3, 15)).await;
    ledger
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_status_groups_by_item_code() {
        let ledger = seeded().await;
        let statuses = ledger.reports.get_status(&StatusQuery::default()).await.unwrap();

        assert_eq!(statuses.len(), 2);
        let widget = &statuses[0];
        assert_eq!(widget.item_code, "ITEM001");
        assert_eq!(widget.item_name, "Widget");
        assert_eq!(widget.total_inbound, 150);
        assert_eq!(widget.total_outbound, 30);
        assert_eq!(widget.net_stock, 120);
        assert_eq!(widget.total_inbound_amount, Decimal::new(1500, 0));
        assert_eq!(widget.total_outbound_amount, Decimal::new(600, 0));
        assert_eq!(widget.inbound_count, 2);
        assert_eq!(widget.outbound_count, 1);
        assert_eq!(widget.last_inbound_date, Some(date(3, 1)));
        assert_eq!(widget.last_outbound_date, Some(date(2, 20)));

        assert_eq!(statuses[1].item_code, "ITEM002");
        assert_eq!(statuses[1].net_stock, 0);
    }

    #[tokio::test]
    async fn test_status_date_filter_is_inclusive() {
        let ledger = seeded().await;
        let query = StatusQuery {
            item_code: None,
            start_date: Some(date(2, 5)),
            end_date: Some(date(3, 1)),
        };
        let statuses = ledger.reports.get_status(&query).await.unwrap();

        let widget = &statuses[0];
        assert_eq!(widget.total_inbound, 50);
        assert_eq!(widget.total_outbound, 30);
        assert_eq!(widget.item_name, "Widget (new)");

        let bolt = &statuses[1];
        assert_eq!(bolt.total_inbound, 10);
        assert_eq!(bolt.total_outbound, 0);
        assert_eq!(bolt.last_outbound_date, None);
    }

    #[tokio::test]
    async fn test_status_by_item_code() {
        let ledger = seeded().await;
        let status = ledger.reports.get_status_by_item_code("ITEM002").await.unwrap();
        assert_eq!(status.item_name, "Bolt");
        assert_eq!(status.total_outbound_amount, Decimal::new(70, 0));

        let empty = ledger.reports.get_status_by_item_code("ITEM404").await.unwrap();
        assert_eq!(empty.item_code, "ITEM404");
        assert_eq!(empty.item_name, "");
        assert_eq!(empty.inbound_count, 0);
        assert_eq!(empty.total_inbound_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_monthly_trend() {
        let ledger = seeded().await;
        let trend = ledger
            .reports
            .get_monthly_trend(DateWindow::unbounded())
            .await
            .unwrap();

        let months: Vec<_> = trend.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(trend[1].inbound_amount, Decimal::new(50, 0));
        assert_eq!(trend[1].outbound_amount, Decimal::new(600, 0));
        assert_eq!(trend[2].inbound_quantity, 50);
        assert_eq!(trend[2].outbound_quantity, 10);

        let march = ledger
            .reports
            .get_monthly_trend(DateWindow::new(Some(date(3, 1)), None))
            .await
            .unwrap();
        assert_eq!(march.len(), 1);
    }

    #[tokio::test]
    async fn test_count_comparison() {
        let ledger = seeded().await;
        let comparison = ledger.reports.get_count_comparison().await.unwrap();

        assert_eq!(comparison.inbound_count, 3);
        assert_eq!(comparison.outbound_count, 2);
        assert_eq!(comparison.inbound_percentage, 60.0);
        assert_eq!(comparison.outbound_percentage, 40.0);
    }

    #[tokio::test]
    async fn test_count_comparison_without_transactions_is_zero() {
        let ledger = ledger();
        let comparison = ledger.reports.get_count_comparison().await.unwrap();

        assert_eq!(comparison.inbound_count, 0);
        assert_eq!(comparison.outbound_count, 0);
        assert_eq!(comparison.inbound_percentage, 0.0);
        assert_eq!(comparison.outbound_percentage, 0.0);
    }

    #[tokio::test]
    async fn test_top_items_ranked_by_total_amount() {
        let ledger = seeded().await;
        let top = ledger.reports.get_top_items(10).await.unwrap();
        let codes: Vec<_> = top.iter().map(|s| s.item_code.as_str()).collect();
        assert_eq!(codes, vec!["ITEM001", "ITEM002"]);

        let first = ledger.reports.get_top_items(1).await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].total_amount(), Decimal::new(2100, 0));
    }

    #[tokio::test]
    async fn test_dashboard_filters_only_the_trend() {
        let ledger = seeded().await;
        let dashboard = ledger
            .reports
            .get_dashboard_data(DateWindow::new(Some(date(3, 1)), Some(date(3, 31))))
            .await
            .unwrap();

        assert_eq!(dashboard.monthly_trend.len(), 1);
        assert_eq!(dashboard.count_comparison.inbound_count, 3);
        assert_eq!(dashboard.top_items.len(), 2);
    }

    #[tokio::test]
    async fn test_oversized_amounts_return_errors_instead_of_panicking() {
        let ledger = ledger();
        let at_max_price = |quantity| CreateInbound {
            inbound_date: Some(date(1, 1)),
            item_code: "ITEM001".to_string(),
            item_name: "Widget".to_string(),
            quantity,
            unit_price: Decimal::MAX,
            supplier: "Acme".to_string(),
            memo: None,
        };

        let err = ledger.inbound.create(at_max_price(2)).await.unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.reports.get_status(&StatusQuery::default()).await.unwrap().is_empty());

        // Each amount fits on its own; their sum does not
        ledger.inbound.create(at_max_price(1)).await.unwrap();
        ledger.inbound.create(at_max_price(1)).await.unwrap();

        let status = ledger.reports.get_status(&StatusQuery::default()).await;
        assert!(matches!(status, Err(AppError::Internal(_))));
        assert!(ledger.reports.get_top_items(10).await.is_err());
        assert!(ledger
            .reports
            .get_monthly_trend(DateWindow::unbounded())
            .await
            .is_err());
        assert!(ledger
            .reports
            .get_dashboard_data(DateWindow::unbounded())
            .await
            .is_err());
        assert!(ledger
            .reports
            .export_status_csv(&StatusQuery::default())
            .await
            .is_err());
        assert_eq!(ledger.reports.get_count_comparison().await.unwrap().inbound_count, 2);
    }

    #[tokio::test]
    async fn test_export_status_csv() {
        let ledger = seeded().await;
        let csv = ledger
            .reports
            .export_status_csv(&StatusQuery::for_item("ITEM002"))
            .await
            .unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("itemCode,itemName,"));
        assert!(lines[1].starts_with("ITEM002,Bolt,10,10,50,70,0,1,1,"));
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

        /// Percentages of a non-empty history add up to 100 (within rounding)
        #[test]
        fn prop_count_percentages_sum_to_100(
            receipts in 1usize..10,
            shipments in 0usize..10
        ) {
            let comparison = tokio_test::block_on(async {
                let ledger = ledger();
                for _ in 0..receipts {
                    ledger.receive("ITEM001", "Widget", 100, 1, date(1, 1)).await;
                }
                for _ in 0..shipments {
                    ledger.ship("ITEM001", 1, 1, date(1, 2)).await;
                }
                ledger.reports.get_count_comparison().await.unwrap()
            });

            prop_assert_eq!(comparison.inbound_count, receipts as u64);
            prop_assert_eq!(comparison.outbound_count, shipments as u64);
            let total = comparison.inbound_percentage + comparison.outbound_percentage;
            prop_assert!((total - 100.0).abs() <= 0.011);
        }
    }
}
