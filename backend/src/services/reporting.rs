//! Reporting over inbound/outbound history
//!
//! Read-only. Every report is computed from a scan of the transaction
//! records; no stock locks are taken.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    month_key, CountComparison, DashboardData, DateWindow, Inbound, ItemStatus, MonthlyTrend,
    Outbound,
};

use crate::error::{AppError, AppResult};
use crate::repository::{RecordFilter, Repositories};

/// Number of items returned by the top-items report when no limit is given
pub const DEFAULT_TOP_ITEMS: usize = 10;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    repos: Repositories,
}

/// Filters for the status report. Dates are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuery {
    pub item_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl StatusQuery {
    pub fn for_item(item_code: impl Into<String>) -> Self {
        Self {
            item_code: Some(item_code.into()),
            ..Self::default()
        }
    }

    fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }

    fn filter(&self) -> RecordFilter {
        RecordFilter {
            item_code: self.item_code.clone(),
            window: self.window(),
        }
    }
}

/// Add one transaction amount to a running total
fn accumulate(total: &mut Decimal, amount: Option<Decimal>, item_code: &str) -> AppResult<()> {
    *total = amount
        .and_then(|amount| total.checked_add(amount))
        .ok_or_else(|| AppError::Internal(format!("Transaction amount for {} is out of range", item_code)))?;
    Ok(())
}

/// Fold transactions into per-item totals, ordered by item code.
///
/// Inbound rows are visited first, so the item name comes from the first
/// inbound row when there is one.
fn aggregate_status(inbounds: &[Inbound], outbounds: &[Outbound]) -> AppResult<Vec<ItemStatus>> {
    let mut by_code: BTreeMap<&str, ItemStatus> = BTreeMap::new();

    for inbound in inbounds {
        let status = by_code
            .entry(inbound.item_code.as_str())
            .or_insert_with(|| ItemStatus {
                item_name: inbound.item_name.clone(),
                ..ItemStatus::empty(inbound.item_code.clone())
            });
        status.total_inbound += i64::from(inbound.quantity);
        accumulate(&mut status.total_inbound_amount, inbound.amount(), &inbound.item_code)?;
        status.inbound_count += 1;
        status.last_inbound_date = status.last_inbound_date.max(Some(inbound.inbound_date));
    }

    for outbound in outbounds {
        let status = by_code
            .entry(outbound.item_code.as_str())
            .or_insert_with(|| ItemStatus {
                item_name: outbound.item_name.clone(),
                ..ItemStatus::empty(outbound.item_code.clone())
            });
        status.total_outbound += i64::from(outbound.quantity);
        accumulate(&mut status.total_outbound_amount, outbound.amount(), &outbound.item_code)?;
        status.outbound_count += 1;
        status.last_outbound_date = status.last_outbound_date.max(Some(outbound.outbound_date));
    }

    Ok(by_code
        .into_values()
        .map(|mut status| {
            status.net_stock = status.total_inbound - status.total_outbound;
            status
        })
        .collect())
}

/// Bucket transaction amounts and quantities by `YYYY-MM`, ascending
fn aggregate_monthly(inbounds: &[Inbound], outbounds: &[Outbound]) -> AppResult<Vec<MonthlyTrend>> {
    let mut by_month: BTreeMap<String, MonthlyTrend> = BTreeMap::new();

    for inbound in inbounds {
        let month = month_key(inbound.inbound_date);
        let trend = by_month
            .entry(month.clone())
            .or_insert_with(|| MonthlyTrend::new(month));
        accumulate(&mut trend.inbound_amount, inbound.amount(), &inbound.item_code)?;
        trend.inbound_quantity += i64::from(inbound.quantity);
    }

    for outbound in outbounds {
        let month = month_key(outbound.outbound_date);
        let trend = by_month
            .entry(month.clone())
            .or_insert_with(|| MonthlyTrend::new(month));
        accumulate(&mut trend.outbound_amount, outbound.amount(), &outbound.item_code)?;
        trend.outbound_quantity += i64::from(outbound.quantity);
    }

    Ok(by_month.into_values().collect())
}

/// Rank by combined amount, highest first; ties by item code
fn rank_top_items(mut statuses: Vec<ItemStatus>, limit: usize) -> Vec<ItemStatus> {
    statuses.sort_by(|a, b| {
        b.total_amount()
            .cmp(&a.total_amount())
            .then_with(|| a.item_code.cmp(&b.item_code))
    });
    statuses.truncate(limit);
    statuses
}

impl ReportingService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn transactions(&self, filter: &RecordFilter) -> AppResult<(Vec<Inbound>, Vec<Outbound>)> {
        tokio::try_join!(
            self.repos.inbounds.find_all(filter),
            self.repos.outbounds.find_all(filter)
        )
    }

    /// Per-item inbound/outbound totals
    pub async fn get_status(&self, query: &StatusQuery) -> AppResult<Vec<ItemStatus>> {
        let (inbounds, outbounds) = self.transactions(&query.filter()).await?;
        tracing::debug!(
            inbound_rows = inbounds.len(),
            outbound_rows = outbounds.len(),
            "Aggregating item status"
        );
        aggregate_status(&inbounds, &outbounds)
    }

    /// Status for one item code; zeroed when it has no transactions
    pub async fn get_status_by_item_code(&self, item_code: &str) -> AppResult<ItemStatus> {
        let statuses = self.get_status(&StatusQuery::for_item(item_code)).await?;
        Ok(statuses
            .into_iter()
            .next()
            .unwrap_or_else(|| ItemStatus::empty(item_code)))
    }

    pub async fn get_monthly_trend(&self, window: DateWindow) -> AppResult<Vec<MonthlyTrend>> {
        let filter = RecordFilter::all().with_window(window);
        let (inbounds, outbounds) = self.transactions(&filter).await?;
        aggregate_monthly(&inbounds, &outbounds)
    }

    /// Transaction counts over all history
    pub async fn get_count_comparison(&self) -> AppResult<CountComparison> {
        let (inbounds, outbounds) = self.transactions(&RecordFilter::all()).await?;
        Ok(CountComparison::from_counts(
            inbounds.len() as u64,
            outbounds.len() as u64,
        ))
    }

    /// Items with the largest combined amount over all history
    pub async fn get_top_items(&self, limit: usize) -> AppResult<Vec<ItemStatus>> {
        let statuses = self.get_status(&StatusQuery::default()).await?;
        Ok(rank_top_items(statuses, limit))
    }

    /// Monthly trend for the window plus all-history counts and top items
    pub async fn get_dashboard_data(&self, window: DateWindow) -> AppResult<DashboardData> {
        let (monthly_trend, count_comparison, top_items) = tokio::try_join!(
            self.get_monthly_trend(window),
            self.get_count_comparison(),
            self.get_top_items(DEFAULT_TOP_ITEMS)
        )?;

        Ok(DashboardData {
            monthly_trend,
            count_comparison,
            top_items,
        })
    }

    /// Status report as CSV with a header row
    pub async fn export_status_csv(&self, query: &StatusQuery) -> AppResult<String> {
        let statuses = self.get_status(query).await?;
        Self::export_to_csv(&statuses)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}
