//! HTTP handlers for inbound/outbound reports

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{CountComparison, DashboardData, DateWindow, ItemStatus, MonthlyTrend};

use crate::error::AppResult;
use crate::services::{ReportingService, StatusQuery, DEFAULT_TOP_ITEMS};
use crate::AppState;

/// Optional inclusive date range
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PeriodQuery {
    fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }
}

#[derive(Debug, Deserialize)]
pub struct TopItemsQuery {
    pub limit: Option<usize>,
}

/// Per-item status, optionally filtered by item code and date range
pub async fn get_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<Vec<ItemStatus>>> {
    let service = ReportingService::new(state.repos);
    let statuses = service.get_status(&query).await?;
    Ok(Json(statuses))
}

pub async fn get_status_by_item_code(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> AppResult<Json<ItemStatus>> {
    let service = ReportingService::new(state.repos);
    let status = service.get_status_by_item_code(&item_code).await?;
    Ok(Json(status))
}

/// Status report as a CSV download
pub async fn export_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.repos);
    let csv = service.export_status_csv(&query).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inbound_outbound_status.csv\"",
            ),
        ],
        csv,
    ))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<DashboardData>> {
    let service = ReportingService::new(state.repos);
    let dashboard = service.get_dashboard_data(query.window()).await?;
    Ok(Json(dashboard))
}

pub async fn get_monthly_trend(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<MonthlyTrend>>> {
    let service = ReportingService::new(state.repos);
    let trend = service.get_monthly_trend(query.window()).await?;
    Ok(Json(trend))
}

pub async fn get_count_comparison(
    State(state): State<AppState>,
) -> AppResult<Json<CountComparison>> {
    let service = ReportingService::new(state.repos);
    let comparison = service.get_count_comparison().await?;
    Ok(Json(comparison))
}

/// Top items by combined amount (default 10)
pub async fn get_top_items(
    State(state): State<AppState>,
    Query(query): Query<TopItemsQuery>,
) -> AppResult<Json<Vec<ItemStatus>>> {
    let service = ReportingService::new(state.repos);
    let items = service
        .get_top_items(query.limit.unwrap_or(DEFAULT_TOP_ITEMS))
        .await?;
    Ok(Json(items))
}
