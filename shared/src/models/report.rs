//! Read-only report payloads derived from transaction history

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inbound/outbound totals for one item code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatus {
    pub item_code: String,
    pub item_name: String,
    pub total_inbound: i64,
    pub total_outbound: i64,
    pub total_inbound_amount: Decimal,
    pub total_outbound_amount: Decimal,
    /// `total_inbound - total_outbound` over the filtered window only
    pub net_stock: i64,
    pub inbound_count: u64,
    pub outbound_count: u64,
    pub last_inbound_date: Option<NaiveDate>,
    pub last_outbound_date: Option<NaiveDate>,
}

impl ItemStatus {
    /// A zeroed status for an item code with no transactions
    pub fn empty(item_code: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: String::new(),
            total_inbound: 0,
            total_outbound: 0,
            total_inbound_amount: Decimal::ZERO,
            total_outbound_amount: Decimal::ZERO,
            net_stock: 0,
            inbound_count: 0,
            outbound_count: 0,
            last_inbound_date: None,
            last_outbound_date: None,
        }
    }

    /// Combined inbound and outbound amount, used for ranking.
    /// Saturates at `Decimal::MAX`.
    pub fn total_amount(&self) -> Decimal {
        self.total_inbound_amount
            .saturating_add(self.total_outbound_amount)
    }
}

/// Amounts moved in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    pub inbound_amount: Decimal,
    pub outbound_amount: Decimal,
    pub inbound_quantity: i64,
    pub outbound_quantity: i64,
}

impl MonthlyTrend {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            inbound_amount: Decimal::ZERO,
            outbound_amount: Decimal::ZERO,
            inbound_quantity: 0,
            outbound_quantity: 0,
        }
    }
}

/// Share of inbound vs outbound transaction counts across all history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountComparison {
    pub inbound_count: u64,
    pub outbound_count: u64,
    pub inbound_percentage: f64,
    pub outbound_percentage: f64,
}

impl CountComparison {
    /// Build from raw counts; percentages are rounded to two decimals and
    /// are both zero when there are no transactions at all
    pub fn from_counts(inbound_count: u64, outbound_count: u64) -> Self {
        let total = inbound_count + outbound_count;
        let share = |count: u64| {
            if total == 0 {
                0.0
            } else {
                (count as f64 / total as f64 * 10_000.0).round() / 100.0
            }
        };

        Self {
            inbound_count,
            outbound_count,
            inbound_percentage: share(inbound_count),
            outbound_percentage: share(outbound_count),
        }
    }
}

/// Combined dashboard payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Filtered by the requested date window
    pub monthly_trend: Vec<MonthlyTrend>,
    /// All history
    pub count_comparison: CountComparison,
    /// All history
    pub top_items: Vec<ItemStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_comparison_zero_total() {
        let comparison = CountComparison::from_counts(0, 0);
        assert_eq!(comparison.inbound_count, 0);
        assert_eq!(comparison.outbound_count, 0);
        assert_eq!(comparison.inbound_percentage, 0.0);
        assert_eq!(comparison.outbound_percentage, 0.0);
    }

    #[test]
    fn test_count_comparison_rounding() {
        let comparison = CountComparison::from_counts(1, 2);
        assert_eq!(comparison.inbound_percentage, 33.33);
        assert_eq!(comparison.outbound_percentage, 66.67);
    }

    #[test]
    fn test_empty_status_is_zeroed() {
        let status = ItemStatus::empty("ITEM009");
        assert_eq!(status.item_code, "ITEM009");
        assert!(status.item_name.is_empty());
        assert_eq!(status.total_amount(), Decimal::ZERO);
        assert_eq!(status.last_inbound_date, None);
    }

    #[test]
    fn test_total_amount_saturates() {
        let mut status = ItemStatus::empty("ITEM001");
        status.total_inbound_amount = Decimal::MAX;
        status.total_outbound_amount = Decimal::ONE;
        assert_eq!(status.total_amount(), Decimal::MAX);
    }
}
