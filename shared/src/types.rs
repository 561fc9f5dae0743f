//! Common types used across the backend

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-date window; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Window with both bounds open
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_unbounded_window_contains_everything() {
        let window = DateWindow::unbounded();
        assert!(window.contains(date(1999, 1, 1)));
        assert!(window.contains(date(2100, 12, 31)));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let window = DateWindow::new(Some(date(2024, 3, 1)), Some(date(2024, 3, 31)));
        assert!(window.contains(date(2024, 3, 1)));
        assert!(window.contains(date(2024, 3, 31)));
        assert!(!window.contains(date(2024, 2, 29)));
        assert!(!window.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_half_open_window() {
        let window = DateWindow::new(Some(date(2024, 3, 1)), None);
        assert!(window.contains(date(2030, 1, 1)));
        assert!(!window.contains(date(2024, 2, 1)));
    }
}
