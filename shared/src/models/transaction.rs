//! Inbound (receiving) and outbound (shipping) transaction models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `quantity * unit_price`, or `None` when it does not fit in a `Decimal`
pub fn line_amount(quantity: i32, unit_price: Decimal) -> Option<Decimal> {
    Decimal::from(quantity).checked_mul(unit_price)
}

/// A recorded stock-receiving transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    pub id: Uuid,
    pub inbound_date: NaiveDate,
    pub item_code: String,
    /// Copied from the request at creation time, never re-synced with the item
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub supplier: String,
    pub memo: String,
}

impl Inbound {
    /// Quantity times unit price; `None` when the product overflows
    pub fn amount(&self) -> Option<Decimal> {
        line_amount(self.quantity, self.unit_price)
    }
}

/// A recorded stock-shipping transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outbound {
    pub id: Uuid,
    pub outbound_date: NaiveDate,
    pub item_code: String,
    /// Copied from the request at creation time, never re-synced with the item
    pub item_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub customer: String,
    pub memo: String,
}

impl Outbound {
    /// Quantity times unit price; `None` when the product overflows
    pub fn amount(&self) -> Option<Decimal> {
        line_amount(self.quantity, self.unit_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_serializes_camel_case() {
        let inbound = Inbound {
            id: Uuid::nil(),
            inbound_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            item_code: "ITEM001".to_string(),
            item_name: "Bolt".to_string(),
            quantity: 4,
            unit_price: Decimal::new(250, 2),
            supplier: "Acme".to_string(),
            memo: String::new(),
        };

        let json = serde_json::to_value(&inbound).unwrap();
        assert_eq!(json["inboundDate"], "2024-05-02");
        assert_eq!(json["itemCode"], "ITEM001");
        assert_eq!(json["unitPrice"], "2.50");

        let back: Inbound = serde_json::from_value(json).unwrap();
        assert_eq!(back, inbound);
        assert_eq!(back.amount(), Some(Decimal::new(1000, 2)));
    }

    #[test]
    fn test_amount_overflow_is_none() {
        assert_eq!(line_amount(2, Decimal::MAX), None);
        assert_eq!(line_amount(1, Decimal::MAX), Some(Decimal::MAX));
        assert_eq!(line_amount(0, Decimal::MAX), Some(Decimal::ZERO));
    }
}
