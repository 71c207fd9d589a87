//! Stock status classification.
//!
//! A stock item's status is never stored; it is recomputed from the item's
//! quantity and the configured low-stock threshold every time the stock
//! collection changes.

use crate::core::{
    records::{Stock, Stored},
    table::{CellKind, ColumnKey, Row, Value},
};
use std::fmt;

/// Derived availability of a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }

    /// Whether this status should raise a low-stock alert.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::LowStock | Self::OutOfStock)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a quantity against the low-stock threshold.
///
/// - `0` is "Out of Stock"
/// - `1..=threshold` is "Low Stock"
/// - anything above is "In Stock"
#[must_use]
pub const fn classify_stock_status(quantity: u32, threshold: u32) -> StockStatus {
    if quantity == 0 {
        StockStatus::OutOfStock
    } else if quantity <= threshold {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// A stored stock item with its derived status.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRow {
    pub item: Stored<Stock>,
    pub status: StockStatus,
}

/// Derives a row per stock item, preserving delivery order.
#[must_use]
pub fn stock_with_status(stock: &[Stored<Stock>], threshold: u32) -> Vec<StockRow> {
    stock
        .iter()
        .map(|item| StockRow {
            status: classify_stock_status(item.quantity, threshold),
            item: item.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockField {
    ProductName,
    Color,
    Quantity,
    Status,
}

impl ColumnKey for StockField {
    fn cell_kind(self) -> CellKind {
        match self {
            Self::Status => CellKind::Status,
            Self::ProductName | Self::Color | Self::Quantity => CellKind::Plain,
        }
    }
}

impl Row for StockRow {
    type Field = StockField;

    fn value(&self, field: StockField) -> Value {
        match field {
            StockField::ProductName => (&self.item.product_name).into(),
            StockField::Color => (&self.item.color).into(),
            StockField::Quantity => self.item.quantity.into(),
            StockField::Status => self.status.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::stored;

    #[test]
    fn test_zero_is_out_of_stock() {
        assert_eq!(classify_stock_status(0, 10), StockStatus::OutOfStock);
        assert_eq!(classify_stock_status(0, 0), StockStatus::OutOfStock);
    }

    #[test]
    fn test_low_stock_boundary_is_inclusive() {
        assert_eq!(classify_stock_status(1, 10), StockStatus::LowStock);
        assert_eq!(classify_stock_status(10, 10), StockStatus::LowStock);
        assert_eq!(classify_stock_status(11, 10), StockStatus::InStock);
    }

    #[test]
    fn test_zero_threshold_has_no_low_band() {
        assert_eq!(classify_stock_status(1, 0), StockStatus::InStock);
    }

    #[test]
    fn test_exhaustive_small_range() {
        for threshold in 0..15 {
            for quantity in 0..30 {
                let status = classify_stock_status(quantity, threshold);
                let expected = if quantity == 0 {
                    StockStatus::OutOfStock
                } else if quantity <= threshold {
                    StockStatus::LowStock
                } else {
                    StockStatus::InStock
                };
                assert_eq!(status, expected, "q={quantity} t={threshold}");
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(StockStatus::InStock.to_string(), "In Stock");
        assert_eq!(StockStatus::LowStock.to_string(), "Low Stock");
        assert_eq!(StockStatus::OutOfStock.to_string(), "Out of Stock");
        assert!(StockStatus::LowStock.needs_attention());
        assert!(StockStatus::OutOfStock.needs_attention());
        assert!(!StockStatus::InStock.needs_attention());
    }

    #[test]
    fn test_stock_with_status_preserves_order() {
        let items = vec![
            stored(1, Stock {
                product_name: "Enamel".to_string(),
                color: "Red".to_string(),
                quantity: 40,
            }),
            stored(2, Stock {
                product_name: "Primer".to_string(),
                color: "White".to_string(),
                quantity: 0,
            }),
        ];

        let rows = stock_with_status(&items, 10);
        assert_eq!(rows[0].item.id, 1);
        assert_eq!(rows[0].status, StockStatus::InStock);
        assert_eq!(rows[1].status, StockStatus::OutOfStock);
        assert_eq!(rows[1].value(StockField::Status), Value::from("Out of Stock"));
    }
}
