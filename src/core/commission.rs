//! Painter commission calculation.
//!
//! Orders carry the painter's *name*, not an id, so commissions are joined
//! on exact, case-sensitive name equality. Two painters sharing a name share
//! one commission total.

use crate::core::{
    records::{Order, OrderStatus, Painter, Stored},
    table::{CellKind, ColumnKey, Row, Value},
};

/// Commission earned on a single order amount.
#[must_use]
pub fn compute_commission(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Sum of commissions over the completed orders attributed to `painter_name`.
#[must_use]
pub fn total_commissions(painter_name: &str, orders: &[Stored<Order>], rate: f64) -> f64 {
    orders
        .iter()
        .filter(|order| order.painter_name == painter_name)
        .filter(|order| order.status == OrderStatus::Completed)
        .map(|order| compute_commission(order.amount, rate))
        .sum()
}

/// A stored painter with its derived commission total.
#[derive(Debug, Clone, PartialEq)]
pub struct PainterRow {
    pub painter: Stored<Painter>,
    pub total_commissions: f64,
}

/// Derives a row per painter, preserving delivery order.
#[must_use]
pub fn painters_with_commissions(
    painters: &[Stored<Painter>],
    orders: &[Stored<Order>],
    rate: f64,
) -> Vec<PainterRow> {
    painters
        .iter()
        .map(|painter| PainterRow {
            total_commissions: total_commissions(&painter.name, orders, rate),
            painter: painter.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainterField {
    Name,
    Contact,
    TotalCommissions,
}

impl ColumnKey for PainterField {
    fn cell_kind(self) -> CellKind {
        match self {
            Self::TotalCommissions => CellKind::Money,
            Self::Name | Self::Contact => CellKind::Plain,
        }
    }
}

impl Row for PainterRow {
    type Field = PainterField;

    fn value(&self, field: PainterField) -> Value {
        match field {
            PainterField::Name => (&self.painter.name).into(),
            PainterField::Contact => (&self.painter.contact).into(),
            PainterField::TotalCommissions => self.total_commissions.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{order, painter, stored};

    #[test]
    fn test_compute_commission() {
        assert!((compute_commission(100.0, 0.10) - 10.0).abs() < 1e-9);
        assert_eq!(compute_commission(0.0, 0.10), 0.0);
        assert_eq!(compute_commission(250.0, 0.0), 0.0);
        assert_eq!(compute_commission(80.0, 0.25), 20.0);
    }

    #[test]
    fn test_only_completed_orders_count() {
        let orders = vec![
            stored(1, order("Alice", OrderStatus::Completed, 100.0)),
            stored(2, order("Alice", OrderStatus::Pending, 50.0)),
        ];
        let total = total_commissions("Alice", &orders, 0.10);
        assert!((total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_name_match_is_exact() {
        let orders = vec![
            stored(1, order("alice", OrderStatus::Completed, 100.0)),
            stored(2, order("Alice ", OrderStatus::Completed, 100.0)),
            stored(3, order("Bob", OrderStatus::Completed, 100.0)),
        ];
        assert_eq!(total_commissions("Alice", &orders, 0.10), 0.0);
    }

    #[test]
    fn test_painter_without_orders_earns_nothing() {
        assert_eq!(total_commissions("Alice", &[], 0.10), 0.0);
    }

    #[test]
    fn test_duplicate_names_share_commissions() {
        let painters = vec![
            stored(1, painter("Alice", "555-0101")),
            stored(2, painter("Alice", "555-0199")),
        ];
        let orders = vec![stored(3, order("Alice", OrderStatus::Completed, 200.0))];

        let rows = painters_with_commissions(&painters, &orders, 0.10);
        assert_eq!(rows.len(), 2);
        assert!((rows[0].total_commissions - 20.0).abs() < 1e-9);
        assert!((rows[1].total_commissions - 20.0).abs() < 1e-9);
        assert_eq!(rows[1].painter.contact, "555-0199");
    }

    #[test]
    fn test_painter_row_fields() {
        let rows = painters_with_commissions(
            &[stored(1, painter("Bob", "bob@example.com"))],
            &[stored(2, order("Bob", OrderStatus::Completed, 40.0))],
            0.5,
        );
        assert_eq!(rows[0].value(PainterField::Name), Value::from("Bob"));
        assert_eq!(rows[0].value(PainterField::TotalCommissions), Value::Number(20.0));
    }
}
