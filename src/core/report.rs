//! Report generation business logic.
//!
//! A report is a named dataset drawn from the latest snapshot, narrowed by an
//! optional inclusive date window and then by the usual table search. Rows
//! without a date are never filtered out by the window.

use crate::core::{
    commission::PainterField,
    screens::{MixField, OrderField, mixing_columns, order_columns, painter_columns, stock_columns},
    stock::StockField,
    table::{Row, TableView},
    workspace::Snapshot,
};
use chrono::NaiveDate;

/// The reports the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Orders,
    Mixing,
    Painters,
    Inventory,
}

impl ReportKind {
    pub const ALL: [Self; 4] = [Self::Orders, Self::Mixing, Self::Painters, Self::Inventory];

    /// Stable identifier of the report.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Mixing => "mixing",
            Self::Painters => "painters",
            Self::Inventory => "inventory",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Orders => "Customer Orders Report",
            Self::Mixing => "Color Mixing Report",
            Self::Painters => "Painter Commission Report",
            Self::Inventory => "Inventory Report",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Orders => "Generate a detailed report of all orders.",
            Self::Mixing => "See a history of all custom color mixes.",
            Self::Painters => "Track commissions and their assignments.",
            Self::Inventory => "Detailed breakdown of all stock levels.",
        }
    }

    /// Looks a report up by its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

/// An inclusive date window; an open end does not constrain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Whether neither end is set.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a row with this date belongs in the window.
    ///
    /// Undated rows always do.
    #[must_use]
    pub fn admits(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Keeps the rows that fall inside `window`, preserving order.
pub fn filter_by_date<'a, R: Row + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
    window: &DateWindow,
) -> Vec<&'a R> {
    rows.into_iter()
        .filter(|row| window.admits(row.date()))
        .collect()
}

/// A generated report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub window: DateWindow,
    pub table: TableView,
}

/// Builds a report from the latest snapshot.
#[must_use]
pub fn build_report(kind: ReportKind, snapshot: &Snapshot, window: &DateWindow, query: &str) -> Report {
    let table = match kind {
        ReportKind::Orders => TableView::build(
            filter_by_date(&snapshot.orders, window),
            &order_columns(),
            &[
                OrderField::OrderId,
                OrderField::CustomerName,
                OrderField::PainterName,
                OrderField::Status,
            ],
            query,
        ),
        ReportKind::Mixing => TableView::build(
            filter_by_date(&snapshot.mixing, window),
            &mixing_columns(),
            &[MixField::MixName, MixField::HexCode, MixField::BaseColors],
            query,
        ),
        ReportKind::Painters => TableView::build(
            filter_by_date(&snapshot.painter_rows, window),
            &painter_columns(),
            &[PainterField::Name, PainterField::Contact],
            query,
        ),
        ReportKind::Inventory => TableView::build(
            filter_by_date(&snapshot.stock_rows, window),
            &stock_columns(),
            &[StockField::ProductName, StockField::Color, StockField::Status],
            query,
        ),
    };

    Report {
        kind,
        window: *window,
        table,
    }
}
