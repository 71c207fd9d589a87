//! Dashboard counters.
//!
//! The six numbers on the dashboard are a pure function of the latest
//! snapshot of four collections. Nothing is cached between calls.

use crate::core::{
    records::{Customer, Order, OrderStatus, Painter, Stock, Stored},
    stock::classify_stock_status,
};

/// The dashboard's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub total_customers: usize,
    pub total_painters: usize,
    pub total_stock: usize,
    /// Stock items that are low or out of stock
    pub low_stock_count: usize,
    pub completed_orders_count: usize,
}

/// Visual emphasis of a dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Neutral,
    Warning,
    Success,
}

/// One dashboard card: a titled counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: usize,
    pub tone: CardTone,
}

impl DashboardStats {
    /// The counters as cards, in display order.
    #[must_use]
    pub const fn cards(&self) -> [StatCard; 6] {
        [
            StatCard {
                title: "Total Orders",
                value: self.total_orders,
                tone: CardTone::Neutral,
            },
            StatCard {
                title: "Total Customers",
                value: self.total_customers,
                tone: CardTone::Neutral,
            },
            StatCard {
                title: "Total Painters",
                value: self.total_painters,
                tone: CardTone::Neutral,
            },
            StatCard {
                title: "Stock Items",
                value: self.total_stock,
                tone: CardTone::Neutral,
            },
            StatCard {
                title: "Low Stock Alerts",
                value: self.low_stock_count,
                tone: CardTone::Warning,
            },
            StatCard {
                title: "Completed Orders",
                value: self.completed_orders_count,
                tone: CardTone::Success,
            },
        ]
    }
}

/// Aggregates the dashboard counters.
#[must_use]
pub fn compute_dashboard_stats(
    orders: &[Stored<Order>],
    customers: &[Stored<Customer>],
    painters: &[Stored<Painter>],
    stock: &[Stored<Stock>],
    low_stock_threshold: u32,
) -> DashboardStats {
    DashboardStats {
        total_orders: orders.len(),
        total_customers: customers.len(),
        total_painters: painters.len(),
        total_stock: stock.len(),
        low_stock_count: stock
            .iter()
            .filter(|item| classify_stock_status(item.quantity, low_stock_threshold).needs_attention())
            .count(),
        completed_orders_count: orders
            .iter()
            .filter(|order| order.status == OrderStatus::Completed)
            .count(),
    }
}
