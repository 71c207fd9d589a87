//! Shared test utilities for `PaintDesk`.
//!
//! This module provides record fixtures with sensible defaults, an in-memory
//! `SQLite` database, and a recorder for store deliveries.

#![allow(clippy::unwrap_used)]

use crate::{
    core::records::{ColorMixing, Customer, Document, Order, OrderStatus, OwnerId, Painter, Stock, Stored},
    entities::DocumentModel,
    errors::Result,
};
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::DatabaseConnection;
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all store tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Routes tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// An owner identity for tests.
pub fn owner(id: &str) -> OwnerId {
    OwnerId::new(id).unwrap()
}

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

/// Wraps a record as if the store had delivered it.
pub fn stored<R>(id: i64, record: R) -> Stored<R> {
    Stored {
        id,
        created_at: fixed_time(),
        updated_at: fixed_time(),
        record,
    }
}

/// Creates a test order with sensible defaults.
///
/// # Defaults
/// * `order_id`: "ORD-2024-001"
/// * `date`: 2024-01-15
/// * `customer_name`: "Ravi Kumar"
pub fn order(painter_name: &str, status: OrderStatus, amount: f64) -> Order {
    Order {
        order_id: "ORD-2024-001".to_string(),
        date: fixed_time().date(),
        customer_name: "Ravi Kumar".to_string(),
        painter_name: painter_name.to_string(),
        amount,
        status,
    }
}

/// Creates a test order on a given date, credited to "Alice" for 100.
pub fn order_on(order_id: &str, date: NaiveDate, status: OrderStatus) -> Order {
    Order {
        order_id: order_id.to_string(),
        date,
        ..order("Alice", status, 100.0)
    }
}

pub fn customer(name: &str) -> Customer {
    Customer {
        name: name.to_string(),
        contact: format!("{}@example.com", name.to_lowercase()),
        mobile_no: "9876543210".to_string(),
    }
}

pub fn painter(name: &str, contact: &str) -> Painter {
    Painter {
        name: name.to_string(),
        contact: contact.to_string(),
    }
}

/// Creates a test stock item in "White".
pub fn stock_item(product_name: &str, quantity: u32) -> Stock {
    Stock {
        product_name: product_name.to_string(),
        color: "White".to_string(),
        quantity,
    }
}

/// Creates a test mix of Blue and Black at 70/30, 2.5 liters.
pub fn mix(mix_name: &str, hex_code: &str) -> ColorMixing {
    ColorMixing {
        mix_name: mix_name.to_string(),
        hex_code: hex_code.to_string(),
        base_colors: vec!["Blue".to_string(), "Black".to_string()],
        ratios: vec![70.0, 30.0],
        quantity: 2.5,
    }
}

/// A raw painter document as the store would hold it.
pub fn painter_document(id: i64, owner_id: &str, name: &str) -> DocumentModel {
    DocumentModel {
        id,
        app_id: "app".to_string(),
        collection: Painter::COLLECTION.as_str().to_string(),
        owner_id: owner_id.to_string(),
        payload: serde_json::to_string(&painter(name, "555")).unwrap(),
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

/// Records every delivery made to a subscription callback.
pub struct Recorder<R> {
    deliveries: Arc<Mutex<Vec<Vec<Stored<R>>>>>,
}

impl<R: Document> Recorder<R> {
    pub fn new() -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A callback that appends each delivery to this recorder.
    pub fn callback(&self) -> impl Fn(Vec<Stored<R>>) + Send + Sync + 'static {
        let deliveries = Arc::clone(&self.deliveries);
        move |rows| deliveries.lock().unwrap().push(rows)
    }

    /// Number of deliveries so far.
    pub fn deliveries(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    /// The most recent delivery; empty if none.
    pub fn last(&self) -> Vec<Stored<R>> {
        self.deliveries
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

impl Recorder<Painter> {
    /// Painter names of the most recent delivery.
    pub fn last_names(&self) -> Vec<String> {
        self.last().into_iter().map(|p| p.record.name).collect()
    }
}
