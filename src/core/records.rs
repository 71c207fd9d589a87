//! Domain records - the five record shapes the shop keeps.
//!
//! Records are plain data. The store wraps each one in a [`Stored`] envelope
//! carrying its generated id and timestamps; nothing in the core ever
//! modifies a stored record in place.

use crate::errors::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;

/// The collections a workspace subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Customer orders
    Orders,
    /// Customer contacts
    Customers,
    /// Painters who earn commissions
    Painters,
    /// Stock items on the shelf
    Stock,
    /// Custom color mixes
    Mixing,
}

impl Collection {
    /// All collections, in dashboard order.
    pub const ALL: [Self; 5] = [
        Self::Orders,
        Self::Customers,
        Self::Painters,
        Self::Stock,
        Self::Mixing,
    ];

    /// The collection's name in the document store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Customers => "customers",
            Self::Painters => "painters",
            Self::Stock => "stock",
            Self::Mixing => "mixing",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical location of a collection, `artifacts/{app}/users/{owner}/{collection}`.
#[must_use]
pub fn collection_path(app_id: &str, owner: &OwnerId, collection: Collection) -> String {
    format!("artifacts/{app_id}/users/{owner}/{collection}")
}

/// The authenticated actor whose records are viewed and written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(String);

impl OwnerId {
    /// Wraps an owner identity.
    ///
    /// # Errors
    /// Returns `Error::Unauthenticated` for a blank identity.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::Unauthenticated);
        }
        Ok(Self(id))
    }

    /// The raw identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record type that lives in one collection of the document store.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection holding records of this type.
    const COLLECTION: Collection;
}

/// A record as delivered by the store: the record plus its store-assigned metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<R> {
    /// Identifier generated by the store
    pub id: i64,
    /// When the store accepted the write
    pub created_at: NaiveDateTime,
    /// When the record was last replaced
    pub updated_at: NaiveDateTime,
    /// The record itself
    pub record: R,
}

impl<R> std::ops::Deref for Stored<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

/// Progress of an order through the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Received, not started
    Pending,
    /// Paint is being mixed
    Mixing,
    /// Delivered; counts toward painter commissions
    Completed,
}

impl OrderStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Mixing, Self::Completed];

    /// Display label, identical to the stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Mixing => "Mixing",
            Self::Completed => "Completed",
        }
    }

    /// Parses an exact status label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == label)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer order, attributed to a painter by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Shop reference code (e.g., "ORD-2024-001")
    pub order_id: String,
    /// Order date
    pub date: NaiveDate,
    /// Customer the order is for
    pub customer_name: String,
    /// Painter credited with the order
    pub painter_name: String,
    /// Order value in dollars
    pub amount: f64,
    /// Current status
    pub status: OrderStatus,
}

impl Document for Order {
    const COLLECTION: Collection = Collection::Orders;
}

/// A customer contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub contact: String,
    pub mobile_no: String,
}

impl Document for Customer {
    const COLLECTION: Collection = Collection::Customers;
}

/// A painter. Commission totals are derived from orders, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painter {
    pub name: String,
    pub contact: String,
}

impl Document for Painter {
    const COLLECTION: Collection = Collection::Painters;
}

/// A stock item. Its status is derived from `quantity`, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub product_name: String,
    pub color: String,
    /// Units on the shelf
    pub quantity: u32,
}

impl Document for Stock {
    const COLLECTION: Collection = Collection::Stock;
}

/// A logged custom color mix.
///
/// `base_colors[i]` is mixed at `ratios[i]`; the two lists are expected to
/// have the same length but this is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorMixing {
    pub mix_name: String,
    /// Preview color, e.g. "#000080"
    pub hex_code: String,
    pub base_colors: Vec<String>,
    pub ratios: Vec<f64>,
    /// Liters mixed
    pub quantity: f64,
}

impl Document for ColorMixing {
    const COLLECTION: Collection = Collection::Mixing;
}
