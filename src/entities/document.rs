//! Document entity - One stored record of any collection.
//!
//! The dashboard's records live in a document store: every row belongs to an
//! application, a collection (`orders`, `stock`, ...) and an owner, and carries
//! the record itself as a JSON payload. Ids and timestamps are assigned here,
//! at the store boundary, never by the caller.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Generated identifier, increasing in insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Application id scoping the whole document tree
    pub app_id: String,
    /// Collection name (e.g., "orders", "mixing")
    pub collection: String,
    /// Owner identity the document belongs to
    pub owner_id: String,
    /// The record serialized as JSON
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    /// When the document was written
    pub created_at: DateTime,
    /// When the document was last replaced
    pub updated_at: DateTime,
}

/// Documents have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
