//! Entity module - Contains the SeaORM entity definitions for the database.

pub mod document;

pub use document::{Column as DocumentColumn, Entity as Document, Model as DocumentModel};
