//! Core business logic - framework-agnostic records, derived views, forms and reports.
//!
//! Nothing in here knows about Discord. The bot layer renders what these
//! modules compute, and the store layer feeds them.

/// Painter commission calculation
pub mod commission;
/// Dashboard counters
pub mod dashboard;
/// Create forms: field definitions, validation and coercion
pub mod form;
/// Domain records and store envelopes
pub mod records;
/// Reports over the latest snapshot
pub mod report;
/// Per-entity list screens and forms
pub mod screens;
/// Stock status classification
pub mod stock;
/// Searchable tables and cell rendering
pub mod table;
/// Live per-owner snapshot
pub mod workspace;
