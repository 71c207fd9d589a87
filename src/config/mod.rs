/// Database configuration and connection management
pub mod database;

/// Application and business-rule settings loaded from config.toml
pub mod settings;

pub use settings::{BusinessRules, Settings};
