//! Settings loading from config.toml
//!
//! The settings file carries the application id that scopes every stored
//! document, and the two business rules the derived views depend on: the
//! painter commission rate and the low-stock threshold. Every key is
//! optional; a missing file means "run with defaults".

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use tracing::{debug, info};

/// Default commission paid to a painter on a completed order (10%).
pub const DEFAULT_COMMISSION_RATE: f64 = 0.10;

/// Default quantity at or below which stock is reported as low.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Default application id used to scope stored documents.
pub const DEFAULT_APP_ID: &str = "navkar-paints-app";

/// Default minutes a user's workspace may sit unused before it is closed.
pub const DEFAULT_SESSION_IDLE_MINUTES: u64 = 30;

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_VAR: &str = "PAINT_DESK_CONFIG";

/// Process-wide values the derived-data functions are parameterized by.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BusinessRules {
    /// Fraction of a completed order's amount credited to its painter
    pub commission_rate: f64,
    /// Stock at or below this quantity (but above zero) is "Low Stock"
    pub low_stock_threshold: u32,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            commission_rate: DEFAULT_COMMISSION_RATE,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Application id, the first segment of every document path
    pub app_id: String,
    /// Minutes of inactivity after which a user's workspace is closed
    pub session_idle_minutes: u64,
    /// Commission and stock rules
    pub business: BusinessRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            business: BusinessRules::default(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text and checks the business rules.
    ///
    /// # Errors
    /// Returns `Error::Config` if the TOML is malformed, the app id is blank,
    /// or the commission rate is negative or not finite.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// How long a workspace may stay unused before it is closed.
    #[must_use]
    pub const fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }

    fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(Error::Config {
                message: "app_id cannot be empty".to_string(),
            });
        }
        let rate = self.business.commission_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::Config {
                message: format!("commission_rate must be a non-negative number, got {rate}"),
            });
        }
        Ok(())
    }
}

/// Loads settings from a TOML file.
///
/// A file that does not exist yields the defaults.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - A business rule is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);

    if !path_ref.exists() {
        info!("No settings file at {:?}, using defaults", path_ref);
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    Settings::from_toml(&contents)
}

/// Loads settings from `$PAINT_DESK_CONFIG`, falling back to ./config.toml
pub fn load_default_config() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
