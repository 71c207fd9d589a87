//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard overview command
pub mod dashboard;

/// General utility commands
pub mod general;

/// List and add commands for each record type
pub mod records;

/// Report command
pub mod report;

// Export commands
pub use dashboard::*;
pub use general::*;
pub use records::*;
pub use report::*;
