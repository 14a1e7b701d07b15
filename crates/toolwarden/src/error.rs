//! Error types for the toolwarden crate
//!
//! This module defines the error hierarchy for the crate using `thiserror`.
//!
//! The matching core (pattern extraction, rule matching, path classification,
//! update synthesis) is total and never fails: absent or mistyped fields
//! degrade to a wildcard or empty pattern instead of raising. Errors exist
//! only at the ambient surfaces of the crate:
//!
//! - [`WardenError::Io`]: reading or writing a settings document
//!   (auto-converts from `std::io::Error`)
//! - [`WardenError::JsonDecode`]: malformed settings JSON
//!   (auto-converts from `serde_json::Error`)
//! - [`WardenError::RuleParse`]: malformed scoped-rule text such as `"Bash("`
//! - [`WardenError::Approval`]: an approval handler failed to produce a decision
//!
//! # Example
//!
//! ```rust
//! use toolwarden::error::WardenError;
//!
//! fn example() -> Result<(), WardenError> {
//!     // Auto-conversion from std::io::Error
//!     let _text = std::fs::read_to_string("/nonexistent")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for all toolwarden operations
///
/// Two variants support automatic conversion via the `?` operator:
/// - `Io` from `std::io::Error`
/// - `JsonDecode` from `serde_json::Error`
#[derive(Error, Debug)]
pub enum WardenError {
    /// I/O operation on a settings document failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings document contained invalid JSON
    #[error("Failed to parse settings JSON: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// A scoped rule string did not have the `Tool` or `Tool(content)` shape
    #[error("Invalid permission rule syntax: {rule:?}")]
    RuleParse {
        /// The rule text that failed to parse
        rule: String,
    },

    /// The approval handler failed instead of returning a decision
    #[error("Approval handler failed: {0}")]
    Approval(String),
}
