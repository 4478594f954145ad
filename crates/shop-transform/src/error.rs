//! Error types for transformation setup.

use thiserror::Error;

/// Errors resolving transformation inputs.
///
/// Per-field problems during transformation never surface here; they degrade
/// to empty output values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Pricing rule has no conversion rate for the requested currency.
    #[error("pricing rule for '{category}' has no conversion rate for {currency}")]
    UnknownCurrency { category: String, currency: String },
}
