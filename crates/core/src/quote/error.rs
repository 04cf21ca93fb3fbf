//! Quote error types.

use thiserror::Error;

use crate::pricing::PricingError;
use crate::quote::types::QuoteStatus;

/// Errors that can occur while computing or transitioning a quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// A quote needs at least one line item.
    #[error("quote has no line items")]
    NoItems,

    /// Line quantities must be positive.
    #[error("line {index} has zero quantity")]
    ZeroQuantity {
        /// Index of the offending line.
        index: usize,
    },

    /// Unit prices must be non-negative.
    #[error("line {index} has a negative unit price")]
    NegativeUnitPrice {
        /// Index of the offending line.
        index: usize,
    },

    /// The status transition is not allowed.
    #[error("cannot transition quote from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: QuoteStatus,
        /// Requested status.
        to: QuoteStatus,
    },

    /// Markup application failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}
