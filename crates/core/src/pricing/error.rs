//! Pricing error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during slab validation or markup application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A configuration must have at least one slab.
    #[error("pricing configuration has no slabs")]
    EmptySlabs,

    /// A slab's upper bound is not greater than its lower bound.
    #[error("slab {index} has an empty interval")]
    EmptyInterval {
        /// Index of the offending slab.
        index: usize,
    },

    /// Slabs must cover a contiguous range without gaps or overlaps.
    #[error("slab {index} does not start where the previous slab ends")]
    NotContiguous {
        /// Index of the offending slab.
        index: usize,
    },

    /// Only the last slab may be open-ended.
    #[error("slab {index} is open-ended but not last")]
    UnboundedNotLast {
        /// Index of the offending slab.
        index: usize,
    },

    /// Markup values must be non-negative.
    #[error("slab {index} has a negative markup value")]
    NegativeMarkup {
        /// Index of the offending slab.
        index: usize,
    },

    /// The first slab's lower bound must be non-negative.
    #[error("first slab starts below zero")]
    NegativeLowerBound,

    /// Base amounts must be non-negative.
    #[error("base amount {0} is negative")]
    NegativeAmount(Decimal),

    /// The base amount is below the first slab.
    #[error("no slab covers amount {0}")]
    NoSlabForAmount(Decimal),
}
