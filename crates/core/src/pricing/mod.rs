//! Markup slab configuration and lookup.
//!
//! Quotes are priced by applying a tiered markup to the base cost: a
//! pricing configuration holds an ordered set of slabs, each covering a
//! half-open amount interval `[min, max)`, and the slab containing the
//! base amount decides the markup (percentage or fixed).

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::PricingError;
pub use service::PricingService;
pub use types::{MarkupKind, MarkupSlab, PricedAmount};
