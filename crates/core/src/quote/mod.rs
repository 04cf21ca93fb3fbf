//! Quote line items and total calculation.
//!
//! A quote is composed of inventory-backed line items; totals are the sum
//! of line totals plus the markup from the active pricing configuration.

pub mod error;
pub mod service;
pub mod types;

pub use error::QuoteError;
pub use service::QuoteService;
pub use types::{QuoteItemInput, QuoteItemKind, QuoteStatus, QuoteTotals};
