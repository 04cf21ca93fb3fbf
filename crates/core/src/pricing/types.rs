//! Pricing data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use triplexa_shared::types::Money;

/// How a slab's markup value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupKind {
    /// Markup value is a percentage of the base amount.
    Percentage,
    /// Markup value is a fixed amount added to the base.
    Fixed,
}

impl MarkupKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    /// Parses a kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// One tier of a pricing configuration.
///
/// Covers base amounts in `[min_amount, max_amount)`; a slab with
/// `max_amount = None` is open-ended and must be the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupSlab {
    /// Inclusive lower bound of the covered base amount.
    pub min_amount: Decimal,
    /// Exclusive upper bound; `None` means unbounded.
    pub max_amount: Option<Decimal>,
    /// How the markup value is applied.
    pub kind: MarkupKind,
    /// Markup value (percent or fixed amount depending on `kind`).
    pub value: Decimal,
}

impl MarkupSlab {
    /// Returns true if the given amount falls inside this slab.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= self.min_amount && self.max_amount.is_none_or(|max| amount < max)
    }
}

/// Result of applying a markup slab to a base amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedAmount {
    /// The base cost before markup.
    pub base: Money,
    /// The markup amount added.
    pub markup: Decimal,
    /// The final price.
    pub total: Money,
    /// Index of the slab that matched.
    pub slab_index: usize,
}
