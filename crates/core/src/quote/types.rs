//! Quote data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a quote line item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteItemKind {
    /// Hotel room nights.
    Hotel,
    /// Transport route fare.
    Transport,
    /// Sightseeing tickets.
    Sightseeing,
    /// Restaurant meals.
    Restaurant,
    /// Anything not tied to inventory.
    Other,
}

impl QuoteItemKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Transport => "transport",
            Self::Sightseeing => "sightseeing",
            Self::Restaurant => "restaurant",
            Self::Other => "other",
        }
    }

    /// Parses a kind from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hotel" => Some(Self::Hotel),
            "transport" => Some(Self::Transport),
            "sightseeing" => Some(Self::Sightseeing),
            "restaurant" => Some(Self::Restaurant),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Quote lifecycle status.
///
/// Valid transitions:
/// - Draft → Sent (send)
/// - Sent → Accepted (accept)
/// - Sent → Rejected (reject)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    /// Quote is being drafted and can be modified.
    Draft,
    /// Quote has been sent to the customer.
    Sent,
    /// Customer accepted; the quote can back a booking.
    Accepted,
    /// Customer rejected; terminal.
    Rejected,
}

impl QuoteStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the quote can still be edited.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if this status can transition to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Accepted)
                | (Self::Sent, Self::Rejected)
        )
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for one quote line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteItemInput {
    /// What the line refers to.
    pub kind: QuoteItemKind,
    /// Human-readable description.
    pub description: String,
    /// Quantity (nights, seats, tickets, covers).
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Computed quote totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Per-line totals, in input order.
    pub line_totals: Vec<Decimal>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Markup applied on the subtotal.
    pub markup: Decimal,
    /// Final quote total.
    pub total: Decimal,
}
