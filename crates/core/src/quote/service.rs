//! Quote total calculation.

use rust_decimal::Decimal;

use triplexa_shared::types::{Currency, Money};

use crate::pricing::{MarkupSlab, PricingService};

use super::error::QuoteError;
use super::types::{QuoteItemInput, QuoteStatus, QuoteTotals};

/// Quote service for totals and transitions.
pub struct QuoteService;

impl QuoteService {
    /// Computes line totals, subtotal, and the marked-up final total.
    ///
    /// Line total is `quantity * unit_price`; the markup slab set is
    /// applied to the subtotal.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::NoItems` for an empty item list,
    /// `QuoteError::ZeroQuantity` / `QuoteError::NegativeUnitPrice` for bad
    /// lines, and propagates pricing errors from the markup lookup.
    pub fn compute_totals(
        items: &[QuoteItemInput],
        currency: Currency,
        slabs: &[MarkupSlab],
    ) -> Result<QuoteTotals, QuoteError> {
        if items.is_empty() {
            return Err(QuoteError::NoItems);
        }

        let mut line_totals = Vec::with_capacity(items.len());
        let mut subtotal = Decimal::ZERO;

        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(QuoteError::ZeroQuantity { index });
            }
            if item.unit_price < Decimal::ZERO {
                return Err(QuoteError::NegativeUnitPrice { index });
            }

            let line_total = Decimal::from(item.quantity) * item.unit_price;
            subtotal += line_total;
            line_totals.push(line_total);
        }

        let priced = PricingService::apply_markup(Money::new(subtotal, currency), slabs)?;

        Ok(QuoteTotals {
            line_totals,
            subtotal,
            markup: priced.markup,
            total: priced.total.amount,
        })
    }

    /// Validates a status transition.
    ///
    /// # Errors
    ///
    /// Returns `QuoteError::InvalidTransition` if the move is not allowed.
    pub fn transition(from: QuoteStatus, to: QuoteStatus) -> Result<QuoteStatus, QuoteError> {
        if from.can_transition_to(to) {
            Ok(to)
        } else {
            Err(QuoteError::InvalidTransition { from, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::MarkupKind;
    use crate::quote::types::QuoteItemKind;
    use rust_decimal_macros::dec;

    fn item(kind: QuoteItemKind, qty: u32, unit: Decimal) -> QuoteItemInput {
        QuoteItemInput {
            kind,
            description: "test line".into(),
            quantity: qty,
            unit_price: unit,
        }
    }

    fn flat_ten_percent() -> Vec<MarkupSlab> {
        vec![MarkupSlab {
            min_amount: dec!(0),
            max_amount: None,
            kind: MarkupKind::Percentage,
            value: dec!(10),
        }]
    }

    #[test]
    fn test_totals_sum_lines_and_markup() {
        let items = vec![
            item(QuoteItemKind::Hotel, 3, dec!(4500)),    // 13500
            item(QuoteItemKind::Transport, 1, dec!(2200)), // 2200
            item(QuoteItemKind::Sightseeing, 4, dec!(350)), // 1400
        ];

        let totals =
            QuoteService::compute_totals(&items, Currency::Inr, &flat_ten_percent()).unwrap();

        assert_eq!(totals.line_totals, vec![dec!(13500), dec!(2200), dec!(1400)]);
        assert_eq!(totals.subtotal, dec!(17100));
        assert_eq!(totals.markup, dec!(1710.00));
        assert_eq!(totals.total, dec!(18810.00));
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = QuoteService::compute_totals(&[], Currency::Inr, &flat_ten_percent());
        assert_eq!(result, Err(QuoteError::NoItems));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let items = vec![item(QuoteItemKind::Other, 0, dec!(100))];
        let result = QuoteService::compute_totals(&items, Currency::Inr, &flat_ten_percent());
        assert_eq!(result, Err(QuoteError::ZeroQuantity { index: 0 }));
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let items = vec![
            item(QuoteItemKind::Hotel, 1, dec!(100)),
            item(QuoteItemKind::Other, 1, dec!(-5)),
        ];
        let result = QuoteService::compute_totals(&items, Currency::Inr, &flat_ten_percent());
        assert_eq!(result, Err(QuoteError::NegativeUnitPrice { index: 1 }));
    }

    #[test]
    fn test_transitions() {
        assert_eq!(
            QuoteService::transition(QuoteStatus::Draft, QuoteStatus::Sent),
            Ok(QuoteStatus::Sent)
        );
        assert_eq!(
            QuoteService::transition(QuoteStatus::Sent, QuoteStatus::Accepted),
            Ok(QuoteStatus::Accepted)
        );
        assert_eq!(
            QuoteService::transition(QuoteStatus::Sent, QuoteStatus::Rejected),
            Ok(QuoteStatus::Rejected)
        );

        // Terminal and skipping transitions are rejected.
        assert!(QuoteService::transition(QuoteStatus::Draft, QuoteStatus::Accepted).is_err());
        assert!(QuoteService::transition(QuoteStatus::Accepted, QuoteStatus::Rejected).is_err());
        assert!(QuoteService::transition(QuoteStatus::Rejected, QuoteStatus::Sent).is_err());
    }
}
