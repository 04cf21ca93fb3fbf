//! Markup slab validation and application.

use rust_decimal::Decimal;

use triplexa_shared::types::Money;

use super::error::PricingError;
use super::types::{MarkupKind, MarkupSlab, PricedAmount};

/// Pricing service for slab lookup and markup math.
pub struct PricingService;

impl PricingService {
    /// Validates a slab set: ordered, contiguous, non-overlapping, with
    /// non-negative markups and at most one (trailing) open-ended slab.
    ///
    /// # Errors
    ///
    /// Returns the first structural violation found, with the slab index.
    pub fn validate_slabs(slabs: &[MarkupSlab]) -> Result<(), PricingError> {
        let Some(first) = slabs.first() else {
            return Err(PricingError::EmptySlabs);
        };

        if first.min_amount < Decimal::ZERO {
            return Err(PricingError::NegativeLowerBound);
        }

        for (index, slab) in slabs.iter().enumerate() {
            if slab.value < Decimal::ZERO {
                return Err(PricingError::NegativeMarkup { index });
            }

            match slab.max_amount {
                Some(max) if max <= slab.min_amount => {
                    return Err(PricingError::EmptyInterval { index });
                }
                None if index + 1 != slabs.len() => {
                    return Err(PricingError::UnboundedNotLast { index });
                }
                _ => {}
            }

            if index > 0 {
                // Contiguity: each slab starts exactly where the previous ends.
                let prev_max = slabs[index - 1].max_amount;
                if prev_max != Some(slab.min_amount) {
                    return Err(PricingError::NotContiguous { index });
                }
            }
        }

        Ok(())
    }

    /// Finds the slab covering the given amount.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::NegativeAmount` for negative amounts and
    /// `PricingError::NoSlabForAmount` if the amount is below the first slab.
    pub fn find_slab(
        slabs: &[MarkupSlab],
        amount: Decimal,
    ) -> Result<(usize, &MarkupSlab), PricingError> {
        if amount < Decimal::ZERO {
            return Err(PricingError::NegativeAmount(amount));
        }

        slabs
            .iter()
            .enumerate()
            .find(|(_, slab)| slab.contains(amount))
            .ok_or(PricingError::NoSlabForAmount(amount))
    }

    /// Applies the matching slab's markup to a base amount.
    ///
    /// Percentage markups are rounded to 2 decimal places; the total is
    /// `base + markup`.
    ///
    /// # Errors
    ///
    /// Propagates slab-lookup errors; callers should validate the slab set
    /// before storing it, not here.
    pub fn apply_markup(base: Money, slabs: &[MarkupSlab]) -> Result<PricedAmount, PricingError> {
        let (slab_index, slab) = Self::find_slab(slabs, base.amount)?;

        let markup = match slab.kind {
            MarkupKind::Percentage => {
                (base.amount * slab.value / Decimal::ONE_HUNDRED).round_dp(2)
            }
            MarkupKind::Fixed => slab.value,
        };

        Ok(PricedAmount {
            base,
            markup,
            total: Money::new(base.amount + markup, base.currency),
            slab_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use triplexa_shared::types::Currency;

    fn slab(
        min: Decimal,
        max: Option<Decimal>,
        kind: MarkupKind,
        value: Decimal,
    ) -> MarkupSlab {
        MarkupSlab {
            min_amount: min,
            max_amount: max,
            kind,
            value,
        }
    }

    fn standard_slabs() -> Vec<MarkupSlab> {
        vec![
            slab(
                dec!(0),
                Some(dec!(10000)),
                MarkupKind::Percentage,
                dec!(12),
            ),
            slab(
                dec!(10000),
                Some(dec!(50000)),
                MarkupKind::Percentage,
                dec!(10),
            ),
            slab(dec!(50000), None, MarkupKind::Fixed, dec!(4000)),
        ]
    }

    #[test]
    fn test_validate_standard_slabs() {
        assert!(PricingService::validate_slabs(&standard_slabs()).is_ok());
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(
            PricingService::validate_slabs(&[]),
            Err(PricingError::EmptySlabs)
        );
    }

    #[test]
    fn test_validate_gap_rejected() {
        let slabs = vec![
            slab(dec!(0), Some(dec!(100)), MarkupKind::Fixed, dec!(5)),
            slab(dec!(200), None, MarkupKind::Fixed, dec!(5)),
        ];
        assert_eq!(
            PricingService::validate_slabs(&slabs),
            Err(PricingError::NotContiguous { index: 1 })
        );
    }

    #[test]
    fn test_validate_overlap_rejected() {
        let slabs = vec![
            slab(dec!(0), Some(dec!(100)), MarkupKind::Fixed, dec!(5)),
            slab(dec!(50), None, MarkupKind::Fixed, dec!(5)),
        ];
        assert_eq!(
            PricingService::validate_slabs(&slabs),
            Err(PricingError::NotContiguous { index: 1 })
        );
    }

    #[test]
    fn test_validate_unbounded_must_be_last() {
        let slabs = vec![
            slab(dec!(0), None, MarkupKind::Fixed, dec!(5)),
            slab(dec!(100), None, MarkupKind::Fixed, dec!(5)),
        ];
        assert_eq!(
            PricingService::validate_slabs(&slabs),
            Err(PricingError::UnboundedNotLast { index: 0 })
        );
    }

    #[test]
    fn test_percentage_markup() {
        let base = Money::new(dec!(8000), Currency::Inr);
        let priced = PricingService::apply_markup(base, &standard_slabs()).unwrap();

        assert_eq!(priced.slab_index, 0);
        assert_eq!(priced.markup, dec!(960.00));
        assert_eq!(priced.total.amount, dec!(8960.00));
        assert_eq!(priced.total.currency, Currency::Inr);
    }

    #[test]
    fn test_fixed_markup() {
        let base = Money::new(dec!(75000), Currency::Inr);
        let priced = PricingService::apply_markup(base, &standard_slabs()).unwrap();

        assert_eq!(priced.slab_index, 2);
        assert_eq!(priced.markup, dec!(4000));
        assert_eq!(priced.total.amount, dec!(79000));
    }

    #[test]
    fn test_boundary_belongs_to_upper_slab() {
        // Half-open intervals: 10000 falls in the second slab, not the first.
        let base = Money::new(dec!(10000), Currency::Inr);
        let priced = PricingService::apply_markup(base, &standard_slabs()).unwrap();

        assert_eq!(priced.slab_index, 1);
        assert_eq!(priced.markup, dec!(1000.00));
    }

    #[test]
    fn test_amount_below_first_slab() {
        let slabs = vec![slab(dec!(1000), None, MarkupKind::Fixed, dec!(50))];
        let base = Money::new(dec!(500), Currency::Inr);

        assert_eq!(
            PricingService::apply_markup(base, &slabs),
            Err(PricingError::NoSlabForAmount(dec!(500)))
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let base = Money::new(dec!(-1), Currency::Inr);
        assert_eq!(
            PricingService::apply_markup(base, &standard_slabs()),
            Err(PricingError::NegativeAmount(dec!(-1)))
        );
    }
}
