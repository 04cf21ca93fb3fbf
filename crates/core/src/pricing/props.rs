//! Property-based tests for markup slab lookup.

use proptest::prelude::*;
use rust_decimal::Decimal;

use triplexa_shared::types::{Currency, Money};

use super::service::PricingService;
use super::types::{MarkupKind, MarkupSlab};

/// Strategy to generate a valid slab set from sorted boundaries.
///
/// Boundaries are strictly increasing, starting at zero; the final slab is
/// open-ended. Markup kinds and values vary per slab.
fn valid_slab_set() -> impl Strategy<Value = Vec<MarkupSlab>> {
    (
        prop::collection::vec(1i64..10_000_000i64, 1..8),
        prop::collection::vec((any::<bool>(), 0i64..5_000_000i64), 8),
    )
        .prop_map(|(widths, markups)| {
            let mut slabs = Vec::with_capacity(widths.len() + 1);
            let mut lower = Decimal::ZERO;

            for (i, width) in widths.iter().enumerate() {
                let upper = lower + Decimal::new(*width, 2);
                let (is_pct, value) = markups[i];
                slabs.push(MarkupSlab {
                    min_amount: lower,
                    max_amount: Some(upper),
                    kind: if is_pct {
                        MarkupKind::Percentage
                    } else {
                        MarkupKind::Fixed
                    },
                    value: Decimal::new(value, 2),
                });
                lower = upper;
            }

            let (is_pct, value) = markups[widths.len()];
            slabs.push(MarkupSlab {
                min_amount: lower,
                max_amount: None,
                kind: if is_pct {
                    MarkupKind::Percentage
                } else {
                    MarkupKind::Fixed
                },
                value: Decimal::new(value, 2),
            });

            slabs
        })
}

/// Strategy to generate non-negative amounts with 2 decimal places.
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Generated slab sets always pass validation.
    #[test]
    fn prop_generated_slabs_are_valid(slabs in valid_slab_set()) {
        prop_assert!(PricingService::validate_slabs(&slabs).is_ok());
    }

    /// Every non-negative amount matches exactly one slab.
    #[test]
    fn prop_exactly_one_slab_matches(
        slabs in valid_slab_set(),
        amount in non_negative_amount(),
    ) {
        let matches = slabs.iter().filter(|s| s.contains(amount)).count();
        prop_assert_eq!(matches, 1);

        let (index, _) = PricingService::find_slab(&slabs, amount).unwrap();
        prop_assert!(slabs[index].contains(amount));
    }

    /// Non-negative markups never price below base.
    #[test]
    fn prop_total_is_at_least_base(
        slabs in valid_slab_set(),
        amount in non_negative_amount(),
    ) {
        let base = Money::new(amount, Currency::Inr);
        let priced = PricingService::apply_markup(base, &slabs).unwrap();

        prop_assert!(priced.total.amount >= base.amount);
        prop_assert_eq!(priced.total.amount, base.amount + priced.markup);
        prop_assert_eq!(priced.total.currency, base.currency);
    }
}
