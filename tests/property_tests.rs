//! Property-based tests for the money math, sequence numbering and
//! pagination arithmetic.
//!
//! These use proptest to verify invariants across a wide range of inputs,
//! helping to catch edge cases that unit tests might miss.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use workshop_api::handlers::common::Paginated;
use workshop_api::sequence::{self, DELIVERY_PREFIX, INVOICE_PREFIX};
use workshop_api::services::invoices::compute_amounts;

// Strategies for generating test data
fn money_strategy() -> impl Strategy<Value = Decimal> {
    // Cents in a realistic invoice range, two decimal places
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn rate_strategy() -> impl Strategy<Value = Decimal> {
    // 0.00 to 100.00 percent
    (0i64..=10_000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn amounts_are_rounded_to_cents(
        subtotal in money_strategy(),
        rate in rate_strategy(),
        discount in money_strategy(),
    ) {
        let (tax, total) = compute_amounts(subtotal, rate, discount);
        prop_assert!(tax.scale() <= 2, "tax {} has more than two decimals", tax);
        prop_assert!(total.scale() <= 2, "total {} has more than two decimals", total);
    }

    #[test]
    fn total_is_subtotal_plus_tax_minus_discount(
        subtotal in money_strategy(),
        rate in rate_strategy(),
        discount in money_strategy(),
    ) {
        // With two-decimal inputs the only rounding happens inside the tax
        // term, so the total must reproduce the sum exactly.
        let (tax, total) = compute_amounts(subtotal, rate, discount);
        prop_assert_eq!(total, subtotal + tax - discount);
    }

    #[test]
    fn tax_stays_within_half_a_cent_of_the_exact_value(
        subtotal in money_strategy(),
        rate in rate_strategy(),
    ) {
        let (tax, _) = compute_amounts(subtotal, rate, Decimal::ZERO);
        let exact = subtotal * rate / Decimal::ONE_HUNDRED;
        prop_assert!((tax - exact).abs() <= dec!(0.005));
    }

    #[test]
    fn zero_rate_means_zero_tax(subtotal in money_strategy(), discount in money_strategy()) {
        let (tax, total) = compute_amounts(subtotal, Decimal::ZERO, discount);
        prop_assert_eq!(tax, Decimal::ZERO);
        prop_assert_eq!(total, subtotal - discount);
    }

    #[test]
    fn tax_never_shrinks_the_total(subtotal in money_strategy(), rate in rate_strategy()) {
        let (_, total) = compute_amounts(subtotal, rate, Decimal::ZERO);
        prop_assert!(total >= subtotal);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn sequence_numbers_increment_by_one(counter in 1u64..9_000_000) {
        let last = format!("{}-{:06}", DELIVERY_PREFIX, counter);
        let next = sequence::next_in_sequence(DELIVERY_PREFIX, Some(&last));

        let digits = next
            .strip_prefix(DELIVERY_PREFIX)
            .and_then(|rest| rest.strip_prefix('-'))
            .expect("generated number keeps the prefix");
        prop_assert!(digits.len() >= 6, "counter segment is zero-padded: {}", next);
        prop_assert_eq!(digits.parse::<u64>().unwrap(), counter + 1);
    }

    #[test]
    fn unparseable_predecessors_restart_the_sequence(junk in "[a-z]{0,12}") {
        prop_assert_eq!(
            sequence::next_in_sequence(INVOICE_PREFIX, Some(&junk)),
            "INV-000001"
        );
    }

    #[test]
    fn generated_numbers_are_well_formed(counter in 0u64..9_000_000) {
        let last = (counter > 0).then(|| format!("{}-{:06}", INVOICE_PREFIX, counter));
        let next = sequence::next_in_sequence(INVOICE_PREFIX, last.as_deref());

        prop_assert!(next.starts_with("INV-"));
        prop_assert!(next["INV-".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}

proptest! {
    #[test]
    fn page_count_covers_every_row(
        total in 0u64..100_000,
        page in 1u64..1_000,
        per_page in 1u64..=100,
    ) {
        let paginated = Paginated::new(Vec::<u32>::new(), total, page, per_page);

        if total == 0 {
            prop_assert_eq!(paginated.total_pages, 0);
        } else {
            prop_assert!(paginated.total_pages * per_page >= total);
            prop_assert!((paginated.total_pages - 1) * per_page < total);
        }
    }
}
