//! Property tests for proportional allocation.

use aec_datagen::allocation::allocate;
use aec_datagen::catalogue;
use proptest::prelude::*;

fn tags(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("type{i}")).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Allocation never exceeds the request, and every type gets at least one
    /// asset once the request covers the catalogue.
    #[test]
    fn prop_allocation_bounded_and_covering(
        weights in prop::collection::vec(0.001f64..10.0, 1..16),
        total in 0usize..2_000_000,
    ) {
        let names = tags(weights.len());
        let pairs: Vec<(&str, f64)> = names
            .iter()
            .map(String::as_str)
            .zip(weights.iter().copied())
            .collect();

        let allocation = allocate(total, &pairs);

        prop_assert_eq!(allocation.len(), pairs.len());
        prop_assert!(allocation.total() <= total);
        if total >= pairs.len() {
            for (tag, count) in allocation.iter() {
                prop_assert!(count >= 1, "{} got {}", tag, count);
            }
        }
    }

    /// Below the catalogue size the request is met exactly, one unit per type.
    #[test]
    fn prop_small_requests_are_met_exactly(
        weights in prop::collection::vec(0.001f64..10.0, 2..16),
        fraction in 0.0f64..1.0,
    ) {
        let names = tags(weights.len());
        let pairs: Vec<(&str, f64)> = names
            .iter()
            .map(String::as_str)
            .zip(weights.iter().copied())
            .collect();
        let total = ((pairs.len() - 1) as f64 * fraction) as usize;

        let allocation = allocate(total, &pairs);

        prop_assert_eq!(allocation.total(), total);
        prop_assert!(allocation.iter().all(|(_, count)| count <= 1));
    }

    /// The shortfall against the request is below one unit per type.
    #[test]
    fn prop_standard_shortfall_is_bounded(total in 8usize..5_000_000) {
        let catalogue = catalogue::standard().unwrap();
        let weights = catalogue.weights();
        let allocation = allocate(total, &weights);

        prop_assert!(allocation.total() <= total);
        prop_assert!(total - allocation.total() < weights.len());
    }
}
