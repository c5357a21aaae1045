//! Arbitrary seeds and shapes must always satisfy the oracle suite.

use csb_sim::{BalanceOracle, DeterministicRng, RosterShape, generate_roster, reference_execute};
use proptest::prelude::*;

fn arb_shape() -> impl Strategy<Value = RosterShape> {
    (0_usize..30, 0_usize..200, 1_u32..60, 0_u8..=100, 0_u8..=100).prop_map(
        |(max_agents, max_customers, max_score, away_percent, stray_away_percent)| RosterShape {
            max_agents,
            max_customers,
            max_score,
            away_percent,
            stray_away_percent,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn any_seed_passes_oracle(seed in any::<u64>(), shape in arb_shape()) {
        let roster = generate_roster(&shape, &mut DeterministicRng::new(seed));
        let mut oracle_rng = DeterministicRng::new(seed ^ 0xBEEF);
        let result = BalanceOracle::check_all(&roster, &mut oracle_rng);
        prop_assert!(result.passed, "seed {seed}: {:?}", result.violations);
    }

    #[test]
    fn everyone_away_means_no_winner(seed in any::<u64>()) {
        let shape = RosterShape { away_percent: 100, ..RosterShape::default() };
        let roster = generate_roster(&shape, &mut DeterministicRng::new(seed));
        prop_assert_eq!(roster.execute().sentinel_id(), 0);
        prop_assert_eq!(reference_execute(&roster), 0);
    }
}
