use proptest::prelude::*;

use shentu_governance::tally::decide;
use shentu_governance::{TallyParams, TallyResult};

fn params() -> impl Strategy<Value = TallyParams> {
    (1u32..=10_000, 1u32..=10_000, 1u32..=10_000).prop_map(|(quorum_bps, threshold_bps, veto_bps)| {
        TallyParams {
            quorum_bps,
            threshold_bps,
            veto_bps,
        }
    })
}

fn votes() -> impl Strategy<Value = TallyResult> {
    (0u128..1_000_000, 0u128..1_000_000, 0u128..1_000_000, 0u128..1_000_000).prop_map(
        |(yes, abstain, no, no_with_veto)| TallyResult {
            yes,
            abstain,
            no,
            no_with_veto,
        },
    )
}

proptest! {
    /// A proposal never both passes and burns its deposits.
    #[test]
    fn pass_and_burn_are_exclusive(v in votes(), extra in 0u128..1_000_000, p in params()) {
        let total = v.total() + extra;
        let outcome = decide(v, total, &p);
        prop_assert!(!(outcome.passes && outcome.burn_deposits));
    }

    /// Without any Yes power nothing passes.
    #[test]
    fn no_yes_never_passes(mut v in votes(), extra in 0u128..1_000_000, p in params()) {
        v.yes = 0;
        let total = v.total() + extra;
        prop_assert!(!decide(v, total, &p).passes);
    }

    /// Adding Yes power to a passing proposal keeps it passing.
    #[test]
    fn more_yes_stays_passing(v in votes(), bump in 1u128..1_000, p in params()) {
        let total = v.total() + bump;
        if decide(v.clone(), total, &p).passes {
            let mut more = v;
            more.yes += bump;
            prop_assert!(decide(more, total, &p).passes);
        }
    }

    /// The tally result is carried through unchanged.
    #[test]
    fn result_is_preserved(v in votes(), p in params()) {
        let total = v.total();
        prop_assert_eq!(decide(v.clone(), total, &p).result, v);
    }
}
