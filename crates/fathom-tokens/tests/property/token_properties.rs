use fathom_tokens::{TokenBudget, TokenCounter};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cached_equals_uncached(s in ".{0,200}") {
        let counter = TokenCounter::new(100).unwrap();
        prop_assert_eq!(counter.count(&s), counter.count_cached(&s));
    }

    #[test]
    fn subadditivity(a in ".{0,100}", b in ".{0,100}") {
        let counter = TokenCounter::new(100).unwrap();
        let combined = format!("{a}{b}");
        prop_assert!(counter.count(&combined) <= counter.count(&a) + counter.count(&b) + 1);
    }

    #[test]
    fn ledger_used_never_exceeds_limit(
        limit in 0usize..5_000,
        costs in proptest::collection::vec(0usize..800, 0..40),
    ) {
        let mut budget = TokenBudget::new(limit);
        for cost in costs {
            let before = budget.used();
            let charged = budget.try_spend(cost);
            prop_assert_eq!(budget.used(), if charged { before + cost } else { before });
            prop_assert!(budget.used() <= budget.limit());
        }
    }
}
