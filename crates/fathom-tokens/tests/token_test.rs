use fathom_tokens::{TokenBudget, TokenCounter};

fn counter() -> TokenCounter {
    TokenCounter::new(1_000).unwrap()
}

#[test]
fn count_empty_string_is_zero() {
    let counter = counter();
    assert_eq!(counter.count(""), 0);
    assert_eq!(counter.count_cached(""), 0);
}

#[test]
fn count_simple_text() {
    let count = counter().count("Building coverage limit: $1,000,000");
    assert!(count > 0);
    assert!(count < 20, "short line should be a few tokens, got {count}");
}

#[test]
fn count_cached_equals_uncached() {
    let counter = counter();
    let text = "Exclusion: flood damage is excluded unless endorsed.";
    assert_eq!(counter.count(text), counter.count_cached(text));
    assert_eq!(counter.count_cached(text), counter.count_cached(text));
}

#[test]
fn cloned_counter_shares_results() {
    let counter = counter();
    let clone = counter.clone();
    let text = "Deductible: $5,000 per occurrence";
    assert_eq!(counter.count_cached(text), clone.count_cached(text));
}

#[test]
fn entry_cost_adds_overhead() {
    let counter = counter();
    let text = "Premium: $12,400";
    assert_eq!(
        TokenBudget::entry_cost(&counter, text, 20),
        counter.count(text) + 20
    );
    assert_eq!(TokenBudget::entry_cost(&counter, "", 20), 20);
}

#[test]
fn ledger_never_exceeds_limit() {
    let counter = counter();
    let mut budget = TokenBudget::with_margin(100, 0.95);
    let text = "General liability each occurrence limit $1,000,000";
    let cost = TokenBudget::entry_cost(&counter, text, 20);
    while budget.try_spend(cost) {}
    assert!(budget.used() <= budget.limit());
    assert!(budget.remaining() < cost);
}
