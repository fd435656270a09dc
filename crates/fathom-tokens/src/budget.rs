use super::counter::TokenCounter;

/// Running token ledger against a fixed limit.
///
/// Spending is all-or-nothing: an entry either fits entirely or is not
/// charged at all, so `used() <= limit()` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    limit: usize,
    used: usize,
}

impl TokenBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Budget of `floor(max_tokens * safety_margin)`.
    pub fn with_margin(max_tokens: usize, safety_margin: f64) -> Self {
        Self::new((max_tokens as f64 * safety_margin).floor() as usize)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }

    pub fn fits(&self, cost: usize) -> bool {
        cost <= self.remaining()
    }

    /// Charge `cost` if it fits. Returns whether it was charged.
    pub fn try_spend(&mut self, cost: usize) -> bool {
        if !self.fits(cost) {
            return false;
        }
        self.used += cost;
        true
    }

    /// Cost of one context entry: its tokens plus a fixed overhead.
    pub fn entry_cost(counter: &TokenCounter, text: &str, overhead: usize) -> usize {
        counter.count_cached(text).saturating_add(overhead)
    }
}
