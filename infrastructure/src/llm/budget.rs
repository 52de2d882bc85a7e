//! Daily token budget
//!
//! One budget instance is shared by all meetings in the process: it tracks a
//! global provider quota, not a per-meeting one. It is an explicit value the
//! gateway is constructed with, never a language-level singleton, so tests
//! build independent counters.
//!
//! The day boundary is the local calendar date as a string, compared at call
//! time; no timers involved.

use chrono::Local;
use std::sync::Mutex;

/// Verdict of a budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetDecision {
    /// Whether a request of the estimated size fits today's budget.
    pub allowed: bool,
    /// Tokens left today before the cap.
    pub remaining: u64,
}

#[derive(Debug)]
struct BudgetState {
    used_today: u64,
    last_reset: String,
    total_used: u64,
}

/// Process-wide daily token counter with a configurable cap.
#[derive(Debug)]
pub struct TokenBudget {
    daily_limit: u64,
    state: Mutex<BudgetState>,
}

impl TokenBudget {
    pub fn new(daily_limit: u64) -> Self {
        Self {
            daily_limit,
            state: Mutex::new(BudgetState {
                used_today: 0,
                last_reset: Self::today(),
                total_used: 0,
            }),
        }
    }

    /// Whether a request of `estimated` tokens fits today's remaining budget.
    pub fn check(&self, estimated: u64) -> BudgetDecision {
        self.check_on(estimated, &Self::today())
    }

    /// Record actual usage against today's counter.
    pub fn record(&self, tokens: u64) {
        self.record_on(tokens, &Self::today());
    }

    /// Tokens consumed today.
    pub fn used_today(&self) -> u64 {
        let mut state = self.state.lock().expect("budget state poisoned");
        Self::roll_over(&mut state, &Self::today());
        state.used_today
    }

    /// Lifetime tokens consumed by this process.
    pub fn total_used(&self) -> u64 {
        self.state.lock().expect("budget state poisoned").total_used
    }

    pub fn daily_limit(&self) -> u64 {
        self.daily_limit
    }

    fn check_on(&self, estimated: u64, today: &str) -> BudgetDecision {
        let mut state = self.state.lock().expect("budget state poisoned");
        Self::roll_over(&mut state, today);
        let remaining = self.daily_limit.saturating_sub(state.used_today);
        BudgetDecision {
            allowed: estimated <= remaining,
            remaining,
        }
    }

    fn record_on(&self, tokens: u64, today: &str) {
        let mut state = self.state.lock().expect("budget state poisoned");
        Self::roll_over(&mut state, today);
        state.used_today += tokens;
        state.total_used += tokens;
    }

    fn roll_over(state: &mut BudgetState, today: &str) {
        if state.last_reset != today {
            state.used_today = 0;
            state.last_reset = today.to_string();
        }
    }

    fn today() -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_within_cap() {
        let budget = TokenBudget::new(1000);
        let decision = budget.check(999);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1000);
    }

    #[test]
    fn test_rejects_when_cap_exceeded() {
        let budget = TokenBudget::new(1000);
        budget.record_on(900, "2026-08-23");
        let decision = budget.check_on(200, "2026-08-23");
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 100);
    }

    #[test]
    fn test_resets_on_new_day() {
        let budget = TokenBudget::new(1000);
        budget.record_on(1000, "2026-08-23");
        assert!(!budget.check_on(1, "2026-08-23").allowed);

        let decision = budget.check_on(1, "2026-08-24");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1000);
    }

    #[test]
    fn test_total_survives_daily_reset() {
        let budget = TokenBudget::new(1000);
        budget.record_on(600, "2026-08-23");
        budget.record_on(400, "2026-08-24");
        assert_eq!(budget.total_used(), 1000);
    }
}
