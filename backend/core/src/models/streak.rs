use chrono::NaiveDate;
use serde::Serialize;

/// Result of the streak ("racha") computation over a user's daily session
/// dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct StreakSummary {
    /// Consecutive days ending today (or yesterday, when today has no
    /// session yet). Zero once a full day was missed.
    pub current_streak: u32,
    /// Longest consecutive run anywhere in the history. Never below
    /// `current_streak`.
    pub max_streak: u32,
    pub last_session: Option<NaiveDate>,
}
