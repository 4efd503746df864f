use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::streak::StreakSummary;
use crate::store::SessionStore;

/// Compute the current and historical-max daily streak from a user's session
/// dates. `dates` must be day-granularity, deduplicated and sorted
/// descending; `today` anchors the freshness check so callers (and tests)
/// control the clock.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let Some(&latest) = dates.first() else {
        return StreakSummary::default();
    };

    let gap = (today - latest).num_days();

    let mut current = 0u32;
    if gap <= 1 {
        // Walk back from today (or yesterday, when today has no session
        // yet), stopping at the first missing day.
        let mut expected = if gap == 1 { latest } else { today };
        for &date in dates {
            if date != expected {
                break;
            }
            current += 1;
            match expected.pred_opt() {
                Some(previous) => expected = previous,
                None => break,
            }
        }
    }

    // Historical maximum: run lengths over exactly-one-day steps in the
    // descending list.
    let mut max = 0u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            run += 1;
            max = max.max(run);
        } else {
            run = 1;
        }
    }

    StreakSummary {
        current_streak: current,
        // Floored by the trailing run and the current streak, so a single
        // recorded day always counts as a streak of one.
        max_streak: max.max(run).max(current),
        last_session: Some(latest),
    }
}

pub struct StreakService {
    sessions: Arc<dyn SessionStore>,
}

impl StreakService {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Record that the user played today. The store upserts on (user, date),
    /// so repeated calls within one day collapse into a single row.
    pub async fn record_session(&self, user_id: Uuid) -> Result<NaiveDate> {
        let today = Utc::now().date_naive();
        self.sessions.record_session(user_id, today).await?;
        tracing::info!("Daily session recorded for user {}: {}", user_id, today);
        Ok(today)
    }

    pub async fn current(&self, user_id: Uuid) -> Result<StreakSummary> {
        let dates = self.sessions.session_dates_desc(user_id).await?;
        let summary = compute_streak(&dates, Utc::now().date_naive());
        tracing::debug!(
            "Streak for user {}: current={}, max={}",
            user_id,
            summary.current_streak,
            summary.max_streak
        );
        Ok(summary)
    }
}
