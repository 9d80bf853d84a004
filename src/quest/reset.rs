//! Daily and weekly quest reset boundaries.
//!
//! Both deadlines sit at 10:00 UTC; the weekly one additionally falls on a
//! Tuesday. Deadlines are kept as unix seconds in atomics so the tick task can
//! roll them forward while other threads read them.

use chrono::{DateTime, Datelike, Utc, Weekday};
use std::sync::atomic::{AtomicI64, Ordering};

const RESET_HOUR_SECS: i64 = 10 * 3600;
const DAY_SECS: i64 = 86_400;
const WEEK_SECS: i64 = 7 * DAY_SECS;

/// Which deadlines rolled forward during an `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResetRollover {
    pub daily: bool,
    pub weekly: bool,
}

/// Next daily and weekly reset instants
#[derive(Debug)]
pub struct ResetClock {
    next_daily: AtomicI64,
    next_weekly: AtomicI64,
}

impl ResetClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        let (daily, weekly) = calculate_reset_times(now);
        Self {
            next_daily: AtomicI64::new(daily.timestamp()),
            next_weekly: AtomicI64::new(weekly.timestamp()),
        }
    }

    /// Recompute both deadlines from scratch
    pub fn calculate_reset_times(&self, now: DateTime<Utc>) {
        let (daily, weekly) = calculate_reset_times(now);
        self.next_daily.store(daily.timestamp(), Ordering::Release);
        self.next_weekly.store(weekly.timestamp(), Ordering::Release);
    }

    pub fn next_daily_reset(&self) -> DateTime<Utc> {
        from_secs(self.next_daily.load(Ordering::Acquire))
    }

    pub fn next_weekly_reset(&self) -> DateTime<Utc> {
        from_secs(self.next_weekly.load(Ordering::Acquire))
    }

    /// Roll each passed deadline forward by exactly one period
    pub fn advance(&self, now: DateTime<Utc>) -> ResetRollover {
        let now = now.timestamp();
        ResetRollover {
            daily: advance_one(&self.next_daily, now, DAY_SECS),
            weekly: advance_one(&self.next_weekly, now, WEEK_SECS),
        }
    }
}

fn advance_one(deadline: &AtomicI64, now: i64, period: i64) -> bool {
    let current = deadline.load(Ordering::Acquire);
    if current > now {
        return false;
    }
    // A concurrent advance of the same deadline wins; never step twice.
    deadline
        .compare_exchange(current, current + period, Ordering::AcqRel, Ordering::Acquire)
        .is_ok()
}

/// Compute `(next_daily, next_weekly)` for `now`.
///
/// The daily reset is always tomorrow at 10:00. The weekly reset is the
/// Tuesday of this week-cycle at 10:00 and may be earlier today when `now` is
/// a Tuesday after 10:00; the next `advance` corrects that.
pub fn calculate_reset_times(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = now.timestamp().div_euclid(DAY_SECS) * DAY_SECS;
    let reset_time = midnight + RESET_HOUR_SECS;

    let today = i64::from(now.weekday().num_days_from_sunday());
    let tuesday = i64::from(Weekday::Tue.num_days_from_sunday());
    let weekly_offset = (tuesday - today + 7) % 7;

    (
        from_secs(reset_time + DAY_SECS),
        from_secs(reset_time + weekly_offset * DAY_SECS),
    )
}

fn from_secs(secs: i64) -> DateTime<Utc> {
    // Stored values always come from valid instants.
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}
