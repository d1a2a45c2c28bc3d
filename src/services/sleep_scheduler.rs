//! Next wake-up time for the panel client.
//!
//! Wake-ups land on multiples of the interval counted from midnight. A
//! candidate that falls inside the nightly sleep window moves to the end of
//! that window, and a sleep shorter than [`MIN_SLEEP_MS`] skips one tick.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

/// Shortest sleep the client is sent.
pub const MIN_SLEEP_MS: i64 = 600_000;

const MINUTES_PER_DAY: u32 = 24 * 60;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Daily `[start, end)` window; `end < start` crosses midnight and
/// `end == start` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepWindow {
    start_minute: u32,
    end_minute: u32,
}

impl SleepWindow {
    pub fn new(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self {
            start_minute: (start_hour * 60 + start_minute) % MINUTES_PER_DAY,
            end_minute: (end_hour * 60 + end_minute) % MINUTES_PER_DAY,
        }
    }

    fn length_minutes(&self) -> u32 {
        (self.end_minute + MINUTES_PER_DAY - self.start_minute) % MINUTES_PER_DAY
    }

    /// End of the window occurrence containing `at`, if any.
    ///
    /// Occurrences starting on the day before `at` are checked too, so a
    /// window crossing midnight is found from either side.
    pub fn containing_end(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        let length = Duration::minutes(self.length_minutes() as i64);
        if length.is_zero() {
            return None;
        }
        let start_time = minute_of_day(self.start_minute);
        [at.date() - Duration::days(1), at.date()]
            .into_iter()
            .map(|day| day.and_time(start_time))
            .find(|&start| start <= at && at < start + length)
            .map(|start| start + length)
    }
}

/// Result sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SleepPlan {
    /// Local time the plan was made, `%Y-%m-%d %H:%M:%S`
    pub current_time: String,
    /// Local wake-up time, `%Y-%m-%d %H:%M:%S`
    pub next_wakeup: String,
    /// Milliseconds until the wake-up
    pub sleep_duration: i64,
}

fn minute_of_day(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// `ticks`-th interval boundary after `now`'s minute, wrapped onto the next
/// day when it would lie in the past.
fn interval_boundary(now: NaiveDateTime, interval: u32, ticks: u32) -> NaiveDateTime {
    let interval = interval.max(1);
    let minutes_now = now.hour() * 60 + now.minute();
    let next = (interval * (minutes_now / interval + ticks)) % MINUTES_PER_DAY;
    let candidate = now.date().and_time(minute_of_day(next));
    if candidate < now {
        candidate + Duration::days(1)
    } else {
        candidate
    }
}

fn snap(candidate: NaiveDateTime, window: Option<&SleepWindow>) -> NaiveDateTime {
    window
        .and_then(|w| w.containing_end(candidate))
        .unwrap_or(candidate)
}

/// Plan the next wake-up.
pub fn plan_sleep(now: NaiveDateTime, interval: u32, window: Option<&SleepWindow>) -> SleepPlan {
    let mut wake = snap(interval_boundary(now, interval, 1), window);
    if (wake - now).num_milliseconds() < MIN_SLEEP_MS {
        wake = snap(interval_boundary(now, interval, 2), window);
    }
    SleepPlan {
        current_time: now.format(TIME_FORMAT).to_string(),
        next_wakeup: wake.format(TIME_FORMAT).to_string(),
        sleep_duration: (wake - now).num_milliseconds(),
    }
}
