use time::{Duration, OffsetDateTime, Time};

use crate::config::ScheduleConfig;

/// Bookable slot starts for the remainder of today's operating window.
///
/// Slots are the hour-aligned instants of `[open_hour, close_hour)` on the
/// current UTC day, keeping only those not before `now`. Before opening the
/// full window is returned; past closing the list is empty. Slots are never
/// emitted for a day other than today.
pub fn available_slots(now: OffsetDateTime, cfg: &ScheduleConfig) -> Vec<OffsetDateTime> {
    let midnight = now.replace_time(Time::MIDNIGHT);
    (cfg.open_hour..cfg.close_hour)
        .map(|hour| midnight + Duration::hours(hour as i64))
        .filter(|slot| *slot >= now)
        .collect()
}
