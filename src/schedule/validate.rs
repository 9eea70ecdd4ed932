use thiserror::Error;
use time::{Duration, OffsetDateTime, Time};

use crate::config::ScheduleConfig;

/// Reasons a proposed booking is refused. Messages are shown to users as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingRuleError {
    #[error("Booking must start on the hour.")]
    InvalidAlignment,

    #[error("Booking must start between {open_hour}:00 and {last_hour}:00.")]
    OutsideOperatingHours { open_hour: u8, last_hour: u8 },

    #[error("Cannot book slots in the past.")]
    PastBooking,

    #[error("Booking must be exactly {0} minutes.")]
    InvalidDuration(i64),

    #[error("Booking must end by {0}:00.")]
    ExceedsClosingTime(u8),
}

/// A booking that passed every admission rule and may be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmittedBooking {
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
}

/// Decide admission of a proposed `(start, end)` pair.
///
/// Rules run in a fixed order and the first violation wins, so a given bad
/// request always produces the same message:
///   1. start on the hour
///   2. start hour inside `[open_hour, close_hour)`
///   3. start not in the past
///   4. end exactly `slot_duration` after start
///   5. end no later than `close_hour:00` that day
///
/// Pure: no clock reads, no persistence.
pub fn admit(
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
    now: OffsetDateTime,
    cfg: &ScheduleConfig,
) -> Result<AdmittedBooking, BookingRuleError> {
    if start_time.minute() != 0 || start_time.second() != 0 || start_time.nanosecond() != 0 {
        return Err(BookingRuleError::InvalidAlignment);
    }

    let hour = start_time.hour();
    if hour < cfg.open_hour || hour >= cfg.close_hour {
        return Err(BookingRuleError::OutsideOperatingHours {
            open_hour: cfg.open_hour,
            last_hour: cfg.close_hour - 1,
        });
    }

    if start_time < now {
        return Err(BookingRuleError::PastBooking);
    }

    if end_time != start_time + Duration::minutes(cfg.slot_duration_minutes) {
        return Err(BookingRuleError::InvalidDuration(cfg.slot_duration_minutes));
    }

    let closing = start_time
        .replace_time(Time::from_hms(cfg.close_hour, 0, 0).expect("validated close hour"));
    if end_time > closing {
        return Err(BookingRuleError::ExceedsClosingTime(cfg.close_hour));
    }

    Ok(AdmittedBooking {
        start_time,
        end_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-01-01 08:00 UTC);

    fn cfg() -> ScheduleConfig {
        ScheduleConfig {
            open_hour: 9,
            close_hour: 18,
            slot_duration_minutes: 60,
        }
    }

    #[test]
    fn aligned_in_window_future_slot_is_admitted() {
        let admitted = admit(
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:00 UTC),
            NOW,
            &cfg(),
        )
        .expect("admitted");
        assert_eq!(admitted.start_time, datetime!(2024-01-01 09:00 UTC));
    }

    #[test]
    fn last_slot_of_the_day_is_admitted() {
        // 17:00-18:00 ends exactly at closing.
        assert!(admit(
            datetime!(2024-01-01 17:00 UTC),
            datetime!(2024-01-01 18:00 UTC),
            NOW,
            &cfg(),
        )
        .is_ok());
    }

    #[test]
    fn off_hour_start_fails_alignment() {
        let err = admit(
            datetime!(2024-01-01 08:30 UTC),
            datetime!(2024-01-01 09:30 UTC),
            NOW,
            &cfg(),
        )
        .unwrap_err();
        assert_eq!(err, BookingRuleError::InvalidAlignment);
    }

    #[test]
    fn alignment_wins_over_later_rules() {
        // 17:30 is both misaligned and runs past closing; alignment is
        // checked first.
        let err = admit(
            datetime!(2024-01-01 17:30 UTC),
            datetime!(2024-01-01 18:30 UTC),
            NOW,
            &cfg(),
        )
        .unwrap_err();
        assert_eq!(err, BookingRuleError::InvalidAlignment);
    }

    #[test]
    fn start_before_opening_fails_window() {
        let err = admit(
            datetime!(2024-01-01 08:00 UTC),
            datetime!(2024-01-01 09:00 UTC),
            NOW,
            &cfg(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BookingRuleError::OutsideOperatingHours {
                open_hour: 9,
                last_hour: 17
            }
        );
        assert_eq!(
            err.to_string(),
            "Booking must start between 9:00 and 17:00."
        );
    }

    #[test]
    fn start_at_closing_hour_fails_window() {
        let err = admit(
            datetime!(2024-01-01 18:00 UTC),
            datetime!(2024-01-01 19:00 UTC),
            NOW,
            &cfg(),
        )
        .unwrap_err();
        assert!(matches!(err, BookingRuleError::OutsideOperatingHours { .. }));
    }

    #[test]
    fn elapsed_slot_fails_past_check() {
        let err = admit(
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:00 UTC),
            datetime!(2024-01-01 09:30 UTC),
            &cfg(),
        )
        .unwrap_err();
        assert_eq!(err, BookingRuleError::PastBooking);
    }

    #[test]
    fn start_exactly_now_is_not_past() {
        assert!(admit(
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:00 UTC),
            datetime!(2024-01-01 09:00 UTC),
            &cfg(),
        )
        .is_ok());
    }

    #[test]
    fn wrong_length_fails_duration() {
        let err = admit(
            datetime!(2024-01-01 09:00 UTC),
            datetime!(2024-01-01 10:30 UTC),
            NOW,
            &cfg(),
        )
        .unwrap_err();
        assert_eq!(err, BookingRuleError::InvalidDuration(60));
    }

    #[test]
    fn long_slot_running_past_closing_is_rejected() {
        // With 120-minute slots a 17:00 start has the right duration but
        // ends after 18:00.
        let cfg = ScheduleConfig {
            slot_duration_minutes: 120,
            ..cfg()
        };
        let err = admit(
            datetime!(2024-01-01 17:00 UTC),
            datetime!(2024-01-01 19:00 UTC),
            NOW,
            &cfg,
        )
        .unwrap_err();
        assert_eq!(err, BookingRuleError::ExceedsClosingTime(18));
    }
}
