use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};

use crate::error::NotifyError;

/// Interprets `wall` as a wall-clock time in `zone` and returns the UTC epoch
/// milliseconds an alarm service expects. Ambiguous times pick the earlier
/// instant; times skipped by a DST jump are rejected.
pub fn to_epoch_millis<Tz: TimeZone>(wall: NaiveDateTime, zone: &Tz) -> Result<i64, NotifyError> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(instant) => Ok(instant.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.timestamp_millis()),
        LocalResult::None => Err(NotifyError::InvalidFireTime(wall)),
    }
}

/// Like [`to_epoch_millis`], but a wall time skipped by a DST jump is read
/// with the offset in effect a day earlier, which lands it the same distance
/// past the gap (02:30 in a 02:00 to 03:00 gap fires at 03:30).
pub fn to_epoch_millis_past_gap<Tz: TimeZone>(
    wall: NaiveDateTime,
    zone: &Tz,
) -> Result<i64, NotifyError> {
    match to_epoch_millis(wall, zone) {
        Err(NotifyError::InvalidFireTime(_)) => {
            let offset = wall
                .checked_sub_signed(TimeDelta::days(1))
                .and_then(|before| zone.offset_from_local_datetime(&before).earliest())
                .ok_or(NotifyError::InvalidFireTime(wall))?
                .fix();
            let utc = wall
                .checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc().into()))
                .ok_or(NotifyError::InvalidFireTime(wall))?;
            Ok(utc.and_utc().timestamp_millis())
        }
        other => other,
    }
}

/// Inverse of [`to_epoch_millis`].
pub fn from_epoch_millis<Tz: TimeZone>(millis: i64, zone: &Tz) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(zone).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};
    use chrono_tz::America::New_York;

    fn on(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn utc_millis(wall: NaiveDateTime) -> i64 {
        wall.and_utc().timestamp_millis()
    }

    fn wall(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn applies_zone_offset_before_taking_epoch() {
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let millis = to_epoch_millis(wall(9, 0), &seoul).unwrap();
        let utc_midnight = Utc
            .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(millis, utc_midnight);
    }

    #[test]
    fn round_trips_wall_clock_in_same_zone() {
        let zones = [
            FixedOffset::west_opt(5 * 3600).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
            FixedOffset::east_opt(5 * 3600 + 1800).unwrap(),
        ];
        for zone in zones {
            let original = wall(23, 45);
            let millis = to_epoch_millis(original, &zone).unwrap();
            assert_eq!(from_epoch_millis(millis, &zone), Some(original));
        }
    }

    #[test]
    fn fall_back_ambiguity_resolves_to_earlier_instant() {
        // 01:30 happens twice on 2025-11-02: first as EDT (-4), then as EST (-5).
        let repeated = on(2025, 11, 2, 1, 30);
        let millis = to_epoch_millis(repeated, &New_York).unwrap();
        assert_eq!(millis, utc_millis(on(2025, 11, 2, 5, 30)));
        assert_eq!(from_epoch_millis(millis, &New_York), Some(repeated));
    }

    #[test]
    fn spring_forward_gap_is_rejected() {
        let skipped = on(2025, 3, 9, 2, 30);
        let err = to_epoch_millis(skipped, &New_York).unwrap_err();
        assert!(matches!(err, NotifyError::InvalidFireTime(t) if t == skipped));
    }

    #[test]
    fn past_gap_conversion_moves_skipped_time_forward() {
        let skipped = on(2025, 3, 9, 2, 30);
        let millis = to_epoch_millis_past_gap(skipped, &New_York).unwrap();
        assert_eq!(millis, utc_millis(on(2025, 3, 9, 7, 30)));
        assert_eq!(
            from_epoch_millis(millis, &New_York),
            Some(on(2025, 3, 9, 3, 30))
        );
    }

    #[test]
    fn past_gap_conversion_leaves_valid_times_alone() {
        for valid in [on(2025, 3, 9, 1, 59), on(2025, 3, 9, 3, 0), on(2025, 11, 2, 1, 30)] {
            assert_eq!(
                to_epoch_millis_past_gap(valid, &New_York).unwrap(),
                to_epoch_millis(valid, &New_York).unwrap()
            );
        }
    }

    #[test]
    fn round_trips_around_both_transitions() {
        let walls = [
            on(2025, 3, 9, 1, 59),
            on(2025, 3, 9, 3, 0),
            on(2025, 3, 9, 3, 30),
            on(2025, 11, 2, 0, 59),
            on(2025, 11, 2, 1, 0),
            on(2025, 11, 2, 2, 0),
        ];
        for original in walls {
            let millis = to_epoch_millis(original, &New_York).unwrap();
            assert_eq!(from_epoch_millis(millis, &New_York), Some(original));
        }
    }
}
