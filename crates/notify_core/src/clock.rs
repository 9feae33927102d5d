use chrono::{FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use notify_domain::{error::Result, time};

/// Source of "now" and the zone fire times are written in.
pub trait Clock: Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    fn to_epoch_millis(&self, wall: NaiveDateTime) -> Result<i64>;

    /// Same as [`Clock::to_epoch_millis`], except wall times skipped by a DST
    /// jump are moved past the gap instead of rejected.
    fn to_epoch_millis_past_gap(&self, wall: NaiveDateTime) -> Result<i64>;
}

/// The host's clock and time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn to_epoch_millis(&self, wall: NaiveDateTime) -> Result<i64> {
        time::to_epoch_millis(wall, &Local)
    }

    fn to_epoch_millis_past_gap(&self, wall: NaiveDateTime) -> Result<i64> {
        time::to_epoch_millis_past_gap(wall, &Local)
    }
}

/// A frozen instant in a given zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock<Tz = FixedOffset> {
    now: NaiveDateTime,
    zone: Tz,
}

impl<Tz: TimeZone> FixedClock<Tz> {
    pub fn new(now: NaiveDateTime, zone: Tz) -> Self {
        Self { now, zone }
    }
}

impl FixedClock {
    pub fn utc(now: NaiveDateTime) -> Self {
        Self::new(now, Utc.fix())
    }
}

impl<Tz> Clock for FixedClock<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn to_epoch_millis(&self, wall: NaiveDateTime) -> Result<i64> {
        time::to_epoch_millis(wall, &self.zone)
    }

    fn to_epoch_millis_past_gap(&self, wall: NaiveDateTime) -> Result<i64> {
        time::to_epoch_millis_past_gap(wall, &self.zone)
    }
}
