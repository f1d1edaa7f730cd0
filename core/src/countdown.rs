//! Days-left derivation.
//!
//! The target is the first instant of the event date in the caller's time
//! zone and `now` carries a time of day, so the count drops continuously
//! through the day instead of once at midnight. Both ends are real instants:
//! a daylight-saving shift between them changes the gap by an hour. Ceiling
//! division means a fractional day still reads as one more day left;
//! anything at or below zero reads as passed.

use std::fmt;

use chrono::{DateTime, LocalResult, Local, NaiveDate, NaiveTime, Offset, TimeZone};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// `ceil((date at 00:00 in now's zone - now) / 1 day)`, in whole milliseconds.
pub fn days_left<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> i64 {
    let target = midnight(&now.timezone(), date);
    let diff = (target.naive_utc() - now.naive_utc()).num_milliseconds();
    // Integer division truncates toward zero, which is already the ceiling
    // for negative quotients.
    let days = diff / MILLIS_PER_DAY;
    if diff % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Start of `date` in `tz`. An ambiguous midnight resolves to the earlier
/// instant; a midnight skipped by a forward shift resolves to the first
/// instant after the gap.
fn midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let local = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&local).fix().local_minus_utc();
            tz.from_utc_datetime(&(local - chrono::Duration::seconds(i64::from(before))))
        }
    }
}

/// What the view shows for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Remaining(u64),
    Passed,
}

impl Countdown {
    pub fn from_days(days: i64) -> Self {
        if days > 0 {
            Countdown::Remaining(days.unsigned_abs())
        } else {
            Countdown::Passed
        }
    }

    pub fn for_date<Tz: TimeZone>(date: NaiveDate, now: &DateTime<Tz>) -> Self {
        Self::from_days(days_left(date, now))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining(days) => write!(f, "{days} day(s) left"),
            Countdown::Passed => f.write_str("Date has passed!"),
        }
    }
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// System clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
