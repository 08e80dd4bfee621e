//! GNSS week counters and time of week.
//!
//! Two systems are supported, each defined by its own reference epoch
//! and a fixed leap second offset to UTC:
//! - GPS: 1980-01-06T00:00:00 UTC, 18 s
//! - BeiDou: 2006-01-01T00:00:00 UTC, 4 s
//!
//! Elapsed times are computed on the unix (leap second free) time line, then the
//! system offset is applied once.

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_WEEK};
use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supported week counting time systems
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeSystem {
    #[default]
    GPS,
    BeiDou,
}

impl std::fmt::Display for TimeSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TimeSystem {
    /// Reference epoch of this system, expressed in UTC
    pub fn epoch(&self) -> Epoch {
        match self {
            Self::GPS => Epoch::from_gregorian_utc_at_midnight(1980, 1, 6),
            Self::BeiDou => Epoch::from_gregorian_utc_at_midnight(2006, 1, 1),
        }
    }

    /// Leap seconds between this system and UTC
    pub const fn leap_seconds(&self) -> i64 {
        match self {
            Self::GPS => 18,
            Self::BeiDou => 4,
        }
    }

    /// Readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GPS => "GPS",
            Self::BeiDou => "BDS",
        }
    }

    /// Milliseconds elapsed since reference epoch, leap offset included
    fn elapsed_ms(&self, instant: Epoch) -> f64 {
        let elapsed_s = instant.to_unix_seconds() - self.epoch().to_unix_seconds();
        (elapsed_s + self.leap_seconds() as f64) * 1000.0
    }
}

/// Week counter and time of week, in seconds
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfWeek {
    /// Week counter
    pub week: i64,
    /// Time of week (s), within [0, 604800)
    pub tow: f64,
}

/// Converts a UTC instant to ([TimeOfWeek]) in the given [TimeSystem].
///
/// The reported time of week is snapped to the start of a day, and that
/// day is shifted by one: `tow = ((day_of_week + 1) mod 7) * 86400`.
/// Calendar tools built on top of this rely on that exact value. Use
/// [to_week_tow_precise] to obtain the actual time of week.
/// ```
/// use gnss_tools::prelude::*;
/// let t = Epoch::from_gregorian_utc(1980, 1, 6, 0, 0, 18, 0);
/// let tow = to_week_tow(t, TimeSystem::GPS);
/// assert_eq!(tow.week, 0);
/// assert_eq!(tow.tow, 86400.0);
/// ```
pub fn to_week_tow(instant: Epoch, system: TimeSystem) -> TimeOfWeek {
    let elapsed_ms = system.elapsed_ms(instant);
    let week = (elapsed_ms / (SECONDS_PER_WEEK as f64 * 1000.0)).floor() as i64;
    let total_seconds = (elapsed_ms / 1000.0).floor() as i64;
    let seconds_of_week = total_seconds.rem_euclid(SECONDS_PER_WEEK);
    let day_of_week = seconds_of_week / SECONDS_PER_DAY;
    let adjusted = (day_of_week + 1) % 7;
    TimeOfWeek {
        week,
        tow: (adjusted * SECONDS_PER_DAY) as f64,
    }
}

/// Converts a UTC instant to ([TimeOfWeek]) in the given [TimeSystem],
/// with full sub-day resolution.
pub fn to_week_tow_precise(instant: Epoch, system: TimeSystem) -> TimeOfWeek {
    let elapsed_s = system.elapsed_ms(instant) / 1000.0;
    let week = (elapsed_s / SECONDS_PER_WEEK as f64).floor() as i64;
    TimeOfWeek {
        week,
        tow: elapsed_s - (week * SECONDS_PER_WEEK) as f64,
    }
}

/// Converts (week, time of week) in the given [TimeSystem] to UTC instant.
/// Time of week is expected within [0, 604800), this is not verified.
pub fn from_week_tow(week: i64, tow: f64, system: TimeSystem) -> Epoch {
    let seconds = system.epoch().to_unix_seconds() + (week * SECONDS_PER_WEEK) as f64 + tow
        - system.leap_seconds() as f64;
    Epoch::from_unix_seconds(seconds)
}

/// Returns (week, seconds of week) of an instant already expressed in GPST,
/// no leap offset is applied. This is what SP3 headers describe.
pub fn gps_week_sow(instant: Epoch) -> (i64, f64) {
    let elapsed_s = instant.to_unix_seconds() - TimeSystem::GPS.epoch().to_unix_seconds();
    let week = (elapsed_s / SECONDS_PER_WEEK as f64).floor() as i64;
    (week, elapsed_s - (week * SECONDS_PER_WEEK) as f64)
}

/// Seconds elapsed within the (UTC) day
pub fn seconds_of_day(instant: Epoch) -> f64 {
    let (_, _, _, hh, mm, ss, nanos) = instant.to_gregorian_utc();
    hh as f64 * 3600.0 + mm as f64 * 60.0 + ss as f64 + nanos as f64 * 1.0E-9
}

/// Day of week (0: Sunday) from time of week
pub fn day_of_week_from_tow(tow: f64) -> u8 {
    (tow / SECONDS_PER_DAY as f64).floor() as u8
}

/// Time of week at the start of given day of week
pub fn dow_to_tow(dow: u8) -> f64 {
    (dow as i64 * SECONDS_PER_DAY) as f64
}

/// Splits time of week into (day of week, seconds of day)
pub fn tow_to_dow(tow: f64) -> (u8, f64) {
    (day_of_week_from_tow(tow), tow % SECONDS_PER_DAY as f64)
}

/// Day of week name, 0 being Sunday
pub fn day_of_week_name(dow: u8) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ];
    NAMES.get(dow as usize).copied()
}
