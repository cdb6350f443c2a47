//! Wall-clock times on a single 24-hour cycle.
//!
//! A [`Clock`] stores whole minutes since midnight. Arithmetic wraps modulo
//! one day and never carries into a following day, so comparisons between
//! times on either side of midnight are meaningless.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// A time of day with minute precision.
///
/// # Examples
/// ```
/// use wgups_core::Clock;
///
/// let late = Clock::new(23, 50).add_minutes(20);
/// assert_eq!(late, Clock::new(0, 10));
/// assert!(Clock::new(8, 0) < Clock::new(9, 0));
/// assert_eq!(late.to_string(), "00:10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Clock {
    total_minutes: u16,
}

impl Clock {
    /// Midnight.
    pub const MIDNIGHT: Self = Self { total_minutes: 0 };
    /// The time packages become available and the first truck may leave.
    pub const START_OF_DAY: Self = Self { total_minutes: 8 * 60 };
    /// The deadline assigned to packages without an explicit one.
    pub const END_OF_DAY: Self = Self {
        total_minutes: 17 * 60,
    };

    /// Build a clock from hours and minutes, wrapping past midnight.
    #[must_use]
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self::MIDNIGHT.add_minutes(i64::from(hours) * MINUTES_PER_HOUR + i64::from(minutes))
    }

    /// Minutes elapsed since midnight, in `0..1440`.
    #[must_use]
    pub const fn total_minutes(self) -> u16 {
        self.total_minutes
    }

    /// Hour component, in `0..24`.
    #[must_use]
    pub const fn hours(self) -> u16 {
        self.total_minutes.div_euclid(60)
    }

    /// Minute component, in `0..60`.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.total_minutes.rem_euclid(60)
    }

    /// Return a clock `minutes` later (or earlier when negative), wrapping
    /// modulo one day.
    ///
    /// # Examples
    /// ```
    /// use wgups_core::Clock;
    ///
    /// assert_eq!(Clock::new(0, 5).add_minutes(-10), Clock::new(23, 55));
    /// ```
    #[must_use]
    pub fn add_minutes(self, minutes: i64) -> Self {
        // Reduce the offset first so extreme values cannot overflow.
        let offset = minutes.rem_euclid(MINUTES_PER_DAY);
        let wrapped = (i64::from(self.total_minutes) + offset).rem_euclid(MINUTES_PER_DAY);
        // `rem_euclid` keeps the value inside `0..1440`.
        let total_minutes = u16::try_from(wrapped).unwrap_or_default();
        Self { total_minutes }
    }

    /// Return a clock `hours` later, wrapping modulo one day.
    #[must_use]
    pub fn add_hours(self, hours: i64) -> Self {
        self.add_minutes(hours.rem_euclid(24) * MINUTES_PER_HOUR)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// Errors returned when parsing a [`Clock`] from `HH:MM` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockParseError {
    /// The text was not two colon-separated numbers.
    #[error("expected a time formatted as HH:MM, found '{input}'")]
    Malformed {
        /// The rejected input.
        input: String,
    },
    /// The hour or minute component was out of range.
    #[error("time '{input}' is outside 00:00..=23:59")]
    OutOfRange {
        /// The rejected input.
        input: String,
    },
}

impl FromStr for Clock {
    type Err = ClockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockParseError::Malformed {
            input: s.to_owned(),
        };
        let (hour_text, minute_text) = s.trim().split_once(':').ok_or_else(malformed)?;
        let hours: u32 = hour_text.parse().map_err(|_| malformed())?;
        let minutes: u32 = minute_text.parse().map_err(|_| malformed())?;
        if hours >= 24 || minutes >= 60 {
            return Err(ClockParseError::OutOfRange {
                input: s.to_owned(),
            });
        }
        Ok(Self::new(hours, minutes))
    }
}

impl TryFrom<String> for Clock {
    type Error = ClockParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Clock> for String {
    fn from(clock: Clock) -> Self {
        clock.to_string()
    }
}
