//! Acceptance window for scans, expressed in local wall-clock time

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use thiserror::Error;

/// Minutes in a day; window bounds must stay below this.
const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window bound {0} out of range (expected minutes in [0, 1440))")]
    OutOfRange(u16),
    #[error("window start {start} must be before end {end} (no midnight wraparound)")]
    Inverted { start: u16, end: u16 },
    #[error("invalid time of day '{0}' (expected HH:MM)")]
    Unparseable(String),
}

/// Half-open acceptance window `[start, end)` in minutes since local midnight.
///
/// Windows never cross midnight: construction rejects `start >= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start_minute: u16,
    end_minute: u16,
}

impl TimeWindow {
    pub fn new(start_minute: u16, end_minute: u16) -> Result<Self, WindowError> {
        if start_minute >= MINUTES_PER_DAY {
            return Err(WindowError::OutOfRange(start_minute));
        }
        if end_minute >= MINUTES_PER_DAY {
            return Err(WindowError::OutOfRange(end_minute));
        }
        if start_minute >= end_minute {
            return Err(WindowError::Inverted { start: start_minute, end: end_minute });
        }
        Ok(Self { start_minute, end_minute })
    }

    /// Build a window from hour/minute pairs (e.g. 5:00 to 7:15).
    pub fn from_hours(
        start_hour: u16,
        start_minute: u16,
        end_hour: u16,
        end_minute: u16,
    ) -> Result<Self, WindowError> {
        Self::new(start_hour * 60 + start_minute, end_hour * 60 + end_minute)
    }

    /// Parse a window from two `"HH:MM"` strings, as written in config files.
    pub fn parse(start: &str, end: &str) -> Result<Self, WindowError> {
        Self::new(parse_minute_of_day(start)?, parse_minute_of_day(end)?)
    }

    /// Whether `now` falls inside the window.
    ///
    /// Exactly at start is inside; exactly at end is outside. Seconds are
    /// ignored, matching the minute resolution of the configuration.
    pub fn contains(&self, now: NaiveTime) -> bool {
        let minute = (now.hour() * 60 + now.minute()) as u16;
        self.start_minute <= minute && minute < self.end_minute
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }
}

impl Default for TimeWindow {
    /// The stock morning window, 05:00-07:15.
    fn default() -> Self {
        Self { start_minute: 5 * 60, end_minute: 7 * 60 + 15 }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60
        )
    }
}

fn parse_minute_of_day(s: &str) -> Result<u16, WindowError> {
    fn invalid(s: &str) -> WindowError {
        WindowError::Unparseable(s.to_string())
    }
    let (hour, minute) = s.split_once(':').ok_or_else(|| invalid(s))?;
    let hour: u16 = hour.parse().map_err(|_| invalid(s))?;
    let minute: u16 = minute.parse().map_err(|_| invalid(s))?;
    if hour >= 24 || minute >= 60 {
        return Err(invalid(s));
    }
    Ok(hour * 60 + minute)
}
