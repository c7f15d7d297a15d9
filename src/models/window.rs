//! Daily operating window.
//!
//! A window is the open/close pair written in calendar cells as
//! `"HH:MM-HH:MM"`. Both ends are inclusive: a work center is open at
//! exactly its opening minute and still open at exactly its closing minute.
//!
//! A zero-length window (`open == close`) and the literal labels `closed`
//! and `off` mean the center does not operate that day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Fallback window applied when a calendar cell is missing or unreadable.
pub const DEFAULT_WINDOW: &str = "06:00-17:00";

/// Open/close times for one work center on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperatingWindow {
    open: NaiveTime,
    close: NaiveTime,
}

impl OperatingWindow {
    /// A window that never opens.
    pub fn closed() -> Self {
        Self {
            open: NaiveTime::default(),
            close: NaiveTime::default(),
        }
    }

    /// Creates a window from two times of day.
    ///
    /// Fails if `open` is later than `close`.
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, CalendarError> {
        if open > close {
            return Err(CalendarError::InvalidEntry(format!(
                "{}-{}",
                open.format("%H:%M"),
                close.format("%H:%M")
            )));
        }
        Ok(Self {
            open: truncate_to_minute(open),
            close: truncate_to_minute(close),
        })
    }

    /// Creates a window from hour/minute pairs.
    pub fn from_hm(
        open_hour: u32,
        open_minute: u32,
        close_hour: u32,
        close_minute: u32,
    ) -> Result<Self, CalendarError> {
        let open = hm(open_hour, open_minute)?;
        let close = hm(close_hour, close_minute)?;
        Self::new(open, close)
    }

    /// Parses a calendar cell such as `"06:00-17:00"` or `" 6:30 - 14:00 "`.
    pub fn parse(raw: &str) -> Result<Self, CalendarError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("closed") || trimmed.eq_ignore_ascii_case("off") {
            return Ok(Self::closed());
        }

        let invalid = || CalendarError::InvalidEntry(raw.to_string());
        let (open, close) = trimmed.split_once('-').ok_or_else(invalid)?;
        let open = parse_time_of_day(open.trim()).ok_or_else(invalid)?;
        let close = parse_time_of_day(close.trim()).ok_or_else(invalid)?;
        if open > close {
            return Err(invalid());
        }
        Ok(Self { open, close })
    }

    /// The built-in fallback window.
    pub fn default_window() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        }
    }

    /// Opening time of day.
    #[inline]
    pub fn open(&self) -> NaiveTime {
        self.open
    }

    /// Closing time of day.
    #[inline]
    pub fn close(&self) -> NaiveTime {
        self.close
    }

    /// Whether the center does not operate at all under this window.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.open == self.close
    }

    /// Whether a time of day falls within `[open, close]`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        !self.is_closed() && time >= self.open && time <= self.close
    }

    /// Length of the window in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        (self.close - self.open).num_milliseconds()
    }

    /// Opening instant on `date`.
    pub fn opening_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.open)
    }

    /// Closing instant on `date`.
    pub fn closing_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.close)
    }
}

impl Default for OperatingWindow {
    fn default() -> Self {
        Self::default_window()
    }
}

impl fmt::Display for OperatingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            return f.write_str("closed");
        }
        write!(
            f,
            "{}-{}",
            self.open.format("%H:%M"),
            self.close.format("%H:%M")
        )
    }
}

impl FromStr for OperatingWindow {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OperatingWindow {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OperatingWindow> for String {
    fn from(window: OperatingWindow) -> Self {
        window.to_string()
    }
}

/// Parses `H:MM` / `HH:MM` with hour 0-23 and minute 0-59.
fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let (hour, minute) = raw.split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn hm(hour: u32, minute: u32) -> Result<NaiveTime, CalendarError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| CalendarError::InvalidEntry(format!("{hour}:{minute:02}")))
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
