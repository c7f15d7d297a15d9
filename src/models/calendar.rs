//! Work-center operating calendar.
//!
//! Resolves, for any work center and instant, whether the center is open
//! and when it closes that day. Calendars are built once from
//! spreadsheet-shaped rows and then queried without any string handling.
//!
//! # Precedence
//! For a given center and date the window is taken from, in order:
//! - a date override row (`2024-12-25`, `12/25/2024`), then
//! - the weekday row (`Monday`, `mon`), then
//! - the calendar's default window.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use tracing::{debug, warn};

use super::{OperatingWindow, WorkCenter};
use crate::config::SchedulerConfig;
use crate::error::CalendarError;

/// Day selector of a calendar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKey {
    /// Recurring weekly entry.
    Weekday(Weekday),
    /// One specific date (holiday, overtime day).
    Date(NaiveDate),
}

impl DayKey {
    /// Parses a row label: a weekday name (full or abbreviated, any case)
    /// or a date in `YYYY-MM-DD` / `MM/DD/YYYY` form.
    pub fn parse(label: &str) -> Result<Self, CalendarError> {
        let trimmed = label.trim();
        if let Ok(weekday) = Weekday::from_str(trimmed) {
            return Ok(DayKey::Weekday(weekday));
        }
        for format in ["%Y-%m-%d", "%m/%d/%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(DayKey::Date(date));
            }
        }
        Err(CalendarError::UnknownDayLabel(label.to_string()))
    }
}

/// One raw calendar row as read from the schedule sheet.
///
/// `cells` maps column headers to window strings. Headers that do not
/// name a work center (row ids, notes) are ignored on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarRow {
    /// Weekday, date or holiday label.
    pub label: String,
    /// Column header → window string.
    pub cells: BTreeMap<String, String>,
}

impl CalendarRow {
    /// Creates an empty row.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Adds a cell.
    pub fn with_cell(mut self, header: impl Into<String>, window: impl Into<String>) -> Self {
        self.cells.insert(header.into(), window.into());
        self
    }
}

/// Opening and closing instants of one calendar day, for timeline display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Opening instant (`None` when closed all day).
    pub opening: Option<NaiveDateTime>,
    /// Closing instant (`None` when closed all day).
    pub closing: Option<NaiveDateTime>,
}

/// Validated operating calendar for all work centers.
#[derive(Debug, Clone)]
pub struct WorkCenterCalendar {
    default_window: OperatingWindow,
    weekly: HashMap<(WorkCenter, Weekday), OperatingWindow>,
    dates: HashMap<(WorkCenter, NaiveDate), OperatingWindow>,
}

impl WorkCenterCalendar {
    /// Creates a calendar with no entries; every day uses `default_window`.
    pub fn new(default_window: OperatingWindow) -> Self {
        Self {
            default_window,
            weekly: HashMap::new(),
            dates: HashMap::new(),
        }
    }

    /// The shop's built-in calendar.
    ///
    /// Every station runs 06:00-17:00 seven days a week; the two sentinel
    /// centers are open 00:00-23:59.
    pub fn standard() -> Self {
        let station = OperatingWindow::default_window();
        let sentinel = OperatingWindow::from_hm(0, 0, 23, 59).unwrap_or(station);
        let mut calendar = Self::new(station);
        for weekday in WEEKDAYS {
            for center in WorkCenter::ALL {
                let window = if center.is_sentinel() { sentinel } else { station };
                calendar.weekly.insert((center, weekday), window);
            }
        }
        calendar
    }

    /// Builds a calendar from raw sheet rows.
    ///
    /// Defects never fail the load: rows with an unrecognized label are
    /// skipped, unknown columns are ignored, blank cells fall back to the
    /// default window and unparseable cells are replaced by it.
    pub fn from_rows(rows: &[CalendarRow], default_window: OperatingWindow) -> Self {
        let mut calendar = Self::new(default_window);

        for row in rows {
            let day = match DayKey::parse(&row.label) {
                Ok(day) => day,
                Err(e) => {
                    warn!(label = %row.label, error = %e, "skipping calendar row");
                    continue;
                }
            };

            for (header, raw) in &row.cells {
                let Some(center) = WorkCenter::from_label(header) else {
                    debug!(column = %header, "ignoring non work center column");
                    continue;
                };
                if raw.trim().is_empty() {
                    continue;
                }
                let window = match OperatingWindow::parse(raw) {
                    Ok(window) => window,
                    Err(e) => {
                        warn!(
                            label = %row.label,
                            work_center = %center,
                            error = %e,
                            fallback = %default_window,
                            "invalid calendar entry, using default window"
                        );
                        default_window
                    }
                };
                calendar.insert(center, day, window);
            }
        }

        calendar
    }

    /// Builds a calendar from raw sheet rows, falling back to the
    /// configured default window.
    pub fn from_rows_with(rows: &[CalendarRow], config: &SchedulerConfig) -> Self {
        Self::from_rows(rows, config.default_window)
    }

    /// Sets the weekly window of a center.
    pub fn with_weekday(
        mut self,
        center: WorkCenter,
        weekday: Weekday,
        window: OperatingWindow,
    ) -> Self {
        self.insert(center, DayKey::Weekday(weekday), window);
        self
    }

    /// Sets the same window for every weekday of a center.
    pub fn with_every_day(mut self, center: WorkCenter, window: OperatingWindow) -> Self {
        for weekday in WEEKDAYS {
            self.insert(center, DayKey::Weekday(weekday), window);
        }
        self
    }

    /// Sets a one-off window for a specific date.
    pub fn with_date(
        mut self,
        center: WorkCenter,
        date: NaiveDate,
        window: OperatingWindow,
    ) -> Self {
        self.insert(center, DayKey::Date(date), window);
        self
    }

    fn insert(&mut self, center: WorkCenter, day: DayKey, window: OperatingWindow) {
        match day {
            DayKey::Weekday(weekday) => {
                self.weekly.insert((center, weekday), window);
            }
            DayKey::Date(date) => {
                self.dates.insert((center, date), window);
            }
        }
    }

    /// Window applied when no row covers a center/day pair.
    pub fn default_window(&self) -> OperatingWindow {
        self.default_window
    }

    /// Resolves the window of `center` on `date`.
    pub fn window_for(&self, center: WorkCenter, date: NaiveDate) -> OperatingWindow {
        self.dates
            .get(&(center, date))
            .or_else(|| self.weekly.get(&(center, date.weekday())))
            .copied()
            .unwrap_or(self.default_window)
    }

    /// Whether `center` is open at `instant` (window bounds inclusive).
    pub fn is_open(&self, center: WorkCenter, instant: NaiveDateTime) -> bool {
        self.window_for(center, instant.date()).contains(instant.time())
    }

    /// Closing instant of `center` on the day of `instant`.
    ///
    /// On a closed day this is that day's midnight, which is never after
    /// `instant`.
    pub fn closing_instant(&self, center: WorkCenter, instant: NaiveDateTime) -> NaiveDateTime {
        let date = instant.date();
        self.window_for(center, date).closing_on(date)
    }

    /// Opening instant of `center` on `date`, if it operates that day.
    pub fn opening_instant(&self, center: WorkCenter, date: NaiveDate) -> Option<NaiveDateTime> {
        let window = self.window_for(center, date);
        (!window.is_closed()).then(|| window.opening_on(date))
    }

    /// First instant at or after `from` where `center` is open with its
    /// close still ahead.
    ///
    /// Snaps straight to opening boundaries, looking at most `max_days`
    /// days past `from`'s date. Returns `None` when nothing opens in that
    /// horizon.
    pub fn next_opening(
        &self,
        center: WorkCenter,
        from: NaiveDateTime,
        max_days: u32,
    ) -> Option<NaiveDateTime> {
        let mut date = from.date();
        for offset in 0..=max_days {
            let window = self.window_for(center, date);
            if !window.is_closed() {
                let open = window.opening_on(date);
                let candidate = if offset == 0 { from.max(open) } else { open };
                if candidate < window.closing_on(date) {
                    return Some(candidate);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }

    /// Opening/closing instants for each date in `[from.date(), to.date()]`.
    pub fn operating_days(
        &self,
        center: WorkCenter,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Vec<OperatingDay> {
        let mut days = Vec::new();
        let last = to.date();
        let mut date = from.date();
        while date <= last {
            let window = self.window_for(center, date);
            let (opening, closing) = if window.is_closed() {
                (None, None)
            } else {
                (Some(window.opening_on(date)), Some(window.closing_on(date)))
            };
            days.push(OperatingDay {
                date,
                opening,
                closing,
            });
            match date.checked_add_signed(Duration::days(1)) {
                Some(next) => date = next,
                None => break,
            }
        }
        days
    }
}

impl Default for WorkCenterCalendar {
    fn default() -> Self {
        Self::standard()
    }
}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];
