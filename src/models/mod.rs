//! Work-center scheduling domain models.
//!
//! # Domain Mappings
//!
//! | wc-schedule | Shop floor |
//! |-------------|------------|
//! | Job | Order line / product run |
//! | WorkCenter | Machine or station |
//! | OperatingWindow | Daily shift (open-close) |
//! | WorkCenterCalendar | Schedule sheet (weekday/holiday rows) |
//! | ScheduleOutcome | One station's production plan |

mod calendar;
mod job;
mod schedule;
mod window;
mod work_center;

pub use calendar::{CalendarRow, DayKey, OperatingDay, WorkCenterCalendar};
pub use job::Job;
pub use schedule::{FlaggedJob, ScheduleOutcome};
pub use window::{OperatingWindow, DEFAULT_WINDOW};
pub use work_center::WorkCenter;
