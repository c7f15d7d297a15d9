//! Calendar-aware production scheduling for shop-floor work centers.
//!
//! Each work center runs its own queue of jobs, one at a time, in
//! priority order. A job's processing time is derived from its remaining
//! quantity, throughput and setup, then stretched across the center's
//! operating windows: work that does not fit before closing spills into
//! the next open period, and closed days are skipped.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `WorkCenter`, `OperatingWindow`,
//!   `WorkCenterCalendar`, `ScheduleOutcome`
//! - **`scheduler`**: Queue building, duration estimation, the calendar
//!   walk, multi-center driver, KPIs
//! - **`config`**: Scheduler tunables, loadable from JSON
//! - **`validation`**: Job record integrity checks
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use wc_schedule::models::{Job, WorkCenter, WorkCenterCalendar};
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let now = monday.and_hms_opt(6, 0, 0).unwrap();
//! let jobs = vec![
//!     Job::new("J1")
//!         .with_work_center(WorkCenter::Q)
//!         .with_priority(1)
//!         .with_quantities(720.0, 0.0)
//!         .with_units_per_hour(60.0),
//! ];
//!
//! let outcome = wc_schedule::schedule(&jobs, &WorkCenterCalendar::standard(), WorkCenter::Q, now)
//!     .unwrap()
//!     .unwrap();
//! // 12 h of work in an 11 h day: one hour spills into Tuesday.
//! let tuesday = monday.succ_opt().unwrap();
//! assert_eq!(outcome.jobs[0].scheduled_end, tuesday.and_hms_opt(7, 0, 0));
//! ```
//!
//! # Logging
//!
//! Emits `tracing` events (calendar defects and flagged jobs at `warn`,
//! placements at `debug`). Installing a subscriber is up to the caller.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

use chrono::NaiveDateTime;

pub use config::{QuantityBasis, SchedulerConfig};
pub use error::{Result, ScheduleError};

use models::{Job, ScheduleOutcome, WorkCenter, WorkCenterCalendar};
use scheduler::WorkCenterScheduler;

/// Schedules one work center with the default configuration.
///
/// See [`WorkCenterScheduler::schedule`].
pub fn schedule(
    jobs: &[Job],
    calendar: &WorkCenterCalendar,
    work_center: WorkCenter,
    now: NaiveDateTime,
) -> Result<Option<ScheduleOutcome>> {
    WorkCenterScheduler::new().schedule(jobs, calendar, work_center, now)
}
