//! Work-center scheduling and KPI evaluation.
//!
//! # Pipeline
//!
//! `build_queue` → `processing_duration` → `WorkCenterScheduler::place`,
//! chained so each job starts where the previous one ended.
//!
//! # Algorithm
//!
//! `WorkCenterScheduler` is a single-machine list scheduler: jobs run in
//! priority order with no preemption, and their processing time is
//! stretched over the center's operating windows. Closed periods are
//! skipped by jumping straight to the next opening boundary, and the walk
//! is bounded by a cycle cap so a calendar that never opens fails fast.
//!
//! # KPI
//!
//! `ScheduleKpi` computes delivery metrics: makespan, lateness against the
//! requested ship date, on-time rate.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod calculator;
mod duration;
mod kpi;
mod queue;

pub use calculator::{merge_updates, BatchOutcome, Placement, WorkCenterScheduler};
pub use duration::processing_duration;
pub use kpi::ScheduleKpi;
pub use queue::build_queue;
