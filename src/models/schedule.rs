//! Schedule (solution) model.
//!
//! The outcome of scheduling one work center: the placed jobs in queue
//! order, plus the jobs that could not be placed because their duration
//! inputs were unusable.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Job, WorkCenter};
use crate::error::DurationError;

/// Result of one work center's scheduling run.
///
/// `jobs` carry fresh `scheduled_start`/`scheduled_end` and a dense
/// `priority` of `1..=N` in execution order. Consecutive jobs abut:
/// `jobs[i + 1].scheduled_start == jobs[i].scheduled_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Work center the queue belongs to.
    pub work_center: WorkCenter,
    /// Scheduled jobs in execution order.
    pub jobs: Vec<Job>,
    /// Jobs left out of the chain, in queue order.
    pub flagged: Vec<FlaggedJob>,
}

/// A job that needs manual attention before it can be scheduled.
///
/// The job is returned as received: priority and scheduled instants are
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedJob {
    /// The job as it was queued.
    pub job: Job,
    /// Why its duration could not be computed.
    pub reason: DurationError,
}

impl ScheduleOutcome {
    /// Creates an empty outcome.
    pub fn new(work_center: WorkCenter) -> Self {
        Self {
            work_center,
            jobs: Vec::new(),
            flagged: Vec::new(),
        }
    }

    /// Whether every queued job was placed.
    pub fn is_complete(&self) -> bool {
        self.flagged.is_empty()
    }

    /// Number of placed jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Start of the first placed job.
    pub fn first_start(&self) -> Option<NaiveDateTime> {
        self.jobs.first().and_then(|j| j.scheduled_start)
    }

    /// End of the last placed job.
    pub fn last_end(&self) -> Option<NaiveDateTime> {
        self.jobs.last().and_then(|j| j.scheduled_end)
    }

    /// Elapsed time from first start to last end (ms), 0 when empty.
    pub fn makespan_ms(&self) -> i64 {
        match (self.first_start(), self.last_end()) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => 0,
        }
    }

    /// Finds a placed job by id.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Finds a flagged job by id.
    pub fn flagged_job(&self, id: &str) -> Option<&FlaggedJob> {
        self.flagged.iter().find(|f| f.job.id == id)
    }
}
