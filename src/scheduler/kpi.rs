//! Schedule quality metrics (KPIs).
//!
//! Computes delivery indicators from scheduled jobs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest end - earliest start |
//! | Total Lateness | Sum of max(0, end - requested ship) |
//! | Maximum Lateness | Largest single delay |
//! | On-Time Rate | Fraction finishing by the requested ship instant |
//!
//! Unscheduled jobs are ignored.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use chrono::NaiveDateTime;

use crate::models::Job;

/// Schedule performance indicators.
///
/// All time values are in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Latest end minus earliest start (ms).
    pub makespan_ms: i64,
    /// Sum of lateness across all jobs (ms).
    pub total_lateness_ms: i64,
    /// Maximum lateness of any single job (ms).
    pub max_lateness_ms: i64,
    /// Ids of jobs ending after their requested ship instant.
    pub late_jobs: Vec<String>,
    /// Fraction of jobs finishing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Number of scheduled jobs the metrics cover.
    pub scheduled_count: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from scheduled jobs.
    ///
    /// Jobs without a requested ship instant count as on time.
    pub fn calculate(jobs: &[Job]) -> Self {
        let mut first_start: Option<NaiveDateTime> = None;
        let mut last_end: Option<NaiveDateTime> = None;
        let mut total_lateness: i64 = 0;
        let mut max_lateness: i64 = 0;
        let mut late_jobs = Vec::new();
        let mut scheduled_count: usize = 0;

        for job in jobs {
            let (Some(start), Some(end)) = (job.scheduled_start, job.scheduled_end) else {
                continue;
            };
            scheduled_count += 1;
            first_start = Some(first_start.map_or(start, |s| s.min(start)));
            last_end = Some(last_end.map_or(end, |e| e.max(end)));

            if let Some(lateness) = job.lateness_ms().filter(|&ms| ms > 0) {
                total_lateness += lateness;
                max_lateness = max_lateness.max(lateness);
                late_jobs.push(job.id.clone());
            }
        }

        let makespan_ms = match (first_start, last_end) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => 0,
        };

        let on_time_rate = if scheduled_count == 0 {
            1.0
        } else {
            (scheduled_count - late_jobs.len()) as f64 / scheduled_count as f64
        };

        Self {
            makespan_ms,
            total_lateness_ms: total_lateness,
            max_lateness_ms: max_lateness,
            late_jobs,
            on_time_rate,
            scheduled_count,
        }
    }

    /// Whether no job is later than `max_lateness_ms`.
    pub fn meets_thresholds(&self, max_lateness_ms: i64) -> bool {
        self.max_lateness_ms <= max_lateness_ms
    }
}
