//! Calendar-aware sequential scheduler.
//!
//! # Algorithm
//!
//! 1. Build the work center's queue (priority order, stable).
//! 2. Estimate each job's processing duration; unusable jobs are flagged.
//! 3. Walk the duration across the calendar from the current anchor:
//!    - SEEKING_OPEN: snap a closed cursor to the next opening boundary.
//!    - WINDOW_FOUND: measure the time left before today's close.
//!    - FITS_TODAY: the rest of the job fits, so it ends here.
//!    - SPILLS_TO_NEXT_PERIOD: consume today, continue tomorrow.
//! 4. The job's end becomes the next job's anchor; priorities are
//!    renumbered `1..=N`.
//!
//! # Complexity
//! O(n * c) where n = queued jobs and c = calendar cycles per job (capped).

use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::duration::processing_duration;
use super::queue::build_queue;
use crate::config::SchedulerConfig;
use crate::error::{DurationError, Result, ScheduleError};
use crate::models::{FlaggedJob, Job, ScheduleOutcome, WorkCenter, WorkCenterCalendar};

/// Where one job landed on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First instant the job holds the work center.
    pub start: NaiveDateTime,
    /// Instant the last of the work completes.
    pub end: NaiveDateTime,
    /// Calendar cycles spent (window visits plus skipped days).
    pub cycles: u32,
}

/// Outcome of scheduling every work center at once.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// The full input job list with scheduled jobs replaced by id.
    pub jobs: Vec<Job>,
    /// Per-center results, in work center order.
    pub outcomes: Vec<ScheduleOutcome>,
    /// Centers whose run aborted; their jobs are left as received.
    pub failures: Vec<(WorkCenter, ScheduleError)>,
}

impl BatchOutcome {
    /// Jobs flagged across all centers.
    pub fn flagged(&self) -> impl Iterator<Item = &FlaggedJob> {
        self.outcomes.iter().flat_map(|o| o.flagged.iter())
    }
}

/// Sequential work-center scheduler.
///
/// Pure: reads jobs and calendar, returns new job records, never touches
/// I/O or global state. Identical inputs give identical outputs.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wc_schedule::models::{Job, WorkCenter, WorkCenterCalendar};
/// use wc_schedule::scheduler::WorkCenterScheduler;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(6, 0, 0).unwrap();
/// let jobs = vec![
///     Job::new("J1")
///         .with_work_center(WorkCenter::Q)
///         .with_priority(1)
///         .with_quantities(120.0, 0.0)
///         .with_units_per_hour(60.0),
/// ];
///
/// let scheduler = WorkCenterScheduler::new();
/// let outcome = scheduler
///     .schedule(&jobs, &WorkCenterCalendar::standard(), WorkCenter::Q, now)
///     .unwrap()
///     .unwrap();
/// assert_eq!(outcome.jobs[0].scheduled_start, Some(now));
/// assert_eq!(outcome.jobs[0].scheduled_end, Some(now + chrono::Duration::hours(2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkCenterScheduler {
    config: SchedulerConfig,
}

impl WorkCenterScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules the queue of one work center.
    ///
    /// The first job is anchored at `now`; each following job at the
    /// previous job's end. Returns `Ok(None)` when there is nothing to
    /// schedule (sentinel center, empty input, or no job at this center).
    ///
    /// # Errors
    /// [`ScheduleError::Overflow`] if a job cannot be placed within the
    /// configured cycle cap, [`ScheduleError::InvalidInstant`] if date
    /// arithmetic leaves the representable range. Either aborts the whole
    /// run: later jobs would be anchored on a missing end.
    pub fn schedule(
        &self,
        jobs: &[Job],
        calendar: &WorkCenterCalendar,
        work_center: WorkCenter,
        now: NaiveDateTime,
    ) -> Result<Option<ScheduleOutcome>> {
        let Some(queue) = build_queue(jobs, work_center) else {
            return Ok(None);
        };

        let mut outcome = ScheduleOutcome::new(work_center);
        let mut anchor = now;

        for job in queue {
            let duration_ms = match processing_duration(&job, self.config.quantity_basis) {
                Ok(ms) => ms,
                Err(reason) => {
                    warn!(
                        job_id = %job.id,
                        work_center = %work_center,
                        reason = %reason,
                        "job flagged, not scheduled"
                    );
                    outcome.flagged.push(FlaggedJob { job, reason });
                    continue;
                }
            };

            let placement = self.place(calendar, work_center, &job.id, anchor, duration_ms)?;
            debug!(
                job_id = %job.id,
                work_center = %work_center,
                start = %placement.start,
                end = %placement.end,
                cycles = placement.cycles,
                "job placed"
            );

            let mut updated = job;
            updated.priority = i32::try_from(outcome.jobs.len() + 1).unwrap_or(i32::MAX);
            updated.scheduled_start = Some(placement.start);
            updated.scheduled_end = Some(placement.end);
            outcome.jobs.push(updated);

            anchor = placement.end;
        }

        Ok(Some(outcome))
    }

    /// Places `duration_ms` of work on `center` starting no earlier than
    /// `candidate`.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidDuration`] if `duration_ms` is not positive
    /// ([`processing_duration`](super::processing_duration) never yields
    /// one), otherwise as for [`schedule`](Self::schedule).
    pub fn place(
        &self,
        calendar: &WorkCenterCalendar,
        center: WorkCenter,
        job_id: &str,
        candidate: NaiveDateTime,
        duration_ms: i64,
    ) -> Result<Placement> {
        if duration_ms <= 0 {
            return Err(ScheduleError::InvalidDuration {
                job_id: job_id.to_string(),
                reason: DurationError::ZeroDuration,
            });
        }

        let max_cycles = self.config.max_cycles;
        let overflow = || ScheduleError::Overflow {
            job_id: job_id.to_string(),
            work_center: center,
            max_cycles,
        };

        let mut cursor = candidate;
        let mut remaining = duration_ms;
        let mut start: Option<NaiveDateTime> = None;
        let mut cycles: u32 = 0;

        loop {
            if cycles >= max_cycles {
                return Err(overflow());
            }

            // SEEKING_OPEN
            if !calendar.is_open(center, cursor) {
                let next = calendar
                    .next_opening(center, cursor, max_cycles - cycles)
                    .ok_or_else(overflow)?;
                let skipped = (next.date() - cursor.date()).num_days();
                cycles = cycles.saturating_add(u32::try_from(skipped).unwrap_or(u32::MAX));
                cursor = next;
                if cycles >= max_cycles {
                    return Err(overflow());
                }
            }
            cycles += 1;

            // WINDOW_FOUND
            let scheduled_start = *start.get_or_insert(cursor);
            let close = calendar.closing_instant(center, cursor);
            if close <= cursor {
                debug!(job_id, work_center = %center, cursor = %cursor, "closing already passed");
                cursor = next_day(cursor, job_id)?;
                continue;
            }

            let available = (close - cursor).num_milliseconds();
            if remaining <= available {
                // FITS_TODAY
                let end = add_ms(cursor, remaining, job_id)?.min(close);
                return Ok(Placement {
                    start: scheduled_start,
                    end,
                    cycles,
                });
            }

            // SPILLS_TO_NEXT_PERIOD
            remaining -= available;
            debug!(
                job_id,
                work_center = %center,
                consumed_ms = available,
                remaining_ms = remaining,
                "spilling into next period"
            );
            cursor = next_day(cursor, job_id)?;
        }
    }

    /// Schedules every non-sentinel work center.
    ///
    /// A failing center is recorded in `failures` and does not stop the
    /// others.
    pub fn schedule_all(
        &self,
        jobs: &[Job],
        calendar: &WorkCenterCalendar,
        now: NaiveDateTime,
    ) -> BatchOutcome {
        let mut outcomes = Vec::new();
        let mut failures = Vec::new();

        for center in WorkCenter::schedulable() {
            match self.schedule(jobs, calendar, center, now) {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                Err(e) => {
                    warn!(work_center = %center, error = %e, "work center run aborted");
                    failures.push((center, e));
                }
            }
        }

        let updated: Vec<&Job> = outcomes.iter().flat_map(|o| o.jobs.iter()).collect();
        BatchOutcome {
            jobs: merge_updates(jobs, updated),
            outcomes,
            failures,
        }
    }
}

/// Replaces jobs in `jobs` by id with their counterpart in `updated`.
///
/// Order of `jobs` is preserved; updated jobs with unknown ids are
/// ignored.
pub fn merge_updates<'a>(jobs: &[Job], updated: impl IntoIterator<Item = &'a Job>) -> Vec<Job> {
    let by_id: HashMap<&str, &Job> = updated.into_iter().map(|j| (j.id.as_str(), j)).collect();
    jobs.iter()
        .map(|job| by_id.get(job.id.as_str()).map_or_else(|| job.clone(), |&u| u.clone()))
        .collect()
}

/// Midnight of the day after `cursor`.
fn next_day(cursor: NaiveDateTime, job_id: &str) -> Result<NaiveDateTime> {
    cursor
        .date()
        .succ_opt()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ScheduleError::InvalidInstant {
            job_id: job_id.to_string(),
            detail: format!("no day after {cursor}"),
        })
}

fn add_ms(instant: NaiveDateTime, ms: i64, job_id: &str) -> Result<NaiveDateTime> {
    instant
        .checked_add_signed(Duration::milliseconds(ms))
        .ok_or_else(|| ScheduleError::InvalidInstant {
            job_id: job_id.to_string(),
            detail: format!("{instant} + {ms} ms is out of range"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuantityBasis;
    use crate::models::{CalendarRow, OperatingWindow};
    use chrono::{NaiveDate, Weekday};

    // 2024-03-04 is a Monday.
    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn window(raw: &str) -> OperatingWindow {
        OperatingWindow::parse(raw).unwrap()
    }

    /// Job needing `minutes` of run time (60 units at 60 per hour = 1 h).
    fn job_minutes(id: &str, priority: i32, minutes: f64) -> Job {
        Job::new(id)
            .with_work_center(WorkCenter::Q)
            .with_priority(priority)
            .with_quantities(minutes, 0.0)
            .with_units_per_hour(60.0)
    }

    fn run(jobs: &[Job], now: NaiveDateTime) -> ScheduleOutcome {
        WorkCenterScheduler::new()
            .schedule(jobs, &WorkCenterCalendar::standard(), WorkCenter::Q, now)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_fits_in_one_day_boundary_exact() {
        let outcome = run(&[job_minutes("J1", 1, 660.0)], at(4, 6, 0));
        let j = &outcome.jobs[0];
        assert_eq!(j.scheduled_start, Some(at(4, 6, 0)));
        assert_eq!(j.scheduled_end, Some(at(4, 17, 0)));
    }

    #[test]
    fn test_single_spillover() {
        let outcome = run(&[job_minutes("J1", 1, 720.0)], at(4, 6, 0));
        let j = &outcome.jobs[0];
        assert_eq!(j.scheduled_start, Some(at(4, 6, 0)));
        assert_eq!(j.scheduled_end, Some(at(5, 7, 0)));
    }

    #[test]
    fn test_multi_day_spillover() {
        // 30 h of work at 11 h/day: 11 + 11 + 8.
        let outcome = run(&[job_minutes("J1", 1, 1800.0)], at(4, 6, 0));
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(6, 14, 0)));
    }

    #[test]
    fn test_start_after_close_moves_to_next_opening() {
        let outcome = run(&[job_minutes("J1", 1, 60.0)], at(4, 18, 0));
        let j = &outcome.jobs[0];
        assert_eq!(j.scheduled_start, Some(at(5, 6, 0)));
        assert_eq!(j.scheduled_end, Some(at(5, 7, 0)));
    }

    #[test]
    fn test_start_before_open_snaps_to_opening() {
        let outcome = run(&[job_minutes("J1", 1, 30.0)], at(4, 3, 17));
        assert_eq!(outcome.jobs[0].scheduled_start, Some(at(4, 6, 0)));
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(4, 6, 30)));
    }

    #[test]
    fn test_precise_opening_not_overshot() {
        let calendar = WorkCenterCalendar::new(window("06:45-15:10"));
        let outcome = WorkCenterScheduler::new()
            .schedule(&[job_minutes("J1", 1, 15.0)], &calendar, WorkCenter::Q, at(4, 5, 10))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.jobs[0].scheduled_start, Some(at(4, 6, 45)));
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(4, 7, 0)));
    }

    #[test]
    fn test_chain_abuts_and_renumbers() {
        let jobs = vec![
            job_minutes("c", 30, 120.0),
            job_minutes("a", 10, 600.0),
            job_minutes("b", 20, 60.0),
        ];
        let outcome = run(&jobs, at(4, 6, 0));
        let ids: Vec<&str> = outcome.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        let priorities: Vec<i32> = outcome.jobs.iter().map(|j| j.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);

        // a: 06:00-16:00, b: 16:00-17:00, c starts at b's end (the close)
        // and runs the next morning.
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(4, 16, 0)));
        assert_eq!(outcome.jobs[1].scheduled_start, Some(at(4, 16, 0)));
        assert_eq!(outcome.jobs[1].scheduled_end, Some(at(4, 17, 0)));
        assert_eq!(outcome.jobs[2].scheduled_start, Some(at(4, 17, 0)));
        assert_eq!(outcome.jobs[2].scheduled_end, Some(at(5, 8, 0)));
    }

    #[test]
    fn test_closed_weekend_is_skipped() {
        let calendar = WorkCenterCalendar::standard()
            .with_weekday(WorkCenter::Q, Weekday::Sat, OperatingWindow::closed())
            .with_weekday(WorkCenter::Q, Weekday::Sun, OperatingWindow::closed());
        // Friday 15:00, 4 h of work: 2 h Friday, 2 h Monday.
        let outcome = WorkCenterScheduler::new()
            .schedule(&[job_minutes("J1", 1, 240.0)], &calendar, WorkCenter::Q, at(8, 15, 0))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.jobs[0].scheduled_start, Some(at(8, 15, 0)));
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(11, 8, 0)));
    }

    #[test]
    fn test_holiday_override_is_skipped() {
        let holiday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let calendar = WorkCenterCalendar::standard().with_date(
            WorkCenter::Q,
            holiday,
            OperatingWindow::closed(),
        );
        let outcome = WorkCenterScheduler::new()
            .schedule(&[job_minutes("J1", 1, 720.0)], &calendar, WorkCenter::Q, at(4, 6, 0))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(6, 7, 0)));
    }

    #[test]
    fn test_zero_throughput_is_flagged_and_queue_continues() {
        let jobs = vec![
            job_minutes("ok-1", 1, 60.0),
            job_minutes("broken", 2, 60.0).with_units_per_hour(0.0),
            job_minutes("ok-2", 3, 60.0),
        ];
        let outcome = run(&jobs, at(4, 6, 0));

        assert_eq!(outcome.job_count(), 2);
        assert_eq!(outcome.jobs[0].id, "ok-1");
        assert_eq!(outcome.jobs[1].id, "ok-2");
        assert_eq!(outcome.jobs[1].priority, 2);
        assert_eq!(outcome.jobs[1].scheduled_start, Some(at(4, 7, 0)));

        let flagged = outcome.flagged_job("broken").unwrap();
        assert_eq!(flagged.reason, DurationError::NonPositiveRate { rate: 0.0 });
        assert_eq!(flagged.job.priority, 2);
        assert_eq!(flagged.job.scheduled_start, None);
    }

    #[test]
    fn test_only_flagged_jobs_still_reports() {
        let jobs = vec![job_minutes("broken", 1, 60.0).with_units_per_hour(f64::NAN)];
        let outcome = run(&jobs, at(4, 6, 0));
        assert_eq!(outcome.job_count(), 0);
        assert_eq!(outcome.flagged.len(), 1);
    }

    #[test]
    fn test_nothing_to_schedule() {
        let scheduler = WorkCenterScheduler::new();
        let calendar = WorkCenterCalendar::standard();
        let jobs = vec![job_minutes("J1", 1, 60.0)];
        assert_eq!(scheduler.schedule(&[], &calendar, WorkCenter::Q, at(4, 6, 0)), Ok(None));
        assert_eq!(
            scheduler.schedule(&jobs, &calendar, WorkCenter::Unassigned, at(4, 6, 0)),
            Ok(None)
        );
        assert_eq!(scheduler.schedule(&jobs, &calendar, WorkCenter::R, at(4, 6, 0)), Ok(None));
    }

    #[test]
    fn test_never_open_calendar_overflows() {
        let calendar = WorkCenterCalendar::new(OperatingWindow::default_window())
            .with_every_day(WorkCenter::Q, OperatingWindow::closed());
        let err = WorkCenterScheduler::new()
            .schedule(&[job_minutes("J1", 1, 60.0)], &calendar, WorkCenter::Q, at(4, 6, 0))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Overflow {
                job_id: "J1".to_string(),
                work_center: WorkCenter::Q,
                max_cycles: 100,
            }
        );
    }

    #[test]
    fn test_long_job_exceeds_cycle_cap() {
        let scheduler = WorkCenterScheduler::new()
            .with_config(SchedulerConfig::new().with_max_cycles(3));
        // 40 h needs four 11 h windows.
        let err = scheduler
            .schedule(
                &[job_minutes("J1", 1, 2400.0)],
                &WorkCenterCalendar::standard(),
                WorkCenter::Q,
                at(4, 6, 0),
            )
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Overflow { max_cycles: 3, .. }));

        // Three windows are enough for 33 h.
        let ok = scheduler.schedule(
            &[job_minutes("J1", 1, 1980.0)],
            &WorkCenterCalendar::standard(),
            WorkCenter::Q,
            at(4, 6, 0),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_place_rejects_non_positive_duration() {
        let scheduler = WorkCenterScheduler::new();
        let calendar = WorkCenterCalendar::standard();
        for duration_ms in [0, -60_000] {
            let err = scheduler
                .place(&calendar, WorkCenter::Q, "J1", at(4, 9, 0), duration_ms)
                .unwrap_err();
            assert_eq!(
                err,
                ScheduleError::InvalidDuration {
                    job_id: "J1".to_string(),
                    reason: DurationError::ZeroDuration,
                }
            );
        }
    }

    #[test]
    fn test_config_default_window_drives_placement() {
        let config = SchedulerConfig::new().with_default_window(window("08:00-16:00"));
        let rows = vec![CalendarRow::new("Monday").with_cell("Q", "sometime")];
        let calendar = WorkCenterCalendar::from_rows_with(&rows, &config);

        let outcome = WorkCenterScheduler::new()
            .with_config(config)
            .schedule(&[job_minutes("J1", 1, 60.0)], &calendar, WorkCenter::Q, at(4, 6, 0))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.jobs[0].scheduled_start, Some(at(4, 8, 0)));
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(4, 9, 0)));

        // Tuesday has no row at all, so it also runs on the configured window.
        let outcome = WorkCenterScheduler::new()
            .schedule(&[job_minutes("J1", 1, 540.0)], &calendar, WorkCenter::Q, at(4, 6, 0))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(5, 9, 0)));
    }

    #[test]
    fn test_place_reports_cycles() {
        let scheduler = WorkCenterScheduler::new();
        let calendar = WorkCenterCalendar::standard();
        let p = scheduler
            .place(&calendar, WorkCenter::Q, "J1", at(4, 6, 0), 60_000)
            .unwrap();
        assert_eq!(p.cycles, 1);
        let p = scheduler
            .place(&calendar, WorkCenter::Q, "J1", at(4, 6, 0), 12 * 3_600_000)
            .unwrap();
        assert_eq!(p.cycles, 2);
        assert_eq!(p.end, at(5, 7, 0));
    }

    #[test]
    fn test_rerun_on_output_is_idempotent() {
        let jobs = vec![
            job_minutes("a", 7, 300.0),
            job_minutes("b", 2, 500.0),
            job_minutes("c", 2, 45.0),
            job_minutes("d", 9, 900.0),
        ];
        let now = at(4, 9, 30);
        let first = run(&jobs, now);
        let second = run(&first.jobs, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quantity_basis_from_config() {
        let scheduler = WorkCenterScheduler::new()
            .with_config(SchedulerConfig::new().with_quantity_basis(QuantityBasis::Balance));
        let job = Job::new("J1")
            .with_work_center(WorkCenter::Q)
            .with_quantities(100.0, 120.0)
            .with_units_per_hour(60.0);
        let outcome = scheduler
            .schedule(&[job], &WorkCenterCalendar::standard(), WorkCenter::Q, at(4, 6, 0))
            .unwrap()
            .unwrap();
        assert_eq!(outcome.jobs[0].scheduled_end, Some(at(4, 8, 0)));
    }

    #[test]
    fn test_schedule_all_merges_by_id() {
        let jobs = vec![
            job_minutes("q1", 1, 60.0),
            Job::new("parked").with_work_center(WorkCenter::Unassigned),
            job_minutes("r1", 1, 120.0).with_work_center(WorkCenter::R),
            job_minutes("q2", 2, 60.0),
        ];
        let calendar = WorkCenterCalendar::standard();
        let batch = WorkCenterScheduler::new().schedule_all(&jobs, &calendar, at(4, 6, 0));

        assert!(batch.failures.is_empty());
        assert_eq!(batch.outcomes.len(), 2);
        let ids: Vec<&str> = batch.jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "parked", "r1", "q2"]);
        assert_eq!(batch.jobs[0].scheduled_end, Some(at(4, 7, 0)));
        assert_eq!(batch.jobs[1].scheduled_start, None);
        assert_eq!(batch.jobs[2].scheduled_start, Some(at(4, 6, 0)));
        assert_eq!(batch.jobs[2].scheduled_end, Some(at(4, 8, 0)));
        assert_eq!(batch.jobs[3].scheduled_start, Some(at(4, 7, 0)));
    }

    #[test]
    fn test_schedule_all_isolates_failures() {
        let calendar = WorkCenterCalendar::standard()
            .with_every_day(WorkCenter::R, OperatingWindow::closed());
        let jobs = vec![
            job_minutes("q1", 1, 60.0),
            job_minutes("r1", 1, 60.0).with_work_center(WorkCenter::R),
            job_minutes("bad", 2, 60.0).with_units_per_hour(0.0),
        ];
        let batch = WorkCenterScheduler::new().schedule_all(&jobs, &calendar, at(4, 6, 0));

        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].0, WorkCenter::R);
        assert_eq!(batch.jobs[0].scheduled_end, Some(at(4, 7, 0)));
        assert_eq!(batch.jobs[1].scheduled_end, None);
        assert_eq!(batch.flagged().count(), 1);
    }

    #[test]
    fn test_merge_updates_ignores_unknown() {
        let jobs = vec![Job::new("a"), Job::new("b")];
        let updated = vec![Job::new("b").with_priority(9), Job::new("zzz")];
        let merged = merge_updates(&jobs, &updated);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].priority, 0);
        assert_eq!(merged[1].priority, 9);
    }

    #[test]
    fn test_random_queues_hold_chain_invariants() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let mut calendar = WorkCenterCalendar::standard();
            for weekday in [Weekday::Mon, Weekday::Wed, Weekday::Sat, Weekday::Sun] {
                let window = if rng.random_bool(0.3) {
                    OperatingWindow::closed()
                } else {
                    let open: u32 = rng.random_range(0..12);
                    let close = rng.random_range(open + 1..24);
                    OperatingWindow::from_hm(open, rng.random_range(0..60), close, 0).unwrap()
                };
                calendar = calendar.with_weekday(WorkCenter::Q, weekday, window);
            }

            let jobs: Vec<Job> = (0..rng.random_range(1usize..12))
                .map(|i| {
                    let priority = rng.random_range(0..5);
                    let minutes = f64::from(rng.random_range(1u32..2000));
                    job_minutes(&format!("J{i}"), priority, minutes)
                        .with_setup_minutes(f64::from(rng.random_range(0u32..90)))
                })
                .collect();
            let now = at(4, rng.random_range(0..24), rng.random_range(0..60));

            let outcome = WorkCenterScheduler::new()
                .schedule(&jobs, &calendar, WorkCenter::Q, now)
                .unwrap()
                .unwrap();
            assert_eq!(outcome.job_count(), jobs.len());

            let mut anchor = now;
            for (i, job) in outcome.jobs.iter().enumerate() {
                let start = job.scheduled_start.unwrap();
                let end = job.scheduled_end.unwrap();
                assert_eq!(job.priority, i as i32 + 1);
                assert!(start >= anchor);
                assert!(end > start);
                assert!(calendar.is_open(WorkCenter::Q, start));
                assert!(calendar.is_open(WorkCenter::Q, end));
                if i > 0 {
                    assert_eq!(start, anchor);
                }
                anchor = end;
            }
            assert!(outcome.jobs.windows(2).all(|w| w[0].priority < w[1].priority));
        }
    }

    #[test]
    fn test_invalid_instant_at_calendar_edge() {
        let last_day = NaiveDate::MAX.and_hms_opt(16, 0, 0).unwrap();
        let err = WorkCenterScheduler::new()
            .place(&WorkCenterCalendar::standard(), WorkCenter::Q, "J1", last_day, 2 * 3_600_000)
            .unwrap_err();
        assert!(
            matches!(err, ScheduleError::InvalidInstant { ref job_id, .. } if job_id == "J1"),
            "unexpected error: {err:?}"
        );
    }
}
