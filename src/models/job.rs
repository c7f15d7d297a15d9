//! Production job model.
//!
//! A job is one order line on the shop floor: a quantity of a product to
//! run at a work center, at a given rate, after a setup.
//!
//! # Time Representation
//! Instants are shop-local wall-clock times (`NaiveDateTime`). No time
//! zone conversion happens anywhere in the scheduler.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::WorkCenter;

/// A production job.
///
/// Owned by the caller. The scheduler reads jobs and returns updated
/// copies carrying `priority`, `scheduled_start` and `scheduled_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique row identifier.
    pub id: String,
    /// Shop job number.
    #[serde(default)]
    pub job_number: String,
    /// Ordering customer.
    #[serde(default)]
    pub customer: String,
    /// Free-text product description.
    #[serde(default)]
    pub description: String,
    /// Work center the job is queued at.
    pub work_center: WorkCenter,
    /// Queue position (lower = earlier).
    pub priority: i32,
    /// Total units ordered for production.
    pub production_quantity: f64,
    /// Units still outstanding.
    pub balance_quantity: f64,
    /// Throughput at this work center (units per hour).
    pub units_per_hour: f64,
    /// Changeover time before the run (minutes).
    pub setup_minutes: f64,
    /// Promised ship instant. `None` = no commitment.
    #[serde(default)]
    pub requested_ship: Option<NaiveDateTime>,
    /// Computed start of the run.
    #[serde(default)]
    pub scheduled_start: Option<NaiveDateTime>,
    /// Computed end of the run.
    #[serde(default)]
    pub scheduled_end: Option<NaiveDateTime>,
}

impl Job {
    /// Creates an unassigned job with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            job_number: String::new(),
            customer: String::new(),
            description: String::new(),
            work_center: WorkCenter::Unassigned,
            priority: 0,
            production_quantity: 0.0,
            balance_quantity: 0.0,
            units_per_hour: 0.0,
            setup_minutes: 0.0,
            requested_ship: None,
            scheduled_start: None,
            scheduled_end: None,
        }
    }

    /// Sets the job number.
    pub fn with_job_number(mut self, job_number: impl Into<String>) -> Self {
        self.job_number = job_number.into();
        self
    }

    /// Sets the customer.
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = customer.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Assigns the job to a work center.
    pub fn with_work_center(mut self, work_center: WorkCenter) -> Self {
        self.work_center = work_center;
        self
    }

    /// Sets the queue priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets production and balance quantities.
    pub fn with_quantities(mut self, production: f64, balance: f64) -> Self {
        self.production_quantity = production;
        self.balance_quantity = balance;
        self
    }

    /// Sets the throughput rate.
    pub fn with_units_per_hour(mut self, units_per_hour: f64) -> Self {
        self.units_per_hour = units_per_hour;
        self
    }

    /// Sets the setup time in minutes.
    pub fn with_setup_minutes(mut self, setup_minutes: f64) -> Self {
        self.setup_minutes = setup_minutes;
        self
    }

    /// Sets the requested ship instant.
    pub fn with_requested_ship(mut self, requested_ship: NaiveDateTime) -> Self {
        self.requested_ship = Some(requested_ship);
        self
    }

    /// Whether both scheduled instants are present.
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_start.is_some() && self.scheduled_end.is_some()
    }

    /// Span between scheduled start and end (ms), closed periods included.
    pub fn scheduled_span_ms(&self) -> Option<i64> {
        match (self.scheduled_start, self.scheduled_end) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }

    /// How far the scheduled end overshoots the requested ship instant (ms).
    ///
    /// Negative when the job finishes early. `None` if either is missing.
    pub fn lateness_ms(&self) -> Option<i64> {
        match (self.scheduled_end, self.requested_ship) {
            (Some(end), Some(ship)) => Some((end - ship).num_milliseconds()),
            _ => None,
        }
    }
}
