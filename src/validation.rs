//! Input validation for job records.
//!
//! Checks structural integrity of jobs before they are persisted or
//! handed to the scheduler. Detects:
//! - Empty and duplicate job ids
//! - Negative quantities, rates and setup times
//! - Balance exceeding production
//! - Non-finite numbers
//!
//! Scheduling does not depend on these checks: the scheduler flags jobs
//! whose duration cannot be computed. Validation reports every problem at
//! once so an editor can show them together.

use std::collections::HashSet;

use crate::models::Job;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same id.
    DuplicateId,
    /// A job has a blank id.
    EmptyId,
    /// A quantity, rate or setup time is negative.
    NegativeValue,
    /// More units remain than were ordered.
    BalanceExceedsProduction,
    /// A numeric field is NaN or infinite.
    NonFiniteValue,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a job list.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if job.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Job '{}' has an empty id", job.job_number),
            ));
        } else if !ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        let fields = [
            ("production_quantity", job.production_quantity),
            ("balance_quantity", job.balance_quantity),
            ("units_per_hour", job.units_per_hour),
            ("setup_minutes", job.setup_minutes),
        ];
        let mut all_finite = true;
        for (name, value) in fields {
            if !value.is_finite() {
                all_finite = false;
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonFiniteValue,
                    format!("Job '{}' has non-finite {name}", job.id),
                ));
            } else if value < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeValue,
                    format!("Job '{}' has negative {name}: {value}", job.id),
                ));
            }
        }

        if all_finite && job.balance_quantity > job.production_quantity {
            errors.push(ValidationError::new(
                ValidationErrorKind::BalanceExceedsProduction,
                format!(
                    "Job '{}' balance {} exceeds production {}",
                    job.id, job.balance_quantity, job.production_quantity
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
