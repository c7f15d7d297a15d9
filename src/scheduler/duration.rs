//! Processing-time estimation.
//!
//! # Formula
//! `quantity / units_per_hour * 3_600_000 + setup_minutes * 60_000` ms,
//! rounded to the nearest millisecond, where `quantity` is selected by
//! [`QuantityBasis`].

use crate::config::QuantityBasis;
use crate::error::{DurationError, DurationField};
use crate::models::Job;

const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;

/// Longest run the estimator will hand to the calendar walk (hours).
const MAX_DURATION_HOURS: f64 = 1_000_000.0;

/// Computes how long `job` occupies its work center, in milliseconds.
///
/// The result is always positive. Unusable inputs (non-finite numbers,
/// a non-positive rate, negative quantity or setup, or nothing left to
/// do) are reported as [`DurationError`].
pub fn processing_duration(job: &Job, basis: QuantityBasis) -> Result<i64, DurationError> {
    let rate = finite(job.units_per_hour, DurationField::UnitsPerHour)?;
    let setup = finite(job.setup_minutes, DurationField::SetupMinutes)?;
    let balance = finite(job.balance_quantity, DurationField::BalanceQuantity)?;
    let quantity = match basis {
        QuantityBasis::ProductionLessBalance => {
            finite(job.production_quantity, DurationField::ProductionQuantity)? - balance
        }
        QuantityBasis::Balance => balance,
    };

    if rate <= 0.0 {
        return Err(DurationError::NonPositiveRate { rate });
    }
    if quantity < 0.0 {
        return Err(DurationError::NegativeQuantity { quantity });
    }
    if setup < 0.0 {
        return Err(DurationError::NegativeSetup { minutes: setup });
    }

    let hours = quantity / rate + setup * MS_PER_MINUTE / MS_PER_HOUR;
    if !hours.is_finite() || hours > MAX_DURATION_HOURS {
        return Err(DurationError::OutOfRange { hours });
    }

    let ms = ((quantity / rate) * MS_PER_HOUR + setup * MS_PER_MINUTE).round() as i64;
    if ms <= 0 {
        return Err(DurationError::ZeroDuration);
    }
    Ok(ms)
}

fn finite(value: f64, field: DurationField) -> Result<f64, DurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DurationError::NonFinite { field })
    }
}
