//! Scheduler configuration.
//!
//! All fields have defaults, so an empty JSON object is a valid config.
//!
//! ```
//! use wc_schedule::config::{QuantityBasis, SchedulerConfig};
//!
//! let config = SchedulerConfig::from_json(r#"{"max_cycles": 250}"#).unwrap();
//! assert_eq!(config.max_cycles, 250);
//! assert_eq!(config.quantity_basis, QuantityBasis::ProductionLessBalance);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, ConfigError};
use crate::models::OperatingWindow;

/// Default cap on calendar cycles walked for a single job.
pub const DEFAULT_MAX_CYCLES: u32 = 100;

/// Which quantity a job's run time is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityBasis {
    /// `production_quantity - balance_quantity`.
    #[default]
    ProductionLessBalance,
    /// `balance_quantity` alone.
    Balance,
}

/// Tunables for a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Window used for calendar cells that are missing or unreadable
    /// (applied by `WorkCenterCalendar::from_rows_with`).
    pub default_window: OperatingWindow,
    /// Calendar cycles (window visits plus skipped days) allowed per job.
    pub max_cycles: u32,
    /// Quantity term of the duration formula.
    pub quantity_basis: QuantityBasis,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_window: OperatingWindow::default_window(),
            max_cycles: DEFAULT_MAX_CYCLES,
            quantity_basis: QuantityBasis::default(),
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default window.
    pub fn with_default_window(mut self, window: OperatingWindow) -> Self {
        self.default_window = window;
        self
    }

    /// Sets the cycle cap.
    pub fn with_max_cycles(mut self, max_cycles: u32) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Sets the quantity basis.
    pub fn with_quantity_basis(mut self, basis: QuantityBasis) -> Self {
        self.quantity_basis = basis;
        self
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cycles == 0 {
            return Err(ConfigError::InvalidMaxCycles);
        }
        if self.default_window.is_closed() {
            return Err(ConfigError::DefaultWindow(CalendarError::InvalidEntry(
                self.default_window.to_string(),
            )));
        }
        Ok(())
    }
}
