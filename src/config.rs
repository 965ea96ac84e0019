//! Timetable configuration.
//!
//! Deserialized from TOML with `serde`. Every field has a default, so an
//! empty document is a valid configuration:
//!
//! ```toml
//! time_step_ms = 900000        # 15 minutes per grid column
//! header_span_ms = 3600000     # one labeled header per hour
//! default_day_start_ms = 28800000
//! default_day_end_ms = 72000000
//! tray_enabled = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TimetableError};
use crate::models::DAY_MS;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Layout configuration supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Grid column granularity (ms).
    pub time_step_ms: i64,
    /// Width of one labeled time header (ms). Must be a multiple of the step.
    pub header_span_ms: i64,
    /// Visible window start when no program is placed (ms after midnight).
    pub default_day_start_ms: i64,
    /// Visible window end when no program is placed (ms after midnight).
    pub default_day_end_ms: i64,
    /// Whether unplaced programs are packed into the overflow tray.
    pub tray_enabled: bool,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            time_step_ms: 15 * MINUTE_MS,
            header_span_ms: HOUR_MS,
            default_day_start_ms: 8 * HOUR_MS,
            default_day_end_ms: 20 * HOUR_MS,
            tray_enabled: true,
        }
    }
}

impl TimetableConfig {
    /// Sets the time step.
    pub fn with_time_step(mut self, time_step_ms: i64) -> Self {
        self.time_step_ms = time_step_ms;
        self
    }

    /// Sets the header span.
    pub fn with_header_span(mut self, header_span_ms: i64) -> Self {
        self.header_span_ms = header_span_ms;
        self
    }

    /// Sets the fallback visible window.
    pub fn with_default_window(mut self, start_ms: i64, end_ms: i64) -> Self {
        self.default_day_start_ms = start_ms;
        self.default_day_end_ms = end_ms;
        self
    }

    /// Enables or disables the tray.
    pub fn with_tray(mut self, enabled: bool) -> Self {
        self.tray_enabled = enabled;
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the invariants the layout engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.time_step_ms <= 0 {
            return Err(TimetableError::Config(format!(
                "time_step_ms must be positive, got {}",
                self.time_step_ms
            )));
        }
        if self.header_span_ms <= 0 || self.header_span_ms % self.time_step_ms != 0 {
            return Err(TimetableError::Config(format!(
                "header_span_ms ({}) must be a positive multiple of time_step_ms ({})",
                self.header_span_ms, self.time_step_ms
            )));
        }
        if self.default_day_start_ms < 0
            || self.default_day_end_ms > DAY_MS
            || self.default_day_start_ms >= self.default_day_end_ms
        {
            return Err(TimetableError::Config(format!(
                "default window [{}, {}) must be non-empty and within one day",
                self.default_day_start_ms, self.default_day_end_ms
            )));
        }
        Ok(())
    }
}
