//! Error types.
//!
//! Scheduling problems are never errors: they are reported as
//! [`Violation`](crate::models::Violation) data. Errors cover configuration
//! loading and failing rule evaluators only.

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Error type for timetable operations.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Rule '{rule}' failed: {message}")]
    Rule { rule: String, message: String },
}

impl TimetableError {
    /// Creates a rule evaluation error.
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        TimetableError::Rule {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
