use crate::app::recovery::get_suggestions;
use crate::domain::errors::{ErrorKind, GenerationError};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

/// The banner shown after a failed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub severity: ErrorSeverity,
    pub suggestions: Vec<String>,
}

impl ErrorState {
    #[must_use]
    pub fn from_generation(err: &GenerationError) -> Self {
        let severity = match err.kind() {
            ErrorKind::Connectivity => ErrorSeverity::Warning,
            ErrorKind::Provider => ErrorSeverity::Error,
            ErrorKind::Unknown => ErrorSeverity::Critical,
        };
        Self {
            message: err.message().to_string(),
            timestamp: Local::now(),
            severity,
            suggestions: get_suggestions(err),
        }
    }
}
