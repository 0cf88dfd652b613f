//! Common error infrastructure for dc20-core.
//!
//! Only caller contract violations are errors here. Budget overruns, cap
//! violations and unresolved choices are reported as data through
//! [`crate::validation::ValidationResult`], and unknown trait/feature/talent
//! ids are skipped by the aggregator.

use crate::rules::MAX_LEVEL;

/// Severity level of an error, used for categorization and logging.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Fatal**: computation cannot produce a meaningful result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all dc20-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on whether the caller can fix the input
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Fatal errors raised by [`crate::engine::calculate`].
///
/// Each one means the input cannot describe a real character, so the engine
/// aborts instead of returning a zero-filled result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// No class has been selected yet.
    #[error("character has no class selected")]
    MissingClass,

    /// The class id is not present in the class catalog.
    #[error("unknown class '{0}'")]
    UnknownClass(String),

    /// Level outside `1..=MAX_LEVEL`.
    #[error("level {level} is outside the supported range 1..={max}")]
    InvalidLevel { level: i32, max: u32 },
}

impl EngineError {
    pub(crate) fn invalid_level(level: i32) -> Self {
        Self::InvalidLevel {
            level,
            max: MAX_LEVEL,
        }
    }
}

impl RulesError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingClass | Self::InvalidLevel { .. } => ErrorSeverity::Validation,
            Self::UnknownClass(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingClass => "MISSING_CLASS",
            Self::UnknownClass(_) => "UNKNOWN_CLASS",
            Self::InvalidLevel { .. } => "INVALID_LEVEL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_mentions_range() {
        let err = EngineError::invalid_level(100);
        assert_eq!(err.to_string(), "level 100 is outside the supported range 1..=10");
        assert_eq!(err.error_code(), "INVALID_LEVEL");
        assert_eq!(err.severity().as_str(), "validation");
    }

    #[test]
    fn unknown_class_is_fatal() {
        let err = EngineError::UnknownClass("nonexistent_class".into());
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(err.to_string().contains("nonexistent_class"));
    }
}
