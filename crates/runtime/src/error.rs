//! Unified error types surfaced by the runtime API.
//!
//! Wraps engine contract violations and content loading failures so callers
//! can bubble them up with consistent context.
use dc20_core::{EngineError, ErrorSeverity, RulesError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to load rules content: {0}")]
    Content(String),

    #[error("failed to fingerprint build input")]
    Fingerprint(#[source] serde_json::Error),
}

impl RuntimeError {
    pub(crate) fn content(err: impl std::fmt::Display) -> Self {
        Self::Content(format!("{err:#}"))
    }

    /// The engine error behind this failure, if any.
    pub fn engine_error(&self) -> Option<&EngineError> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Content(_) | Self::Fingerprint(_) => None,
        }
    }
}

impl RulesError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(err) => err.severity(),
            Self::Content(_) | Self::Fingerprint(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.error_code(),
            Self::Content(_) => "CONTENT_LOAD_FAILED",
            Self::Fingerprint(_) => "FINGERPRINT_FAILED",
        }
    }
}
