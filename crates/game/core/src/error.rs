//! Common error infrastructure for game-core.
//!
//! Domain errors (`ReplyError`, `StepRejection`, `StateError`) live next to
//! the code that produces them. None of them is fatal to the tick loop: each is
//! either dropped silently or turned into text for the error surface.

use crate::action::{ReplyError, StepRejection};
use crate::state::StateError;

/// Severity level of an error; the runtime picks a log level from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Expected steady-state refusal, dropped without surfacing.
    ///
    /// Examples: destination blocked, direction locked
    Recoverable,

    /// Invalid input, surfaced to the user and otherwise ignored.
    ///
    /// Examples: unparseable reply, unknown direction name
    Validation,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl GameError for ReplyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ReplyError::Schema { .. } => "REPLY_SCHEMA",
            ReplyError::Validation { .. } => "REPLY_VALIDATION",
        }
    }
}

impl GameError for StepRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            StepRejection::DirectionLocked { .. } => "STEP_DIRECTION_LOCKED",
            StepRejection::OutOfBounds { .. } => "STEP_OUT_OF_BOUNDS",
            StepRejection::Blocked { .. } => "STEP_BLOCKED",
        }
    }
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::StartOutOfBounds { .. } => "STATE_START_OUT_OF_BOUNDS",
            StateError::StartBlocked { .. } => "STATE_START_BLOCKED",
        }
    }
}
