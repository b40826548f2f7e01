//! Error types for the state core.
//!
//! Errors are classified by recoverability:
//! - Recoverable: bad input, missing records, rejected operations — surfaced
//!   to the caller as structured outcomes, never as panics.
//! - Invariant violations: internally inconsistent collections or poisoned
//!   locks. These have no defined recovery and should fail loudly in tests.

use thiserror::Error;

use crate::types::LaneId;

#[derive(Debug, Error)]
pub enum CoreError {
    // Recoverable operation failures
    #[error("task {id} not found in '{lane}' lane")]
    TaskNotFound { id: u64, lane: LaneId },

    #[error("client {0} not found")]
    ClientNotFound(u64),

    #[error("staff member {0} not found")]
    StaffNotFound(u64),

    #[error("report {0} not found")]
    ReportNotFound(u64),

    #[error("no client named '{0}' in the portfolio")]
    UnknownClientName(String),

    #[error("{field}: {reason}")]
    Validation { field: &'static str, reason: String },

    // Invariant violations
    #[error("internal state lock poisoned")]
    LockPoisoned,
}

impl CoreError {
    /// True for failures the caller is expected to handle and surface.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CoreError::LockPoisoned)
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Serializable error representation for the presentation boundary.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationError {
    pub message: String,
    pub recoverable: bool,
}

impl From<&CoreError> for OperationError {
    fn from(err: &CoreError) -> Self {
        OperationError {
            message: err.to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}
