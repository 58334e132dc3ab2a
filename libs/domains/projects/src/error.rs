use thiserror::Error;
use tonic::Code;

use crate::models::ProjectState;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Cannot convert project: unsupported state {0}")]
    InvalidState(i32),

    #[error("Cannot convert project: invalid {field}: {reason}")]
    InvalidTimestamp { field: &'static str, reason: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Project '{0}' already exists")]
    AlreadyExists(String),

    #[error("Cannot move project from {from} to {to}")]
    InvalidTransition { from: ProjectState, to: ProjectState },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl ProjectError {
    /// Machine-readable status code for this error.
    pub fn code(&self) -> Code {
        match self {
            ProjectError::InvalidState(_)
            | ProjectError::InvalidTimestamp { .. }
            | ProjectError::Validation(_) => Code::InvalidArgument,
            ProjectError::NotFound(_) => Code::NotFound,
            ProjectError::AlreadyExists(_) | ProjectError::InvalidTransition { .. } => {
                Code::FailedPrecondition
            }
            ProjectError::Internal(_) => Code::Internal,
        }
    }
}
