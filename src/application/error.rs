//! Application-level errors (wraps domain and infrastructure errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// Application errors wrap domain and infrastructure errors and add
/// application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("No workflow.yaml found in current directory. Provide a file or use --id/--name flags.")]
    DefaultWorkflowFileMissing,

    #[error("workflow file not found: {0}")]
    WorkflowFileNotFound(PathBuf),

    #[error("Could not get workflow ID from push response")]
    MissingWorkflowId,

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// The API error inside this error, if any.
    pub fn as_infra(&self) -> Option<&InfraError> {
        match self {
            Self::Infra(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
