//! CLI-level errors (wraps application errors)

use serde_json::Value;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        Self::Application(e.into())
    }
}

impl From<InfraError> for CliError {
    fn from(e: InfraError) -> Self {
        Self::Application(e.into())
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Every failure exits with the same code; scripts only distinguish
    /// success from failure.
    pub fn exit_code(&self) -> i32 {
        crate::exitcode::FAILURE
    }

    /// HTTP status code of an API error.
    pub fn status(&self) -> Option<u16> {
        self.infra().and_then(InfraError::status)
    }

    /// Structured details of an API error.
    pub fn details(&self) -> Option<&Value> {
        self.infra().and_then(InfraError::details)
    }

    fn infra(&self) -> Option<&InfraError> {
        match self {
            Self::Application(e) => e.as_infra(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn given_api_error_when_reporting_then_exposes_status_and_details() {
        let err: CliError = InfraError::Api {
            message: "Workflow not found".into(),
            status: Some(404),
            details: Some(json!({"id": "x"})),
        }
        .into();

        assert_eq!(err.to_string(), "Workflow not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.details(), Some(&json!({"id": "x"})));
        assert_eq!(err.exit_code(), crate::exitcode::FAILURE);
    }

    #[test]
    fn given_domain_error_when_reporting_then_no_status() {
        let err: CliError = DomainError::MissingIdentifier.into();

        assert_eq!(
            err.to_string(),
            "Must provide either --id or both --name and --stage"
        );
        assert_eq!(err.status(), None);
        assert_eq!(err.exit_code(), 1);
    }
}
