//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent usage violations detected locally,
/// before any request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Must provide either --id or both --name and --stage")]
    MissingIdentifier,

    #[error("Invalid env format: {0}. Use KEY=VALUE")]
    InvalidEnvOverride(String),

    #[error("Invalid YAML: {message}")]
    InvalidYaml { message: String },

    #[error(
        "Missing required environment variables: {}\nSet them with:\n  export {}=value\nOr use the -e flag:\n  etlr deploy workflow.yaml -e {}=value",
        .names.join(", "),
        first_missing(.names),
        first_missing(.names)
    )]
    MissingEnvironment { names: Vec<String> },
}

fn first_missing(names: &[String]) -> &str {
    names.first().map(String::as_str).unwrap_or("VAR")
}
