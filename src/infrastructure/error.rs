//! Infrastructure-level errors (configuration, transport, remote API)

use serde_json::Value;
use thiserror::Error;

/// Errors raised at the I/O boundary: talking to the API or the filesystem.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{message}")]
    Config { message: String },

    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status returned by the API.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        details: Option<Value>,
    },

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport {
            message: format!("Request failed: {}", source),
            source,
        }
    }

    /// HTTP status code, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Structured details attached by the API, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
