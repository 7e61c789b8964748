//! Infrastructure layer: I/O implementations, API client and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod client;
pub mod di;
pub mod error;
pub mod request;
pub mod traits;

pub use client::{ClientConfig, WorkflowsClient};
pub use error::{InfraError, InfraResult};
pub use request::WorkflowRequest;
