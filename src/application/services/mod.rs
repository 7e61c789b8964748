//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, EnvProvider, WorkflowApi)
//! but are themselves concrete structs, not traits.

mod environment;
mod workflow;

pub use environment::EnvironmentService;
pub use workflow::{DeployPlan, PushOutcome, WorkflowService};
