//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{EnvironmentService, WorkflowService};
use crate::config::Settings;
use crate::infrastructure::client::{ClientConfig, WorkflowsClient};
use crate::infrastructure::traits::{
    EnvProvider, FileSystem, ProcessEnv, Prompter, RealFileSystem, TerminalPrompter, WorkflowApi,
};
use crate::infrastructure::InfraResult;

/// Container holding the I/O boundaries and application settings.
///
/// The API client is built on first use so commands that never reach the
/// network (aborted confirmations, usage errors) don't require an API key.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Process environment abstraction
    pub env: Arc<dyn EnvProvider>,

    /// Confirmation prompts
    pub prompter: Arc<dyn Prompter>,

    api_key: Option<String>,
    api: Option<Arc<dyn WorkflowApi>>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, api_key: Option<String>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs: Arc::new(RealFileSystem),
            env: Arc::new(ProcessEnv),
            prompter: Arc::new(TerminalPrompter),
            api_key,
            api: None,
        }
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn EnvProvider>,
        prompter: Arc<dyn Prompter>,
        api: Arc<dyn WorkflowApi>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            env,
            prompter,
            api_key: None,
            api: Some(api),
        }
    }

    /// API client: the injected one, or a real client built from settings.
    pub fn api(&self) -> InfraResult<Arc<dyn WorkflowApi>> {
        if let Some(api) = &self.api {
            return Ok(Arc::clone(api));
        }
        let config = ClientConfig::from_settings(&self.settings, self.api_key.as_deref());
        Ok(Arc::new(WorkflowsClient::new(config)?))
    }

    pub fn environment_service(&self) -> EnvironmentService {
        EnvironmentService::new(Arc::clone(&self.env))
    }

    pub fn workflow_service(&self) -> InfraResult<WorkflowService> {
        Ok(WorkflowService::new(
            self.api()?,
            Arc::clone(&self.fs),
            self.environment_service(),
        ))
    }
}
