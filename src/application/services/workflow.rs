//! Deploy-from-file use case
//!
//! Reading the workflow file, reconciling its environment, pushing it with
//! `upsert` and deploying the result. The command layer drives the steps so
//! it can report progress between them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::application::services::EnvironmentService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    EnvOverride, EnvVar, StageSelection, UpsertResponse, WorkflowDefinition, WorkflowRef,
};
use crate::infrastructure::traits::{FileSystem, WorkflowApi};
use crate::infrastructure::InfraError;

/// File picked up when `deploy` gets neither a file nor an identifier.
pub const DEFAULT_WORKFLOW_FILE: &str = "workflow.yaml";

/// Everything needed to push a workflow, validated locally.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub path: PathBuf,
    pub workflow_yaml: String,
    pub definition: WorkflowDefinition,
    pub env: Vec<EnvVar>,
    pub stage: StageSelection,
}

impl DeployPlan {
    /// Stage sent with `upsert`; `None` leaves the YAML's stage in effect.
    pub fn stage_override(&self) -> Option<&str> {
        self.stage.override_stage()
    }

    /// Stage the workflow ends up in: the override, else the YAML's.
    pub fn effective_stage(&self) -> Option<&str> {
        self.stage.effective(self.definition.stage.as_deref())
    }
}

/// Result of pushing a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct PushOutcome {
    pub created: bool,
    pub target: WorkflowRef,
    pub name: Option<String>,
    pub stage: Option<String>,
    pub response: Value,
}

impl PushOutcome {
    /// `name/stage` when both are known.
    pub fn label(&self) -> Option<String> {
        match (&self.name, &self.stage) {
            (Some(name), Some(stage)) => Some(format!("{}/{}", name, stage)),
            _ => None,
        }
    }
}

/// Service for pushing and deploying workflow definitions.
pub struct WorkflowService {
    api: Arc<dyn WorkflowApi>,
    fs: Arc<dyn FileSystem>,
    environment: EnvironmentService,
}

impl WorkflowService {
    pub fn new(
        api: Arc<dyn WorkflowApi>,
        fs: Arc<dyn FileSystem>,
        environment: EnvironmentService,
    ) -> Self {
        Self {
            api,
            fs,
            environment,
        }
    }

    /// Resolve the workflow file: the given path, or `workflow.yaml` in the
    /// current directory.
    pub fn locate(&self, file: Option<&Path>) -> ApplicationResult<PathBuf> {
        match file {
            Some(path) if self.fs.is_file(path) => Ok(path.to_path_buf()),
            Some(path) => Err(ApplicationError::WorkflowFileNotFound(path.to_path_buf())),
            None => {
                let default = PathBuf::from(DEFAULT_WORKFLOW_FILE);
                if self.fs.is_file(&default) {
                    Ok(default)
                } else {
                    Err(ApplicationError::DefaultWorkflowFileMissing)
                }
            }
        }
    }

    /// Read the file and reconcile its environment. No network access.
    #[instrument(skip(self, overrides))]
    pub fn prepare(
        &self,
        path: &Path,
        stage: StageSelection,
        overrides: &[EnvOverride],
    ) -> ApplicationResult<DeployPlan> {
        let workflow_yaml = self
            .fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
        let definition = WorkflowDefinition::parse(&workflow_yaml)?;
        let env = self
            .environment
            .reconcile(&definition.environment, overrides)?;
        debug!("prepared {}: {} env vars", path.display(), env.len());

        Ok(DeployPlan {
            path: path.to_path_buf(),
            workflow_yaml,
            definition,
            env,
            stage,
        })
    }

    /// Create or update the workflow and extract its identity.
    #[instrument(skip(self, plan), fields(path = %plan.path.display()))]
    pub fn push(&self, plan: &DeployPlan) -> ApplicationResult<PushOutcome> {
        let response =
            self.api
                .upsert_workflow(&plan.workflow_yaml, &plan.env, plan.stage_override())?;
        let view = UpsertResponse::from_value(&response);
        let workflow = view.workflow.unwrap_or_default();

        let id = workflow
            .id
            .filter(|id| !id.is_empty())
            .ok_or(ApplicationError::MissingWorkflowId)?;
        info!("pushed workflow {} (created={})", id, view.created);

        // The response is authoritative; the plan fills in what it omits
        Ok(PushOutcome {
            created: view.created,
            target: WorkflowRef::Id(id),
            name: workflow.name.or_else(|| plan.definition.name.clone()),
            stage: workflow
                .stage
                .or_else(|| plan.effective_stage().map(str::to_string)),
            response,
        })
    }

    pub fn deploy(&self, target: &WorkflowRef) -> ApplicationResult<Value> {
        info!("deploying {}", target);
        Ok(self.api.deploy_workflow(target)?)
    }
}
