//! Typed API requests and their JSON wire form
//!
//! Every request is a POST to the same endpoint; the `action` field selects
//! the operation.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{EnvVar, WorkflowRef};

/// One variant per API action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowRequest {
    List,
    Get(WorkflowRef),
    Upsert {
        workflow_yaml: String,
        env: Vec<EnvVar>,
        stage: Option<String>,
    },
    Delete(WorkflowRef),
    Deploy(WorkflowRef),
    Stop(WorkflowRef),
    Status(WorkflowRef),
    ListVersions {
        workflow_id: String,
    },
    GetVersion {
        workflow_id: String,
        version: u32,
    },
    RestoreVersion {
        workflow_id: String,
        version: u32,
    },
}

#[derive(Debug, Default, Serialize)]
struct WirePayload<'a> {
    action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_yaml: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env: Option<&'a [EnvVar]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
}

impl<'a> WirePayload<'a> {
    fn targeting(action: &'static str, target: &'a WorkflowRef) -> Self {
        match target {
            WorkflowRef::Id(id) => Self {
                action,
                workflow_id: Some(id),
                ..Default::default()
            },
            WorkflowRef::NameStage { name, stage } => Self {
                action,
                name: Some(name),
                stage: Some(stage),
                ..Default::default()
            },
        }
    }
}

impl WorkflowRequest {
    pub fn action(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get(_) => "get",
            Self::Upsert { .. } => "upsert",
            Self::Delete(_) => "delete",
            Self::Deploy(_) => "deploy",
            Self::Stop(_) => "stop",
            Self::Status(_) => "status",
            Self::ListVersions { .. } => "list_versions",
            Self::GetVersion { .. } => "get_version",
            Self::RestoreVersion { .. } => "restore_version",
        }
    }

    fn wire(&self) -> WirePayload<'_> {
        let action = self.action();
        match self {
            Self::List => WirePayload {
                action,
                ..Default::default()
            },
            Self::Get(target)
            | Self::Delete(target)
            | Self::Deploy(target)
            | Self::Stop(target)
            | Self::Status(target) => WirePayload::targeting(action, target),
            Self::Upsert {
                workflow_yaml,
                env,
                stage,
            } => WirePayload {
                action,
                workflow_yaml: Some(workflow_yaml),
                env: (!env.is_empty()).then_some(env.as_slice()),
                stage: stage.as_deref(),
                ..Default::default()
            },
            Self::ListVersions { workflow_id } => WirePayload {
                action,
                workflow_id: Some(workflow_id),
                ..Default::default()
            },
            Self::GetVersion {
                workflow_id,
                version,
            }
            | Self::RestoreVersion {
                workflow_id,
                version,
            } => WirePayload {
                action,
                workflow_id: Some(workflow_id),
                version: Some(*version),
                ..Default::default()
            },
        }
    }

    /// JSON body sent to the API.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.wire()).unwrap_or(Value::Null)
    }
}

impl Serialize for WorkflowRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.wire().serialize(serializer)
    }
}
