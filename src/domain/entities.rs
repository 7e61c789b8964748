//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// How a workflow is addressed by the API.
///
/// A UUID always wins over the (name, stage) composite key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowRef {
    Id(String),
    NameStage { name: String, stage: String },
}

impl WorkflowRef {
    /// Resolve CLI identifier options into a reference.
    ///
    /// Empty strings count as absent.
    pub fn resolve(
        id: Option<&str>,
        name: Option<&str>,
        stage: Option<&str>,
    ) -> Result<Self, DomainError> {
        if let Some(id) = non_empty(id) {
            return Ok(Self::Id(id.to_string()));
        }
        match (non_empty(name), non_empty(stage)) {
            (Some(name), Some(stage)) => Ok(Self::NameStage {
                name: name.to_string(),
                stage: stage.to_string(),
            }),
            _ => Err(DomainError::MissingIdentifier),
        }
    }
}

impl fmt::Display for WorkflowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::NameStage { name, stage } => write!(f, "{}/{}", name, stage),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Environment variable declared in the workflow YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDeclaration {
    pub name: String,
    pub secret: bool,
}

/// Resolved environment variable as sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
    pub secret: bool,
}

impl EnvVar {
    /// Value for human-readable output; secrets are masked.
    pub fn display_value(&self) -> &str {
        if self.secret {
            "***"
        } else {
            &self.value
        }
    }
}

/// `KEY=VALUE` override given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    pub key: String,
    pub value: String,
}

impl EnvOverride {
    /// Split on the first `=`; the value may itself contain `=`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(DomainError::InvalidEnvOverride(raw.to_string())),
        }
    }

    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, DomainError> {
        raw.iter().map(|r| Self::parse(r.as_ref())).collect()
    }
}

impl FromStr for EnvOverride {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The parts of a workflow YAML document this client cares about.
///
/// Everything else in the document is opaque and sent verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowDefinition {
    pub name: Option<String>,
    pub stage: Option<String>,
    pub environment: Vec<EnvDeclaration>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    workflow: Option<RawWorkflow>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWorkflow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    stage: Option<String>,
    #[serde(default)]
    environment: Option<Vec<RawDeclaration>>,
}

/// `environment: [VAR1, VAR2]` or `environment: [{name: VAR1, secret: true}]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDeclaration {
    Name(String),
    Full {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        secret: bool,
    },
}

impl WorkflowDefinition {
    /// Parse workflow YAML content.
    ///
    /// An empty document yields an empty definition. Declarations without a
    /// name are skipped.
    pub fn parse(content: &str) -> Result<Self, DomainError> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| DomainError::InvalidYaml {
                message: e.to_string(),
            })?;
        if value.is_null() {
            return Ok(Self::default());
        }

        let raw: RawDocument =
            serde_yaml::from_value(value).map_err(|e| DomainError::InvalidYaml {
                message: e.to_string(),
            })?;
        let workflow = raw.workflow.unwrap_or_default();

        let environment = workflow
            .environment
            .unwrap_or_default()
            .into_iter()
            .filter_map(|decl| match decl {
                RawDeclaration::Name(name) => Some(EnvDeclaration {
                    name,
                    secret: false,
                }),
                RawDeclaration::Full { name, secret } => {
                    name.map(|name| EnvDeclaration { name, secret })
                }
            })
            .filter(|decl| !decl.name.is_empty())
            .collect();

        Ok(Self {
            name: workflow.name,
            stage: workflow.stage,
            environment,
        })
    }
}

/// Stage chosen for a deploy.
///
/// Precedence: explicit flag > `ETLR_STAGE` > the stage declared in YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSelection {
    flag: Option<String>,
    env: Option<String>,
}

impl StageSelection {
    pub fn new(flag: Option<String>, env: Option<String>) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            flag: keep(flag),
            env: keep(env),
        }
    }

    /// Stage that overrides the YAML, if any was requested.
    pub fn override_stage(&self) -> Option<&str> {
        self.flag.as_deref().or(self.env.as_deref())
    }

    pub fn effective<'a>(&'a self, declared: Option<&'a str>) -> Option<&'a str> {
        self.override_stage().or(declared)
    }
}

/// Workflow identity as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkflowSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
}

/// View over an `upsert` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpsertResponse {
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub workflow: Option<WorkflowSummary>,
}

impl UpsertResponse {
    /// Lenient view: fields that don't match the expected shape are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// `runtime_health` block of a `status` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RuntimeHealth {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ready: Option<Value>,
    #[serde(default)]
    pub last_event_received: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl RuntimeHealth {
    pub fn from_response(response: &Value) -> Option<Self> {
        response
            .get("runtime_health")
            .map(|health| serde_json::from_value(health.clone()).unwrap_or_default())
    }
}

/// One entry of a `list_versions` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VersionEntry {
    #[serde(default)]
    pub version: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl VersionEntry {
    /// Returns `None` when the response carries no `versions` key at all.
    pub fn list_from_response(response: &Value) -> Option<Vec<Self>> {
        let versions = response.get("versions")?;
        let entries = versions
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        Some(entries)
    }
}
