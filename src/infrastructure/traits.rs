//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! and commands to be tested with mock implementations.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use serde_json::Value;

use crate::domain::{EnvVar, WorkflowRef};
use crate::infrastructure::request::WorkflowRequest;
use crate::infrastructure::InfraResult;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Lookup of process environment variables.
pub trait EnvProvider: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Yes/no confirmation from the user.
pub trait Prompter: Send + Sync {
    fn confirm(&self, prompt: &str) -> io::Result<bool>;
}

/// Operations of the workflows API.
///
/// Implementors provide `request`; every operation is a thin builder over it.
pub trait WorkflowApi: Send + Sync {
    fn request(&self, request: &WorkflowRequest) -> InfraResult<Value>;

    fn list_workflows(&self) -> InfraResult<Value> {
        self.request(&WorkflowRequest::List)
    }

    fn get_workflow(&self, target: &WorkflowRef) -> InfraResult<Value> {
        self.request(&WorkflowRequest::Get(target.clone()))
    }

    fn upsert_workflow(
        &self,
        workflow_yaml: &str,
        env: &[EnvVar],
        stage: Option<&str>,
    ) -> InfraResult<Value> {
        self.request(&WorkflowRequest::Upsert {
            workflow_yaml: workflow_yaml.to_string(),
            env: env.to_vec(),
            stage: stage.map(str::to_string),
        })
    }

    fn delete_workflow(&self, target: &WorkflowRef) -> InfraResult<Value> {
        self.request(&WorkflowRequest::Delete(target.clone()))
    }

    fn deploy_workflow(&self, target: &WorkflowRef) -> InfraResult<Value> {
        self.request(&WorkflowRequest::Deploy(target.clone()))
    }

    fn stop_workflow(&self, target: &WorkflowRef) -> InfraResult<Value> {
        self.request(&WorkflowRequest::Stop(target.clone()))
    }

    fn get_status(&self, target: &WorkflowRef) -> InfraResult<Value> {
        self.request(&WorkflowRequest::Status(target.clone()))
    }

    fn list_versions(&self, workflow_id: &str) -> InfraResult<Value> {
        self.request(&WorkflowRequest::ListVersions {
            workflow_id: workflow_id.to_string(),
        })
    }

    fn get_version(&self, workflow_id: &str, version: u32) -> InfraResult<Value> {
        self.request(&WorkflowRequest::GetVersion {
            workflow_id: workflow_id.to_string(),
            version,
        })
    }

    fn restore_version(&self, workflow_id: &str, version: u32) -> InfraResult<Value> {
        self.request(&WorkflowRequest::RestoreVersion {
            workflow_id: workflow_id.to_string(),
            version,
        })
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Reads the real process environment.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvProvider for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvProvider for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Interactive confirmation: dialoguer on a terminal, a plain stdin line otherwise.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        if io::stdin().is_terminal() {
            return dialoguer::Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(io::Error::other);
        }

        crate::cli::output::prompt(&format!("{} [y/N]:", prompt));
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        println!();
        Ok(is_affirmative(&answer))
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_answers_when_checking_affirmative_then_only_yes_counts() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn given_map_provider_when_looking_up_then_returns_value() {
        let env: HashMap<String, String> = [("A".to_string(), "1".to_string())].into();
        assert_eq!(env.var("A").as_deref(), Some("1"));
        assert_eq!(env.var("B"), None);
    }
}
