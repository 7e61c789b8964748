//! In-memory fakes for the I/O boundary traits

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use etlr::config::Settings;
use etlr::infrastructure::di::ServiceContainer;
use etlr::infrastructure::traits::{EnvProvider, FileSystem, Prompter, WorkflowApi};
use etlr::infrastructure::{InfraError, InfraResult, WorkflowRequest};

/// Records every request and answers from canned responses keyed by action.
#[derive(Default)]
pub struct RecordingApi {
    pub requests: Mutex<Vec<WorkflowRequest>>,
    responses: HashMap<&'static str, Value>,
    failures: HashMap<&'static str, (u16, String)>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default().respond(
            "upsert",
            json!({"created": true, "workflow": {"id": "wf-1", "name": "wf", "stage": "prod"}}),
        )
    }

    pub fn respond(mut self, action: &'static str, body: Value) -> Self {
        self.responses.insert(action, body);
        self
    }

    pub fn fail(mut self, action: &'static str, status: u16, message: &str) -> Self {
        self.failures.insert(action, (status, message.to_string()));
        self
    }

    pub fn recorded(&self) -> Vec<WorkflowRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<&'static str> {
        self.recorded().iter().map(WorkflowRequest::action).collect()
    }
}

impl WorkflowApi for RecordingApi {
    fn request(&self, request: &WorkflowRequest) -> InfraResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some((status, message)) = self.failures.get(request.action()) {
            return Err(InfraError::Api {
                message: message.clone(),
                status: Some(*status),
                details: None,
            });
        }
        Ok(self
            .responses
            .get(request.action())
            .cloned()
            .unwrap_or_else(|| json!({"success": true})))
    }
}

/// Files held in memory, keyed by path as given.
#[derive(Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, String>,
}

impl MemoryFs {
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }
}

impl FileSystem for MemoryFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

/// Answers every confirmation the same way and counts the questions.
pub struct FakePrompter {
    answer: bool,
    pub asked: AtomicUsize,
}

impl FakePrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl Prompter for FakePrompter {
    fn confirm(&self, _prompt: &str) -> io::Result<bool> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

pub fn env_map(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn container(
    api: Arc<RecordingApi>,
    fs: MemoryFs,
    env: &[(&str, &str)],
    prompter: Arc<FakePrompter>,
) -> ServiceContainer {
    let env: Arc<dyn EnvProvider> = Arc::new(env_map(env));
    ServiceContainer::with_deps(Settings::default(), Arc::new(fs), env, prompter, api)
}
