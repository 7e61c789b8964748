//! Environment reconciliation service
//!
//! Merges the variables a workflow declares with the values found in the
//! process environment and the `-e KEY=VALUE` overrides given on the command line.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::application::ApplicationResult;
use crate::domain::{DomainError, EnvDeclaration, EnvOverride, EnvVar};
use crate::infrastructure::traits::EnvProvider;

/// Service for resolving declared environment variables.
pub struct EnvironmentService {
    env: Arc<dyn EnvProvider>,
}

impl EnvironmentService {
    /// Create a new environment service.
    pub fn new(env: Arc<dyn EnvProvider>) -> Self {
        Self { env }
    }

    /// Resolve declarations against the environment, then apply overrides.
    ///
    /// Overrides always win and may introduce undeclared variables, which are
    /// never secret. A declared variable found neither in the environment nor
    /// in the overrides fails the whole reconciliation. The result is sorted
    /// by name.
    pub fn reconcile(
        &self,
        declarations: &[EnvDeclaration],
        overrides: &[EnvOverride],
    ) -> ApplicationResult<Vec<EnvVar>> {
        let mut values: BTreeMap<String, String> = BTreeMap::new();
        let mut secrets: HashSet<&str> = HashSet::new();
        let mut missing: Vec<String> = Vec::new();

        for decl in declarations {
            if decl.secret {
                secrets.insert(decl.name.as_str());
            }
            match self.env.var(&decl.name) {
                Some(value) => {
                    values.insert(decl.name.clone(), value);
                }
                None if !missing.contains(&decl.name) => missing.push(decl.name.clone()),
                None => {}
            }
        }

        for ov in overrides {
            debug!("override: {}", ov.key);
            values.insert(ov.key.clone(), ov.value.clone());
        }

        missing.retain(|name| !values.contains_key(name));
        if !missing.is_empty() {
            return Err(DomainError::MissingEnvironment { names: missing }.into());
        }

        debug!("reconciled {} variables ({} secret)", values.len(), secrets.len());
        Ok(values
            .into_iter()
            .map(|(name, value)| EnvVar {
                secret: secrets.contains(name.as_str()),
                name,
                value,
            })
            .collect())
    }
}
