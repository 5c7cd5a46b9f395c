use serde::Deserialize;
use std::path::PathBuf;

use crate::engine::Provider;
use crate::workflow::FailurePolicy;

/// The TOML file structure for overseer.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub engine: Option<EngineConfig>,
    pub workflow: Option<WorkflowConfig>,
}

#[derive(Debug, Deserialize)]
pub struct EngineConfig {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub max_round: Option<usize>,
    pub ollama_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowConfig {
    pub failure_policy: Option<FailurePolicy>,
    /// Record the outer coordination run in the shared workflow log.
    pub log_outer_coordination: Option<bool>,
    pub report_path: Option<String>,
}

/// Fully-resolved runtime configuration. All fields have values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: Provider,
    pub model: String,
    pub max_round: usize,
    pub ollama_url: String,
    pub failure_policy: FailurePolicy,
    pub log_outer_coordination: bool,
    pub report_path: Option<PathBuf>,
    pub offline: bool,
}

/// Partial config used during merge. All fields are Option so that
/// missing fields don't override lower-priority values.
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub max_round: Option<usize>,
    pub ollama_url: Option<String>,
    pub failure_policy: Option<FailurePolicy>,
    pub log_outer_coordination: Option<bool>,
    pub report_path: Option<PathBuf>,
    pub offline: Option<bool>,
}

/// One usable model endpoint with its credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl ConfigFile {
    pub fn to_partial(self) -> PartialConfig {
        let engine = self.engine;
        let workflow = self.workflow;
        let (provider, model, max_round, ollama_url) = match engine {
            Some(e) => (e.provider, e.model, e.max_round, e.ollama_url),
            None => (None, None, None, None),
        };
        let (failure_policy, log_outer_coordination, report_path) = match workflow {
            Some(w) => (
                w.failure_policy,
                w.log_outer_coordination,
                w.report_path.map(PathBuf::from),
            ),
            None => (None, None, None),
        };

        PartialConfig {
            provider,
            model,
            max_round,
            ollama_url,
            failure_policy,
            log_outer_coordination,
            report_path,
            offline: None,
        }
    }
}
