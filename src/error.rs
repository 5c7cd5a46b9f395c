use std::path::PathBuf;

/// Errors related to configuration loading and parsing.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config at {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("No model credentials available: {0}")]
    ConfigurationMissing(String),
}

/// Errors raised by an orchestration engine while running a group chat.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Orchestration engine unavailable at {url}: {message}")]
    CollaboratorUnavailable { url: String, message: String },

    #[error("Model '{model}' not available: {message}")]
    ModelNotAvailable { model: String, message: String },

    #[error("LLM error from {agent}: {message}")]
    LlmError { agent: String, message: String },

    #[error("No human input available for {agent}")]
    HumanUnavailable { agent: String },

    #[error("Group chat has no agents")]
    EmptyGroupChat,

    #[error("Conversation interrupted: {0}")]
    Interrupted(String),
}

impl EngineError {
    /// Fatal errors stop the whole run regardless of failure policy.
    ///
    /// `Interrupted` comes from a cancelled engine (Ctrl+C in the binary) or
    /// a human input task that died mid-read.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Interrupted(_))
    }
}

/// Errors surfaced by the workflow coordinator to its caller.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Team '{team}' failed: {source}")]
    TeamFailed {
        team: String,
        #[source]
        source: EngineError,
    },

    #[error("Team '{team}' aborted: {source}")]
    TeamAborted {
        team: String,
        #[source]
        source: EngineError,
    },

    #[error("Inner team not registered: {0}")]
    UnknownTeam(String),
}
