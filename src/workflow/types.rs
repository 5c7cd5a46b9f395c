//! Shared vocabulary of the workflow layer.
//!
//! Log entries derive [`serde::Serialize`] because they are embedded verbatim
//! in the JSON workflow report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Which coordination boundary a team sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TeamLevel {
    #[serde(rename = "inner_team")]
    Inner,
    #[serde(rename = "outer_team")]
    Outer,
}

/// Selects a team's role agents and approval prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamKind {
    Research,
    Development,
    Coordination,
}

/// A named stage at which a human approval is expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InterventionPoint(pub &'static str);

impl fmt::Display for InterventionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// How a team's run ended, as recorded in the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOutcome {
    Completed,
    Recovered,
    Aborted,
}

/// One team execution that reached the engine. Never mutated after append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkflowLogEntry {
    /// ISO 8601 UTC timestamp with microseconds.
    pub timestamp: String,
    pub team_name: String,
    pub level: TeamLevel,
    pub action: String,
    pub task: String,
    pub outcome: EntryOutcome,
    pub transcript_turns: usize,
}

/// Typed result of [`super::team::TeamManager::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The group chat ran to its end.
    Completed { turns: usize },
    /// The engine failed; the team logged it and kept the workflow going.
    Recovered { error: EngineError },
    /// No engine available: intervention points were shown, nothing ran.
    Simulated,
}

/// What the coordinator does with a recovered team failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log and continue with the next team.
    #[default]
    Lenient,
    /// Stop the run with [`crate::error::WorkflowError::TeamFailed`].
    Strict,
}
