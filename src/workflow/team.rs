//! One team boundary: role agents, one human gate, ordered intervention
//! points, and a sink for the execution record.

use std::fmt;
use std::sync::Arc;

use super::roles::{self, RoleSpec};
use super::sink::{NullSink, WorkflowSink};
use super::types::{
    EntryOutcome, ExecutionOutcome, InterventionPoint, TeamKind, TeamLevel, WorkflowLogEntry,
};
use crate::engine::{Collaborator, OrchestrationEngine};
use crate::error::{EngineError, WorkflowError};

pub const DEFAULT_MAX_ROUND: usize = 8;

const LOG_ACTION: &str = "workflow_start";

/// Static description of a team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamDescriptor {
    pub name: String,
    pub level: TeamLevel,
    pub kind: TeamKind,
    pub intervention_points: Vec<InterventionPoint>,
    pub roles: Vec<RoleSpec>,
    /// Exactly one human gate per team.
    pub approver: RoleSpec,
}

impl TeamDescriptor {
    pub fn new(name: &str, level: TeamLevel, kind: TeamKind) -> Self {
        Self {
            name: name.to_string(),
            level,
            kind,
            intervention_points: roles::intervention_points(level),
            roles: roles::role_agents(kind),
            approver: roles::approver(kind, name),
        }
    }
}

impl fmt::Display for TeamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            TeamLevel::Inner => "inner",
            TeamLevel::Outer => "outer",
        };
        writeln!(f, "{} ({level} team)", self.name)?;
        let agents: Vec<&str> = self.roles.iter().map(|r| r.name.as_str()).collect();
        writeln!(f, "  Agents: {}", agents.join(", "))?;
        writeln!(f, "  Human gate: {}", self.approver.name)?;
        writeln!(f, "  Intervention points:")?;
        for (i, point) in self.intervention_points.iter().enumerate() {
            writeln!(f, "    {}. {point}", i + 1)?;
        }
        Ok(())
    }
}

/// Runs one team's task through the engine and records the outcome.
#[derive(Clone)]
pub struct TeamManager {
    descriptor: TeamDescriptor,
    collaborator: Collaborator,
    sink: Arc<dyn WorkflowSink>,
    max_round: usize,
}

impl TeamManager {
    pub fn new(descriptor: TeamDescriptor, collaborator: Collaborator) -> Self {
        Self {
            descriptor,
            collaborator,
            sink: Arc::new(NullSink),
            max_round: DEFAULT_MAX_ROUND,
        }
    }

    pub fn inner(name: &str, kind: TeamKind, collaborator: Collaborator) -> Self {
        Self::new(TeamDescriptor::new(name, TeamLevel::Inner, kind), collaborator)
    }

    pub fn outer(name: &str, collaborator: Collaborator) -> Self {
        Self::new(
            TeamDescriptor::new(name, TeamLevel::Outer, TeamKind::Coordination),
            collaborator,
        )
    }

    pub fn with_sink(mut self, sink: Arc<dyn WorkflowSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_max_round(mut self, max_round: usize) -> Self {
        self.max_round = max_round;
        self
    }

    pub fn descriptor(&self) -> &TeamDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Run `task` with this team.
    ///
    /// Without an engine the intervention points are shown and nothing is
    /// recorded. Otherwise exactly one log entry is recorded, whatever the
    /// engine returns. Engine failures come back as
    /// [`ExecutionOutcome::Recovered`] unless they are fatal.
    pub async fn execute(&self, task: &str) -> Result<ExecutionOutcome, WorkflowError> {
        let d = &self.descriptor;
        match d.level {
            TeamLevel::Inner => {
                println!("\n🔄 Starting Inner Team Workflow: {}", d.name);
                println!("Task: {}", task.trim());
                println!("\n📋 Human intervention points for {}:", d.name);
            }
            TeamLevel::Outer => {
                println!("\n🎯 Starting Outer Team Coordination");
                println!("Coordination Task: {}", task.trim());
                println!("\n🎭 Executive intervention points:");
            }
        }
        for (i, point) in d.intervention_points.iter().enumerate() {
            println!("{}. {point}", i + 1);
        }

        let engine = match &self.collaborator {
            Collaborator::Available(engine) => engine,
            Collaborator::Unavailable { reason } => {
                tracing::info!(team = %d.name, reason = %reason, "No engine, simulating team");
                println!("Demo mode: {} workflow simulation completed", d.name);
                return Ok(ExecutionOutcome::Simulated);
            }
        };

        tracing::info!(team = %d.name, max_round = self.max_round, "Running team conversation");
        match self.run_chat(engine.as_ref(), task).await {
            Ok(turns) => {
                self.record(task, EntryOutcome::Completed, turns);
                Ok(ExecutionOutcome::Completed { turns })
            }
            Err(error) if error.is_fatal() => {
                self.record(task, EntryOutcome::Aborted, 0);
                Err(WorkflowError::TeamAborted {
                    team: d.name.clone(),
                    source: error,
                })
            }
            Err(error) => {
                tracing::warn!(team = %d.name, "Team conversation failed: {error}");
                println!("Workflow execution completed with human intervention: {error}");
                self.record(task, EntryOutcome::Recovered, 0);
                Ok(ExecutionOutcome::Recovered { error })
            }
        }
    }

    async fn run_chat(
        &self,
        engine: &dyn OrchestrationEngine,
        task: &str,
    ) -> Result<usize, EngineError> {
        let d = &self.descriptor;
        let mut agents: Vec<_> = d
            .roles
            .iter()
            .map(|role| engine.assistant(&role.name, &role.system_message))
            .collect();
        let human = engine.human_proxy(&d.approver.name, &d.approver.system_message);
        agents.push(human.clone());

        let chat = engine.group_chat(agents, self.max_round);
        let message = roles::approval_message(d.level, &d.name, task);
        let transcript = engine.initiate_chat(&chat, &human, &message).await?;
        Ok(transcript.len())
    }

    fn record(&self, task: &str, outcome: EntryOutcome, transcript_turns: usize) {
        self.sink.record(WorkflowLogEntry {
            timestamp: String::new(),
            team_name: self.descriptor.name.clone(),
            level: self.descriptor.level,
            action: LOG_ACTION.to_string(),
            task: task.to_string(),
            outcome,
            transcript_turns,
        });
    }
}

impl fmt::Debug for TeamManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeamManager")
            .field("descriptor", &self.descriptor)
            .field("collaborator", &self.collaborator)
            .field("max_round", &self.max_round)
            .finish_non_exhaustive()
    }
}
