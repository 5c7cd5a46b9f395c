//! Two-level team coordination.
//!
//! [`ArchitectureCoordinator`] owns the inner-team registry, the singleton
//! outer team and the shared [`WorkflowLog`]. Teams run one after another;
//! each finishes before the next starts. What happens when a team's
//! conversation fails is decided here, by [`FailurePolicy`], not inside the
//! team.

use std::sync::Arc;

use super::report::WorkflowReport;
use super::sink::{NullSink, WorkflowLog, WorkflowSink};
use super::team::{DEFAULT_MAX_ROUND, TeamManager};
use super::types::{ExecutionOutcome, FailurePolicy, TeamKind};
use crate::config::AppConfig;
use crate::engine::Collaborator;
use crate::error::WorkflowError;

pub const RESEARCH_TEAM: &str = "Research_Team";
pub const DEVELOPMENT_TEAM: &str = "Development_Team";
pub const OUTER_TEAM: &str = "Outer_Coordination";

pub const RESEARCH_TASK: &str = "\
Analyze the market potential for AI-powered resume screening tools.
Research should include:
1. Market size and growth projections
2. Competitive landscape analysis
3. Technology trends and adoption rates
4. Regulatory considerations";

pub const DEVELOPMENT_TASK: &str = "\
Design the technical architecture for an ATS resume scoring system.
Include:
1. System architecture and component design
2. Technology stack recommendations
3. Scalability and performance considerations
4. Integration requirements with external systems";

pub const COORDINATION_TASK: &str = "\
Coordinate the integration of research insights with technical architecture
to create a comprehensive product development plan for the ATS system.";

/// Knobs the coordinator applies to every team it builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub max_round: usize,
    pub failure_policy: FailurePolicy,
    /// Wire the outer team to the shared log instead of a null sink.
    pub log_outer_coordination: bool,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            max_round: DEFAULT_MAX_ROUND,
            failure_policy: FailurePolicy::Lenient,
            log_outer_coordination: false,
        }
    }
}

impl From<&AppConfig> for WorkflowSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_round: config.max_round,
            failure_policy: config.failure_policy,
            log_outer_coordination: config.log_outer_coordination,
        }
    }
}

pub struct ArchitectureCoordinator {
    collaborator: Collaborator,
    settings: WorkflowSettings,
    log: WorkflowLog,
    /// Registration order is execution order.
    inner_teams: Vec<(String, TeamManager)>,
    outer_team: Option<TeamManager>,
}

impl ArchitectureCoordinator {
    pub fn new(collaborator: Collaborator, settings: WorkflowSettings) -> Self {
        Self {
            collaborator,
            settings,
            log: WorkflowLog::new(),
            inner_teams: Vec::new(),
            outer_team: None,
        }
    }

    /// Build an inner team wired to this coordinator's engine and log.
    pub fn build_inner_team(&self, name: &str, kind: TeamKind) -> TeamManager {
        TeamManager::inner(name, kind, self.collaborator.clone())
            .with_sink(Arc::new(self.log.clone()))
            .with_max_round(self.settings.max_round)
    }

    /// Add `manager` under `name`.
    ///
    /// An existing team with the same name is replaced in place, keeping its
    /// execution position, and returned.
    pub fn register_inner_team(&mut self, name: &str, manager: TeamManager) -> Option<TeamManager> {
        if let Some(slot) = self.inner_teams.iter_mut().find(|(n, _)| n == name) {
            tracing::warn!(team = %name, "Inner team re-registered, replacing previous manager");
            return Some(std::mem::replace(&mut slot.1, manager));
        }
        self.inner_teams.push((name.to_string(), manager));
        println!("Inner team '{name}' registered with outer coordination system");
        None
    }

    pub fn inner_team(&self, name: &str) -> Option<&TeamManager> {
        self.inner_teams
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, team)| team)
    }

    pub fn inner_team_names(&self) -> Vec<&str> {
        self.inner_teams.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// The outer team, created on first use.
    pub fn create_outer_team(&mut self) -> &TeamManager {
        let sink: Arc<dyn WorkflowSink> = if self.settings.log_outer_coordination {
            Arc::new(self.log.clone())
        } else {
            Arc::new(NullSink)
        };
        let collaborator = &self.collaborator;
        let max_round = self.settings.max_round;
        self.outer_team.get_or_insert_with(|| {
            TeamManager::outer(OUTER_TEAM, collaborator.clone())
                .with_sink(sink)
                .with_max_round(max_round)
        })
    }

    pub fn outer_team(&self) -> Option<&TeamManager> {
        self.outer_team.as_ref()
    }

    pub async fn run_inner_team(
        &self,
        name: &str,
        task: &str,
    ) -> Result<ExecutionOutcome, WorkflowError> {
        let team = self
            .inner_team(name)
            .ok_or_else(|| WorkflowError::UnknownTeam(name.to_string()))?;
        let outcome = team.execute(task).await?;
        self.apply_policy(name, outcome)
    }

    pub async fn run_outer_team(&mut self, task: &str) -> Result<ExecutionOutcome, WorkflowError> {
        let outcome = self.create_outer_team().execute(task).await?;
        self.apply_policy(OUTER_TEAM, outcome)
    }

    fn apply_policy(
        &self,
        team: &str,
        outcome: ExecutionOutcome,
    ) -> Result<ExecutionOutcome, WorkflowError> {
        match (self.settings.failure_policy, outcome) {
            (FailurePolicy::Strict, ExecutionOutcome::Recovered { error }) => {
                Err(WorkflowError::TeamFailed {
                    team: team.to_string(),
                    source: error,
                })
            }
            (_, outcome) => Ok(outcome),
        }
    }

    /// Register the research and development teams, run both, then run the
    /// outer coordination task over their work.
    pub async fn run_demonstration(&mut self) -> Result<WorkflowReport, WorkflowError> {
        println!("🚀 Setting up Society of Mind Architecture...");

        let research = self.build_inner_team(RESEARCH_TEAM, TeamKind::Research);
        self.register_inner_team(RESEARCH_TEAM, research);
        let development = self.build_inner_team(DEVELOPMENT_TEAM, TeamKind::Development);
        self.register_inner_team(DEVELOPMENT_TEAM, development);
        self.create_outer_team();

        println!("✅ Complete SoM system initialized successfully!");

        self.run_inner_team(RESEARCH_TEAM, RESEARCH_TASK).await?;
        self.run_inner_team(DEVELOPMENT_TEAM, DEVELOPMENT_TASK).await?;
        self.run_outer_team(COORDINATION_TASK).await?;

        Ok(self.generate_report())
    }

    /// Aggregate the log as it stands. Never mutates.
    pub fn generate_report(&self) -> WorkflowReport {
        WorkflowReport::generate(&self.log.entries())
    }

    pub fn workflow_log(&self) -> &WorkflowLog {
        &self.log
    }
}
