use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use overseer::engine::{
    AgentHandle, ChatBackend, Collaborator, HumanReply, RoundRobinEngine, ScriptedHuman,
    Transcript,
};
use overseer::error::{EngineError, WorkflowError};
use overseer::workflow::architecture::{DEVELOPMENT_TEAM, RESEARCH_TEAM};
use overseer::workflow::{
    ArchitectureCoordinator, EntryOutcome, ExecutionOutcome, TeamKind, WorkflowSettings,
};

/// Assistant turns that echo who spoke and how long the chat is.
struct EchoBackend;

#[async_trait]
impl ChatBackend for EchoBackend {
    async fn complete(
        &self,
        agent: &AgentHandle,
        transcript: &Transcript,
    ) -> Result<String, EngineError> {
        Ok(format!("{} reviewed {} messages", agent.name, transcript.len()))
    }
}

fn settings(max_round: usize) -> WorkflowSettings {
    WorkflowSettings {
        max_round,
        ..Default::default()
    }
}

#[tokio::test]
async fn full_demonstration_through_round_robin_engine() {
    let human = ScriptedHuman::new([
        HumanReply::Reply("APPROVE".into()),
        HumanReply::Reply("APPROVE".into()),
        HumanReply::Reply("APPROVE".into()),
    ]);
    let engine = RoundRobinEngine::new(EchoBackend, Arc::new(human));
    let mut arch = ArchitectureCoordinator::new(Collaborator::available(engine), settings(8));

    let report = arch.run_demonstration().await.unwrap();

    assert_eq!(report.som_architecture_summary.total_workflows, 2);
    for entry in &report.workflow_log {
        assert_eq!(entry.outcome, EntryOutcome::Completed);
        assert!(entry.transcript_turns >= 4, "{entry:?}");
        assert!(entry.transcript_turns <= 8, "{entry:?}");
    }
}

#[tokio::test]
async fn max_round_bounds_each_team_conversation() {
    let engine = RoundRobinEngine::new(EchoBackend, Arc::new(ScriptedHuman::approving(100)));
    let mut arch = ArchitectureCoordinator::new(Collaborator::available(engine), settings(3));
    let team = arch.build_inner_team(RESEARCH_TEAM, TeamKind::Research);
    arch.register_inner_team(RESEARCH_TEAM, team);

    let outcome = arch.run_inner_team(RESEARCH_TEAM, "size the market").await.unwrap();
    assert_eq!(outcome, ExecutionOutcome::Completed { turns: 3 });
}

/// Human proxy with no input behind it.
struct AbsentHuman;

impl overseer::engine::HumanInput for AbsentHuman {
    fn respond(&self, agent: &str, _last_message: &str) -> Result<HumanReply, EngineError> {
        Err(EngineError::HumanUnavailable {
            agent: agent.to_string(),
        })
    }
}

#[tokio::test]
async fn missing_human_is_recovered_by_default() {
    let engine = RoundRobinEngine::new(EchoBackend, Arc::new(AbsentHuman));
    let mut arch = ArchitectureCoordinator::new(Collaborator::available(engine), settings(8));

    let report = arch.run_demonstration().await.unwrap();

    assert_eq!(report.workflow_log.len(), 2);
    assert!(
        report
            .workflow_log
            .iter()
            .all(|e| e.outcome == EntryOutcome::Recovered)
    );
}

/// Closes research, then cancels the run as Ctrl+C would during development.
struct InterruptingHuman {
    token: CancellationToken,
}

impl overseer::engine::HumanInput for InterruptingHuman {
    fn respond(&self, agent: &str, _last_message: &str) -> Result<HumanReply, EngineError> {
        if agent == "Development_Team_Human" {
            self.token.cancel();
            return Ok(HumanReply::Reply("APPROVE".into()));
        }
        Ok(HumanReply::Exit)
    }
}

#[tokio::test]
async fn cancelled_engine_aborts_the_demonstration() {
    let token = CancellationToken::new();
    let human = InterruptingHuman {
        token: token.clone(),
    };
    let engine = RoundRobinEngine::new(EchoBackend, Arc::new(human)).with_cancellation(token);
    let mut arch = ArchitectureCoordinator::new(Collaborator::available(engine), settings(8));

    let err = arch.run_demonstration().await.unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::TeamAborted { ref team, source: EngineError::Interrupted(_) }
            if team == DEVELOPMENT_TEAM
    ));
    let outcomes: Vec<_> = arch
        .workflow_log()
        .entries()
        .into_iter()
        .map(|e| e.outcome)
        .collect();
    assert_eq!(outcomes, vec![EntryOutcome::Completed, EntryOutcome::Aborted]);
}
