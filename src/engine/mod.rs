//! Orchestration engine seam.
//!
//! The workflow layer never runs a conversation itself. It builds agents and
//! a group chat through an [`OrchestrationEngine`] and asks it to run the chat
//! from an opening message. Whether an engine exists at all is an explicit
//! [`Collaborator`] value handed to each team, so tests can swap in a fake.

pub mod genai_engine;
pub mod health;
pub mod human;
pub mod round_robin;
pub mod types;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EngineError;

pub use genai_engine::{GenaiBackend, GenaiEngine};
pub use human::{HumanInput, HumanReply, ScriptedHuman, StdinHuman};
pub use round_robin::{ChatBackend, RoundRobinEngine};
pub use types::{AgentHandle, AgentRole, ChatTurn, GroupChat, Provider, Transcript};

/// The four operations the workflow layer needs from an agent framework.
///
/// Construction has plain-data defaults; only running a chat is mandatory.
#[async_trait]
pub trait OrchestrationEngine: Send + Sync {
    /// Build a role-playing conversational agent.
    fn assistant(&self, name: &str, system_message: &str) -> AgentHandle {
        AgentHandle::assistant(name, system_message)
    }

    /// Build the blocking human-approval agent for a team.
    fn human_proxy(&self, name: &str, system_message: &str) -> AgentHandle {
        AgentHandle::human_proxy(name, system_message)
    }

    /// Build a bounded-round group conversation.
    fn group_chat(&self, agents: Vec<AgentHandle>, max_round: usize) -> GroupChat {
        GroupChat::new(agents, max_round)
    }

    /// Run `chat` to completion, with `initiator` sending `message` first.
    async fn initiate_chat(
        &self,
        chat: &GroupChat,
        initiator: &AgentHandle,
        message: &str,
    ) -> Result<Transcript, EngineError>;
}

/// Whether an orchestration engine is available to the teams.
#[derive(Clone)]
pub enum Collaborator {
    Available(Arc<dyn OrchestrationEngine>),
    /// Demo mode: teams walk their intervention points without running a chat.
    Unavailable { reason: String },
}

impl Collaborator {
    pub fn available(engine: impl OrchestrationEngine + 'static) -> Self {
        Collaborator::Available(Arc::new(engine))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Collaborator::Unavailable {
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Available(_) => f.write_str("Collaborator::Available"),
            Collaborator::Unavailable { reason } => f
                .debug_struct("Collaborator::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}
