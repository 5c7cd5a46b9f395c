//! Value types exchanged with an orchestration engine.
//!
//! Agents and group chats are plain descriptions. An engine decides how to
//! bring them to life; the workflow layer only builds and hands them over.

use serde::{Deserialize, Serialize};

/// Which model backend the engine talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat models; requires `OPENAI_API_KEY`.
    #[value(name = "openai")]
    OpenAi,
    /// Local Ollama server; no credentials needed.
    Ollama,
}

/// How an agent takes its turn in a group chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Role-playing LLM agent driven by its system message.
    Assistant,
    /// Blocking human gate: always asks the human, never auto-replies.
    HumanProxy,
}

/// A conversational agent as handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentHandle {
    pub name: String,
    pub system_message: String,
    pub role: AgentRole,
}

impl AgentHandle {
    pub fn assistant(name: &str, system_message: &str) -> Self {
        Self {
            name: name.to_string(),
            system_message: system_message.to_string(),
            role: AgentRole::Assistant,
        }
    }

    pub fn human_proxy(name: &str, system_message: &str) -> Self {
        Self {
            name: name.to_string(),
            system_message: system_message.to_string(),
            role: AgentRole::HumanProxy,
        }
    }

    pub fn is_human(&self) -> bool {
        self.role == AgentRole::HumanProxy
    }
}

/// A bounded multi-agent conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupChat {
    pub agents: Vec<AgentHandle>,
    /// Upper bound on turns, counting the opening message.
    pub max_round: usize,
}

impl GroupChat {
    pub fn new(agents: Vec<AgentHandle>, max_round: usize) -> Self {
        Self { agents, max_round }
    }

    /// Index of the agent named `name`, if it is a participant.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.agents.iter().position(|a| a.name == name)
    }
}

/// One message in a group chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub speaker: String,
    pub content: String,
}

/// Ordered record of a finished conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn push(&mut self, speaker: &str, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            speaker: speaker.to_string(),
            content: content.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}
