//! Human decisions for human-proxy agents.
//!
//! A human proxy never auto-replies: every turn it takes goes through a
//! [`HumanInput`]. Reads are blocking, so engines call them off the async
//! runtime.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::sync::Mutex;

use crate::error::EngineError;

/// What the human answered at a gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HumanReply {
    /// Text to post into the conversation as the human's turn.
    Reply(String),
    /// End the conversation here.
    Exit,
}

impl HumanReply {
    /// Interpret one raw line typed at the prompt.
    ///
    /// `exit` (any case) or an empty line ends the conversation.
    pub fn from_line(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") {
            HumanReply::Exit
        } else {
            HumanReply::Reply(trimmed.to_string())
        }
    }
}

pub trait HumanInput: Send + Sync {
    /// Ask the human behind `agent` to respond to `last_message`.
    fn respond(&self, agent: &str, last_message: &str) -> Result<HumanReply, EngineError>;
}

/// Reads decisions from the terminal.
#[derive(Debug, Default)]
pub struct StdinHuman;

impl HumanInput for StdinHuman {
    fn respond(&self, agent: &str, _last_message: &str) -> Result<HumanReply, EngineError> {
        print!(
            "\nProvide feedback as {agent}. Type 'exit' or press enter to end the conversation: "
        );
        std::io::stdout().flush().ok();

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|_| EngineError::HumanUnavailable {
                agent: agent.to_string(),
            })?;
        if read == 0 {
            return Err(EngineError::HumanUnavailable {
                agent: agent.to_string(),
            });
        }
        Ok(HumanReply::from_line(&line))
    }
}

/// Replays canned decisions in order, then exits.
#[derive(Debug, Default)]
pub struct ScriptedHuman {
    replies: Mutex<VecDeque<HumanReply>>,
}

impl ScriptedHuman {
    pub fn new(replies: impl IntoIterator<Item = HumanReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
        }
    }

    pub fn approving(times: usize) -> Self {
        Self::new((0..times).map(|_| HumanReply::Reply("APPROVE".to_string())))
    }
}

impl HumanInput for ScriptedHuman {
    fn respond(&self, _agent: &str, _last_message: &str) -> Result<HumanReply, EngineError> {
        let mut replies = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(replies.pop_front().unwrap_or(HumanReply::Exit))
    }
}
