//! Round-robin group chat engine.
//!
//! After the initiator's opening message, speakers take turns in the order
//! they were added to the chat, starting with the agent after the initiator.
//! The chat stops when it reaches `max_round` turns or when a human answers
//! `exit`. Assistant turns come from a [`ChatBackend`]; human turns from a
//! [`HumanInput`].
//!
//! Each turn races the engine's [`CancellationToken`]. A cancelled token ends
//! the chat with [`EngineError::Interrupted`], even mid-read.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::human::{HumanInput, HumanReply};
use super::types::{AgentHandle, GroupChat, Transcript};
use super::OrchestrationEngine;
use crate::error::EngineError;

/// Produces one assistant turn given the conversation so far.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(
        &self,
        agent: &AgentHandle,
        transcript: &Transcript,
    ) -> Result<String, EngineError>;
}

pub struct RoundRobinEngine<B> {
    backend: B,
    human: Arc<dyn HumanInput>,
    cancel_token: CancellationToken,
}

impl<B: ChatBackend> RoundRobinEngine<B> {
    pub fn new(backend: B, human: Arc<dyn HumanInput>) -> Self {
        Self {
            backend,
            human,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Stop chats with [`EngineError::Interrupted`] once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Next turn's content, or `None` when a human ends the chat.
    async fn next_turn(
        &self,
        speaker: &AgentHandle,
        transcript: &Transcript,
    ) -> Result<Option<String>, EngineError> {
        if speaker.is_human() {
            match self.human_turn(speaker, transcript).await? {
                HumanReply::Reply(text) => Ok(Some(text)),
                HumanReply::Exit => Ok(None),
            }
        } else {
            println!("\n{} (to chat_manager):", speaker.name);
            self.backend.complete(speaker, transcript).await.map(Some)
        }
    }

    async fn human_turn(
        &self,
        agent: &AgentHandle,
        transcript: &Transcript,
    ) -> Result<HumanReply, EngineError> {
        let human = Arc::clone(&self.human);
        let name = agent.name.clone();
        let last = transcript
            .last()
            .map(|turn| turn.content.clone())
            .unwrap_or_default();

        // Terminal reads block; keep them off the runtime workers.
        tokio::task::spawn_blocking(move || human.respond(&name, &last))
            .await
            .map_err(|e| EngineError::Interrupted(format!("human input task failed: {e}")))?
    }
}

#[async_trait]
impl<B: ChatBackend> OrchestrationEngine for RoundRobinEngine<B> {
    async fn initiate_chat(
        &self,
        chat: &GroupChat,
        initiator: &AgentHandle,
        message: &str,
    ) -> Result<Transcript, EngineError> {
        if chat.agents.is_empty() {
            return Err(EngineError::EmptyGroupChat);
        }

        let mut transcript = Transcript::default();
        println!("\n{} (to chat_manager):\n{}", initiator.name, message.trim());
        transcript.push(&initiator.name, message);

        let mut next = chat.position(&initiator.name).map_or(0, |i| i + 1);

        while transcript.len() < chat.max_round {
            let speaker = &chat.agents[next % chat.agents.len()];
            next += 1;

            let turn = tokio::select! {
                biased;
                _ = self.cancel_token.cancelled() => {
                    tracing::warn!(agent = %speaker.name, "Group chat cancelled");
                    return Err(EngineError::Interrupted(format!(
                        "cancelled before {} finished its turn",
                        speaker.name
                    )));
                }
                turn = self.next_turn(speaker, &transcript) => turn?,
            };

            let Some(content) = turn else {
                tracing::debug!(agent = %speaker.name, "Human ended the conversation");
                break;
            };
            transcript.push(&speaker.name, content);
        }

        tracing::debug!(turns = transcript.len(), "Group chat finished");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::human::ScriptedHuman;

    struct CannedBackend;

    #[async_trait]
    impl ChatBackend for CannedBackend {
        async fn complete(
            &self,
            agent: &AgentHandle,
            transcript: &Transcript,
        ) -> Result<String, EngineError> {
            Ok(format!("{} at turn {}", agent.name, transcript.len()))
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ChatBackend for FailingBackend {
        async fn complete(
            &self,
            agent: &AgentHandle,
            _transcript: &Transcript,
        ) -> Result<String, EngineError> {
            Err(EngineError::LlmError {
                agent: agent.name.clone(),
                message: "rate limited".into(),
            })
        }
    }

    /// Answers normally but cancels the token, as a Ctrl+C mid-turn would.
    struct CancellingBackend(CancellationToken);

    #[async_trait]
    impl ChatBackend for CancellingBackend {
        async fn complete(
            &self,
            agent: &AgentHandle,
            _transcript: &Transcript,
        ) -> Result<String, EngineError> {
            self.0.cancel();
            Ok(format!("{} answered", agent.name))
        }
    }

    /// Human that takes a second to walk away.
    struct SlowHuman;

    impl HumanInput for SlowHuman {
        fn respond(&self, _agent: &str, _last_message: &str) -> Result<HumanReply, EngineError> {
            std::thread::sleep(std::time::Duration::from_secs(1));
            Ok(HumanReply::Exit)
        }
    }

    fn team_chat(max_round: usize) -> (GroupChat, AgentHandle) {
        let human = AgentHandle::human_proxy("Lead_Human", "approve things");
        let chat = GroupChat::new(
            vec![
                AgentHandle::assistant("Analyst", "analyze"),
                AgentHandle::assistant("Validator", "validate"),
                human.clone(),
            ],
            max_round,
        );
        (chat, human)
    }

    #[tokio::test]
    async fn stops_at_max_round() {
        let engine = RoundRobinEngine::new(CannedBackend, Arc::new(ScriptedHuman::approving(10)));
        let (chat, human) = team_chat(3);

        let transcript = engine.initiate_chat(&chat, &human, "go").await.unwrap();
        let speakers: Vec<_> = transcript.turns.iter().map(|t| t.speaker.as_str()).collect();
        assert_eq!(speakers, vec!["Lead_Human", "Analyst", "Validator"]);
    }

    #[tokio::test]
    async fn speakers_cycle_after_initiator() {
        let engine = RoundRobinEngine::new(CannedBackend, Arc::new(ScriptedHuman::approving(1)));
        let (chat, human) = team_chat(8);

        let transcript = engine.initiate_chat(&chat, &human, "go").await.unwrap();
        let speakers: Vec<_> = transcript.turns.iter().map(|t| t.speaker.as_str()).collect();
        // Second human turn has no scripted reply left and exits.
        assert_eq!(
            speakers,
            vec!["Lead_Human", "Analyst", "Validator", "Lead_Human", "Analyst", "Validator"]
        );
        assert_eq!(transcript.turns[3].content, "APPROVE");
    }

    #[tokio::test]
    async fn human_exit_ends_chat_early() {
        let engine = RoundRobinEngine::new(CannedBackend, Arc::new(ScriptedHuman::default()));
        let (chat, human) = team_chat(8);

        let transcript = engine.initiate_chat(&chat, &human, "go").await.unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().speaker, "Validator");
    }

    #[tokio::test]
    async fn initiator_outside_chat_starts_from_first_agent() {
        let engine = RoundRobinEngine::new(CannedBackend, Arc::new(ScriptedHuman::default()));
        let (chat, _) = team_chat(2);
        let outsider = AgentHandle::human_proxy("Observer", "watch");

        let transcript = engine.initiate_chat(&chat, &outsider, "go").await.unwrap();
        assert_eq!(transcript.turns[1].speaker, "Analyst");
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let engine = RoundRobinEngine::new(FailingBackend, Arc::new(ScriptedHuman::default()));
        let (chat, human) = team_chat(8);

        let err = engine.initiate_chat(&chat, &human, "go").await.unwrap_err();
        assert!(matches!(err, EngineError::LlmError { ref agent, .. } if agent == "Analyst"));
    }

    #[tokio::test]
    async fn empty_chat_is_rejected() {
        let engine = RoundRobinEngine::new(CannedBackend, Arc::new(ScriptedHuman::default()));
        let human = AgentHandle::human_proxy("H", "");
        let err = engine
            .initiate_chat(&GroupChat::new(vec![], 8), &human, "go")
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::EmptyGroupChat);
    }

    #[tokio::test]
    async fn cancellation_between_turns_interrupts_the_chat() {
        let token = CancellationToken::new();
        let engine = RoundRobinEngine::new(
            CancellingBackend(token.clone()),
            Arc::new(ScriptedHuman::approving(10)),
        )
        .with_cancellation(token);
        let (chat, human) = team_chat(8);

        let err = engine.initiate_chat(&chat, &human, "go").await.unwrap_err();
        assert!(matches!(err, EngineError::Interrupted(ref msg) if msg.contains("Validator")));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn cancellation_interrupts_a_pending_human_read() {
        let token = CancellationToken::new();
        let engine = RoundRobinEngine::new(CannedBackend, Arc::new(SlowHuman))
            .with_cancellation(token.clone());
        let human = AgentHandle::human_proxy("Lead_Human", "approve things");
        let chat = GroupChat::new(vec![human.clone()], 4);

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            token.cancel();
        });
        let err = engine.initiate_chat(&chat, &human, "go").await.unwrap_err();
        canceller.await.unwrap();
        assert!(matches!(err, EngineError::Interrupted(_)));
    }
}
