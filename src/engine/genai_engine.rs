//! `genai`-backed assistant turns.
//!
//! Each assistant sees the conversation from its own point of view: its
//! system message, its own earlier turns as assistant messages, and every
//! other speaker's turn as a user message prefixed with the speaker name.
//! Output is streamed to stdout as it arrives.
//!
//! The client is pinned to the configured provider: every request goes to
//! the adapter, endpoint and key resolved from the [`ModelDescriptor`],
//! whatever the model name looks like.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use genai::adapter::AdapterKind;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatStreamEvent};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};

use super::human::HumanInput;
use super::round_robin::{ChatBackend, RoundRobinEngine};
use super::types::{AgentHandle, Provider, Transcript};
use crate::config::ModelDescriptor;
use crate::error::EngineError;

/// Round-robin group chats with assistant turns served by `genai`.
pub type GenaiEngine = RoundRobinEngine<GenaiBackend>;

impl GenaiEngine {
    /// Engine for the model in `descriptor`, served by `provider`, with
    /// human turns answered by `human`.
    pub fn for_descriptor(
        provider: Provider,
        descriptor: &ModelDescriptor,
        human: Arc<dyn HumanInput>,
    ) -> Self {
        RoundRobinEngine::new(GenaiBackend::new(provider, descriptor), human)
    }
}

/// Where genai sends a chat: adapter, endpoint and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub adapter: AdapterKind,
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl TargetSpec {
    pub fn new(provider: Provider, descriptor: &ModelDescriptor) -> Self {
        let (adapter, endpoint) = match provider {
            Provider::OpenAi => (AdapterKind::OpenAI, with_trailing_slash(&descriptor.base_url)),
            // genai speaks to Ollama through its OpenAI-compatible routes.
            Provider::Ollama => (
                AdapterKind::Ollama,
                format!("{}v1/", with_trailing_slash(&descriptor.base_url)),
            ),
        };
        Self {
            adapter,
            endpoint,
            api_key: descriptor.api_key.clone(),
        }
    }

    /// Rewrite genai's name-based guess into this target.
    pub fn resolve(&self, target: ServiceTarget) -> ServiceTarget {
        let ServiceTarget { model, auth, .. } = target;
        ServiceTarget {
            endpoint: Endpoint::from_owned(self.endpoint.clone()),
            auth: self.api_key.clone().map(AuthData::from_single).unwrap_or(auth),
            model: ModelIden::new(self.adapter, model.model_name),
        }
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

pub struct GenaiBackend {
    client: Client,
    model: String,
}

impl GenaiBackend {
    pub fn new(provider: Provider, descriptor: &ModelDescriptor) -> Self {
        let spec = TargetSpec::new(provider, descriptor);
        tracing::debug!(adapter = ?spec.adapter, endpoint = %spec.endpoint, "genai target");
        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                Ok(spec.resolve(target))
            },
        );
        Self {
            client: Client::builder()
                .with_service_target_resolver(resolver)
                .build(),
            model: descriptor.model.clone(),
        }
    }
}

/// Build the chat request `agent` answers next.
pub fn build_request(agent: &AgentHandle, transcript: &Transcript) -> ChatRequest {
    let mut chat_req = ChatRequest::from_system(&agent.system_message);
    for turn in &transcript.turns {
        let msg = if turn.speaker == agent.name {
            ChatMessage::assistant(&turn.content)
        } else {
            ChatMessage::user(format!("{}: {}", turn.speaker, turn.content))
        };
        chat_req = chat_req.append_message(msg);
    }
    chat_req
}

#[async_trait]
impl ChatBackend for GenaiBackend {
    async fn complete(
        &self,
        agent: &AgentHandle,
        transcript: &Transcript,
    ) -> Result<String, EngineError> {
        let chat_req = build_request(agent, transcript);
        let chat_options = ChatOptions::default().with_capture_content(true);

        let stream_res = self
            .client
            .exec_chat_stream(&self.model, chat_req, Some(&chat_options))
            .await
            .map_err(|e| EngineError::LlmError {
                agent: agent.name.clone(),
                message: e.to_string(),
            })?;

        let mut stream = stream_res.stream;
        let mut captured_text: Option<String> = None;

        while let Some(event) = stream.next().await {
            match event {
                Ok(ChatStreamEvent::Chunk(chunk)) => {
                    print!("{}", chunk.content);
                    std::io::stdout().flush().ok();
                }
                Ok(ChatStreamEvent::End(end)) => {
                    if let Some(text) = end.captured_first_text() {
                        captured_text = Some(text.to_string());
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(agent = %agent.name, "Stream error: {e}");
                }
            }
        }
        println!();

        captured_text.ok_or_else(|| EngineError::LlmError {
            agent: agent.name.clone(),
            message: "model returned no text".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genai::chat::ChatRole;

    fn descriptor(api_key: Option<&str>, base_url: &str) -> ModelDescriptor {
        ModelDescriptor {
            model: "llama3.2".into(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.into(),
        }
    }

    #[test]
    fn openai_target_follows_the_descriptor_not_the_model_name() {
        let desc = descriptor(Some("sk-test"), "https://api.openai.com/v1/");
        let spec = TargetSpec::new(Provider::OpenAi, &desc);
        assert_eq!(
            spec,
            TargetSpec {
                adapter: AdapterKind::OpenAI,
                endpoint: "https://api.openai.com/v1/".into(),
                api_key: Some("sk-test".into()),
            }
        );

        // genai would route a bare "llama3.2" to Ollama on its own.
        let guessed = ServiceTarget {
            endpoint: Endpoint::from_static("http://localhost:11434/v1/"),
            auth: AuthData::from_env("OLLAMA_API_KEY"),
            model: ModelIden::new(AdapterKind::Ollama, "llama3.2"),
        };
        let resolved = spec.resolve(guessed);
        assert_eq!(resolved.model.adapter_kind, AdapterKind::OpenAI);
    }

    #[test]
    fn ollama_target_uses_the_configured_host() {
        let desc = descriptor(None, "http://gpu-box:11434");
        let spec = TargetSpec::new(Provider::Ollama, &desc);
        assert_eq!(spec.adapter, AdapterKind::Ollama);
        assert_eq!(spec.endpoint, "http://gpu-box:11434/v1/");
        assert_eq!(spec.api_key, None);
    }

    #[test]
    fn request_is_written_from_the_agents_point_of_view() {
        let agent = AgentHandle::assistant("Analyst", "You analyze markets.");
        let mut transcript = Transcript::default();
        transcript.push("Lead_Human", "Please size the market.");
        transcript.push("Analyst", "Roughly 2B USD.");
        transcript.push("Validator", "Source?");

        let req = build_request(&agent, &transcript);
        assert_eq!(req.system.as_deref(), Some("You analyze markets."));
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, ChatRole::User);
        assert_eq!(req.messages[1].role, ChatRole::Assistant);
        assert_eq!(req.messages[2].role, ChatRole::User);
    }

    #[test]
    fn empty_transcript_has_only_the_system_message() {
        let agent = AgentHandle::assistant("Analyst", "sys");
        let req = build_request(&agent, &Transcript::default());
        assert!(req.messages.is_empty());
    }
}
