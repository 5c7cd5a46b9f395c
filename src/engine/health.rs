//! Engine availability checks run before any team is built.

use std::time::Duration;

use super::types::Provider;
use crate::error::EngineError;

/// Check that the configured provider can serve `model`.
///
/// OpenAI needs no health check; its availability is a credentials question that
/// config resolution already answered.
pub async fn check_engine_ready(
    provider: Provider,
    base_url: &str,
    model: &str,
) -> Result<(), EngineError> {
    match provider {
        Provider::OpenAi => Ok(()),
        Provider::Ollama => check_ollama_ready(base_url, model).await,
    }
}

/// Validate that Ollama is running and the model is available.
///
/// Step 1: HTTP GET to `base_url` with 5-second timeout.
/// Step 2: HTTP POST to `{base_url}/api/show` to verify the model.
async fn check_ollama_ready(base_url: &str, model: &str) -> Result<(), EngineError> {
    let http = reqwest::Client::new();

    http.get(base_url)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .map_err(|e| EngineError::CollaboratorUnavailable {
            url: base_url.to_string(),
            message: format!("Is Ollama running? {e}"),
        })?;

    let show_url = format!("{}/api/show", base_url.trim_end_matches('/'));
    let resp = http
        .post(&show_url)
        .json(&serde_json::json!({ "model": model }))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| EngineError::ModelNotAvailable {
            model: model.to_string(),
            message: format!("Failed to query model info: {e}"),
        })?;

    if !resp.status().is_success() {
        return Err(EngineError::ModelNotAvailable {
            model: model.to_string(),
            message: format!(
                "Model not found (HTTP {}). Run `ollama pull {model}` to download it.",
                resp.status()
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn openai_is_never_checked() {
        assert!(
            check_engine_ready(Provider::OpenAi, "http://127.0.0.1:9/", "gpt-4")
                .await
                .is_ok()
        );
    }

    /// Port 9 (discard) is closed on test machines, so the first step fails.
    #[tokio::test]
    async fn unreachable_ollama_is_collaborator_unavailable() {
        let result = check_engine_ready(Provider::Ollama, "http://127.0.0.1:9/", "llama3.2").await;
        match result {
            Err(EngineError::CollaboratorUnavailable { url, message }) => {
                assert!(url.contains("127.0.0.1:9"));
                assert!(!message.is_empty());
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }
}
