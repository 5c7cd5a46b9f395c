use super::schema::{AppConfig, PartialConfig};
use crate::engine::Provider;
use crate::workflow::team::DEFAULT_MAX_ROUND;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/";

impl PartialConfig {
    /// Merge self with a lower-priority fallback.
    /// Self's non-None values take precedence.
    pub fn with_fallback(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            provider: self.provider.or(fallback.provider),
            model: self.model.or(fallback.model),
            max_round: self.max_round.or(fallback.max_round),
            ollama_url: self.ollama_url.or(fallback.ollama_url),
            failure_policy: self.failure_policy.or(fallback.failure_policy),
            log_outer_coordination: self
                .log_outer_coordination
                .or(fallback.log_outer_coordination),
            report_path: self.report_path.or(fallback.report_path),
            offline: self.offline.or(fallback.offline),
        }
    }

    /// Convert to AppConfig, filling any remaining gaps with defaults.
    pub fn finalize(self) -> AppConfig {
        AppConfig {
            provider: self.provider.unwrap_or(Provider::OpenAi),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            // A zero-round chat would never reach the team agents.
            max_round: self.max_round.unwrap_or(DEFAULT_MAX_ROUND).max(1),
            ollama_url: self
                .ollama_url
                .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            failure_policy: self.failure_policy.unwrap_or_default(),
            log_outer_coordination: self.log_outer_coordination.unwrap_or(false),
            report_path: self.report_path,
            offline: self.offline.unwrap_or(false),
        }
    }
}
