pub mod merge;
pub mod schema;

pub use schema::*;

use crate::cli::{Cli, Commands};
use crate::engine::Provider;
use crate::error::ConfigError;
use anyhow::Context;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_FILE: &str = "overseer.toml";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/";

/// Load configuration by merging global, local, environment, and CLI sources.
/// Precedence: CLI > environment > local config > global config > defaults.
///
/// Missing config files are handled gracefully (defaults apply). An explicit
/// `--config` path that cannot be read or parsed is an error.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    // Layer 1: Global config (~/.config/overseer/overseer.toml or platform equivalent)
    let global = load_global_config();

    // Layer 2: Local config, either the explicit --config path or ./overseer.toml
    let local = match cli_config_path(cli) {
        Some(path) => load_explicit_config(&path)?,
        None => load_toml_file(Path::new(LOCAL_CONFIG_FILE)).unwrap_or_default(),
    };

    // Layer 3: Environment
    let env = env_to_partial(std::env::var("OPENAI_MODEL").ok());

    // Layer 4: CLI args
    let cli_partial = cli_to_partial(cli);

    Ok(cli_partial
        .with_fallback(env)
        .with_fallback(local)
        .with_fallback(global)
        .finalize())
}

/// Resolve the model descriptors the engine may use.
///
/// The OpenAI provider requires an API key; without one the list would be
/// empty and the run must not start.
pub fn model_descriptors(
    config: &AppConfig,
    api_key: Option<String>,
) -> Result<Vec<ModelDescriptor>, ConfigError> {
    let descriptors: Vec<ModelDescriptor> = match config.provider {
        Provider::OpenAi => api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| ModelDescriptor {
                model: config.model.clone(),
                api_key: Some(key),
                base_url: OPENAI_BASE_URL.to_string(),
            })
            .into_iter()
            .collect(),
        Provider::Ollama => vec![ModelDescriptor {
            model: config.model.clone(),
            api_key: None,
            base_url: config.ollama_url.clone(),
        }],
    };

    if descriptors.is_empty() {
        return Err(ConfigError::ConfigurationMissing(
            "OPENAI_API_KEY is not set (add it to the environment or a .env file)".to_string(),
        ));
    }
    Ok(descriptors)
}

fn load_global_config() -> PartialConfig {
    match global_config_path() {
        Some(p) => load_toml_file(&p).unwrap_or_default(),
        None => {
            tracing::debug!("Could not determine global config directory");
            PartialConfig::default()
        }
    }
}

fn load_explicit_config(path: &Path) -> anyhow::Result<PartialConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let partial = parse_config(path, &contents)?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(partial)
}

/// Parse TOML text into a PartialConfig.
pub fn parse_config(path: &Path, contents: &str) -> Result<PartialConfig, ConfigError> {
    toml::from_str::<ConfigFile>(contents)
        .map(ConfigFile::to_partial)
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Load and parse an optional TOML config file.
/// Returns None on file-not-found; parse errors are logged and skipped.
fn load_toml_file(path: &Path) -> Option<PartialConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse_config(path, &contents) {
            Ok(partial) => {
                tracing::info!("Loaded config from {}", path.display());
                Some(partial)
            }
            Err(e) => {
                tracing::warn!("Config parse error: {}", e);
                None
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read config at {}: {}", path.display(), e);
            None
        }
    }
}

/// Resolve the platform-specific global config path.
/// Linux: ~/.config/overseer/overseer.toml
/// macOS: ~/Library/Application Support/overseer/overseer.toml
fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "overseer")
        .map(|dirs| dirs.config_dir().join(LOCAL_CONFIG_FILE))
}

fn cli_config_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.command {
        Commands::Run { config, .. } => config.clone(),
        Commands::Teams => None,
    }
}

fn env_to_partial(openai_model: Option<String>) -> PartialConfig {
    PartialConfig {
        model: openai_model.filter(|m| !m.trim().is_empty()),
        ..Default::default()
    }
}

/// Convert CLI arguments to a PartialConfig for merging.
///
/// Boolean flags only override when set, so a `strict` policy in the config
/// file is not reset by an absent `--strict`.
fn cli_to_partial(cli: &Cli) -> PartialConfig {
    match &cli.command {
        Commands::Run {
            model,
            provider,
            max_round,
            offline,
            strict,
            report,
            config: _,
        } => PartialConfig {
            model: model.clone(),
            provider: *provider,
            max_round: *max_round,
            failure_policy: strict.then_some(crate::workflow::FailurePolicy::Strict),
            report_path: report.clone(),
            offline: offline.then_some(true),
            ..Default::default()
        },
        Commands::Teams => PartialConfig::default(),
    }
}
