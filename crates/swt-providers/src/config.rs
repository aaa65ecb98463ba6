//! Grader configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use swt_core::traits::AiGrader;
use swt_core::ScoringConfig;

use crate::anthropic::AnthropicGrader;
use crate::openai::OpenAiGrader;

/// Configuration for a single remote grader.
///
/// `Debug` output masks API keys.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Anthropic {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl ProviderConfig {
    pub fn api_key(&self) -> &str {
        match self {
            ProviderConfig::OpenAI { api_key, .. } | ProviderConfig::Anthropic { api_key, .. } => {
                api_key
            }
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Anthropic {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Anthropic")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// Top-level swt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider tried before local scoring. Unset means local only.
    #[serde(default)]
    pub default_provider: Option<String>,
    /// Model passed to the remote grader.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Remote request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Local scoring rules; also bounds remote assessments.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}
fn default_timeout() -> u64 {
    60
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: None,
            default_model: default_model(),
            timeout_secs: default_timeout(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        from = start + value.len();
    }
    result
}

fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
            org_id: org_id.as_deref().map(resolve_env_vars),
        },
        ProviderConfig::Anthropic { api_key, base_url } => ProviderConfig::Anthropic {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `swt.toml` in the current directory
/// 2. `~/.config/swt/config.toml`
///
/// Environment variable overrides: `SWT_ANTHROPIC_KEY`, `SWT_OPENAI_KEY`.
pub fn load_config() -> Result<GraderConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GraderConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("swt.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => GraderConfig::default(),
    };

    Ok(apply_env(config))
}

/// Parse and check a config document.
pub fn parse_config_str(content: &str) -> Result<GraderConfig> {
    let config: GraderConfig = toml::from_str(content)?;
    config.scoring.validate()?;
    Ok(config)
}

/// Apply key overrides from the environment, then resolve `${VAR}` references.
fn apply_env(mut config: GraderConfig) -> GraderConfig {
    if let Ok(key) = std::env::var("SWT_ANTHROPIC_KEY") {
        match config.providers.get_mut("anthropic") {
            Some(ProviderConfig::Anthropic { api_key, .. }) => *api_key = key,
            _ => {
                config.providers.insert(
                    "anthropic".into(),
                    ProviderConfig::Anthropic {
                        api_key: key,
                        base_url: None,
                    },
                );
            }
        }
    }

    if let Ok(key) = std::env::var("SWT_OPENAI_KEY") {
        match config.providers.get_mut("openai") {
            Some(ProviderConfig::OpenAI { api_key, .. }) => *api_key = key,
            _ => {
                config.providers.insert(
                    "openai".into(),
                    ProviderConfig::OpenAI {
                        api_key: key,
                        base_url: None,
                        org_id: None,
                    },
                );
            }
        }
    }

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("swt"))
}

/// Create a grader instance from its configuration.
pub fn create_grader(config: &ProviderConfig, timeout_secs: u64) -> Result<Arc<dyn AiGrader>> {
    match config {
        ProviderConfig::Anthropic { api_key, base_url } => Ok(Arc::new(AnthropicGrader::new(
            api_key,
            base_url.clone(),
            Some(timeout_secs),
        )?)),
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Ok(Arc::new(OpenAiGrader::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
            Some(timeout_secs),
        )?)),
    }
}

/// The configured default grader, if one is named and has a key.
///
/// A missing or empty key means local grading only, not an error.
pub fn default_grader(config: &GraderConfig) -> Result<Option<Arc<dyn AiGrader>>> {
    let Some(name) = config.default_provider.as_deref() else {
        return Ok(None);
    };
    let provider = config
        .providers
        .get(name)
        .with_context(|| format!("default provider '{name}' is not configured"))?;

    if provider.api_key().trim().is_empty() {
        tracing::info!(provider = name, "no API key configured, using local scoring");
        return Ok(None);
    }
    create_grader(provider, config.timeout_secs).map(Some)
}
