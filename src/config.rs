use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Directory holding `documents.json`, `metrics.json`, `answers.json`,
    /// and `external_sources.json`.
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "disabled".to_string(),
            model: None,
            api_url: default_api_url(),
            timeout_secs: 30,
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl LlmConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate llm
    match config.llm.provider.as_str() {
        "disabled" | "openai" => {}
        other => anyhow::bail!(
            "Unknown llm provider: '{}'. Must be disabled or openai.",
            other
        ),
    }

    if config.llm.is_enabled() && config.llm.model.is_none() {
        anyhow::bail!(
            "llm.model must be specified when provider is '{}'",
            config.llm.provider
        );
    }

    if config.server.bind.is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("statikum.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_load_valid_config() {
        let (_tmp, path) = write_config(
            r#"
[catalog]
dir = "./data"

[server]
bind = "127.0.0.1:7878"

[llm]
provider = "openai"
model = "gpt-4.1-mini"
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:7878");
        assert_eq!(cfg.llm.model.as_deref(), Some("gpt-4.1-mini"));
        assert!(cfg.llm.is_enabled());
    }

    #[test]
    fn test_llm_defaults_to_disabled() {
        let (_tmp, path) = write_config(
            r#"
[catalog]
dir = "./data"

[server]
bind = "127.0.0.1:7878"
"#,
        );
        let cfg = load_config(&path).unwrap();
        assert!(!cfg.llm.is_enabled());
        assert_eq!(cfg.llm.timeout_secs, 30);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let (_tmp, path) = write_config(
            r#"
[catalog]
dir = "./data"

[server]
bind = "127.0.0.1:7878"

[llm]
provider = "anthropic"
model = "whatever"
"#,
        );
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_openai_requires_model() {
        let (_tmp, path) = write_config(
            r#"
[catalog]
dir = "./data"

[server]
bind = "127.0.0.1:7878"

[llm]
provider = "openai"
"#,
        );
        assert!(load_config(&path).is_err());
    }
}
