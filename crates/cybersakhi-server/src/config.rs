//! Server configuration

use cybersakhi_guard::LlmClientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::cli::Cli;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Hosted LLM invoke endpoint
    #[serde(default = "default_llm_endpoint")]
    pub llm_endpoint: String,

    /// Environment variable holding the LLM API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Deadline for one harassment classification
    #[serde(default = "default_classification_timeout_ms")]
    pub classification_timeout_ms: u64,

    /// Overall HTTP timeout for LLM requests
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Let chat completions pull context from the web
    #[serde(default = "default_true")]
    pub chat_context_from_internet: bool,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(endpoint) = &cli.llm_endpoint {
            config.llm_endpoint = endpoint.clone();
        }

        if let Some(timeout_ms) = cli.timeout_ms {
            config.classification_timeout_ms = timeout_ms;
        }

        if config.classification_timeout_ms == 0 {
            anyhow::bail!("classification_timeout_ms must be greater than zero");
        }

        Ok(config)
    }

    pub fn classification_timeout(&self) -> Duration {
        Duration::from_millis(self.classification_timeout_ms)
    }

    /// Client settings, with the API key read from the configured environment variable.
    pub fn llm_client_config(&self) -> LlmClientConfig {
        LlmClientConfig {
            endpoint: self.llm_endpoint.clone(),
            api_key: std::env::var(&self.api_key_env)
                .ok()
                .filter(|k| !k.is_empty()),
            request_timeout: Duration::from_secs(self.http_timeout_secs),
            chat_context_from_internet: self.chat_context_from_internet,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            llm_endpoint: default_llm_endpoint(),
            api_key_env: default_api_key_env(),
            classification_timeout_ms: default_classification_timeout_ms(),
            http_timeout_secs: default_http_timeout_secs(),
            chat_context_from_internet: true,
        }
    }
}

fn default_llm_endpoint() -> String {
    "http://localhost:8000/api/integrations/invoke-llm".to_string()
}

fn default_api_key_env() -> String {
    "CYBERSAKHI_LLM_API_KEY".to_string()
}

fn default_classification_timeout_ms() -> u64 {
    30_000
}

fn default_http_timeout_secs() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ServerConfig::load("/nonexistent/cybersakhi.yaml", &Cli::default()).unwrap();
        assert_eq!(config.classification_timeout_ms, 30_000);
        assert!(config.chat_context_from_internet);
        assert_eq!(config.api_key_env, "CYBERSAKHI_LLM_API_KEY");
    }

    #[test]
    fn test_file_values_and_cli_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm_endpoint: https://llm.internal/invoke\nclassification_timeout_ms: 5000\nchat_context_from_internet: false"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();

        let config = ServerConfig::load(path, &Cli::default()).unwrap();
        assert_eq!(config.llm_endpoint, "https://llm.internal/invoke");
        assert_eq!(config.classification_timeout(), Duration::from_secs(5));
        assert!(!config.chat_context_from_internet);
        assert_eq!(config.http_timeout_secs, 60);

        let cli = Cli {
            llm_endpoint: Some("http://override/invoke".to_string()),
            timeout_ms: Some(250),
            ..Default::default()
        };
        let config = ServerConfig::load(path, &cli).unwrap();
        assert_eq!(config.llm_endpoint, "http://override/invoke");
        assert_eq!(config.classification_timeout_ms, 250);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = Cli {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert!(ServerConfig::load("/nonexistent/cybersakhi.yaml", &cli).is_err());
    }
}
