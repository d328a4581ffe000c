use std::env;
use std::net::SocketAddr;
use std::path::Path;

use solstice_llm::gateway::{GatewayConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub llm: GatewayConfig,
    /// Data-store settings. Carried for the app's upcoming sync features;
    /// no handler reads them yet.
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl Config {
    /// Read the process environment, after loading `.env` from the working
    /// directory if one exists. Variables already set are not overridden.
    pub fn from_env() -> eyre::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!(path = %path.display(), "loaded environment file");
        }
        Self::from_process_env()
    }

    /// Like [`Config::from_env`], but with an explicit environment file.
    pub fn from_env_file(path: &Path) -> eyre::Result<Self> {
        dotenvy::from_path(path)
            .map_err(|e| eyre::eyre!("failed to load {}: {e}", path.display()))?;
        Self::from_process_env()
    }

    fn from_process_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = var("SOLSTICE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| eyre::eyre!("invalid SOLSTICE_BIND_ADDR: {e}"))?;

        let llm = GatewayConfig {
            api_key: var("OPENROUTER_API_KEY"),
            endpoint: var("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: var("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        };

        Ok(Self {
            bind_addr,
            llm,
            supabase_url: var("SUPABASE_URL"),
            supabase_key: var("SUPABASE_KEY"),
        })
    }

    /// Log which settings are present without revealing secret values.
    pub fn log_summary(&self) {
        tracing::info!(
            bind_addr = %self.bind_addr,
            model = %self.llm.model,
            endpoint = %self.llm.endpoint,
            llm_key_configured = self.llm.api_key.is_some(),
            supabase_configured = self.supabase_url.is_some() && self.supabase_key.is_some(),
            "configuration loaded"
        );
        if self.llm.api_key.is_none() {
            tracing::warn!("OPENROUTER_API_KEY is not set; LLM-backed endpoints will fail");
        }
    }
}
