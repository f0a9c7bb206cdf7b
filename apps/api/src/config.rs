use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;
use crate::store::DEFAULT_STATE_KEY;

const DEFAULT_STATE_DIR: &str = ".careercraft";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Where the persisted record lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateBackend {
    File { dir: PathBuf },
    Redis { url: String },
    /// Process memory only; nothing survives a restart.
    Memory,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub state_backend: StateBackend,
    pub state_key: String,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = var("GEMINI_API_KEY")
            .or_else(|| var("API_KEY"))
            .context("Required environment variable 'GEMINI_API_KEY' is not set")?;

        let state_backend = match var("STATE_BACKEND").as_deref().unwrap_or("file") {
            "file" => StateBackend::File {
                dir: PathBuf::from(var("STATE_DIR").unwrap_or_else(|| DEFAULT_STATE_DIR.into())),
            },
            "redis" => StateBackend::Redis {
                url: var("REDIS_URL").context(
                    "Required environment variable 'REDIS_URL' is not set (STATE_BACKEND=redis)",
                )?,
            },
            "memory" => StateBackend::Memory,
            other => bail!("STATE_BACKEND must be one of file, redis, memory (got '{other}')"),
        };

        Ok(Config {
            gemini_api_key,
            gemini_base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            state_backend,
            state_key: var("STATE_KEY").unwrap_or_else(|| DEFAULT_STATE_KEY.into()),
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Configuration for router tests: in-memory state, unreachable model.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("test-key".into()),
            "STATE_BACKEND" => Some("memory".into()),
            _ => None,
        })
        .expect("test config")
    }
}
