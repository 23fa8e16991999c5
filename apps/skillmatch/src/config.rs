use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::orchestrator::engine::{DEFAULT_MAX_STEPS, DEFAULT_STALL_THRESHOLD};
use crate::orchestrator::LoopLimits;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub max_steps: usize,
    pub stall_threshold: u32,
    /// Role the skill extractors focus on. None means a generic extraction.
    pub target_role: Option<String>,
    pub max_upload_bytes: usize,
    /// Directory uploads are written to and the only place documents are read from.
    /// Defaults to the system temp directory.
    pub document_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let anthropic_api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?;

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_steps = parse_or(&lookup, "ORCHESTRATOR_MAX_STEPS", DEFAULT_MAX_STEPS)?;
        let stall_threshold =
            parse_or(&lookup, "ORCHESTRATOR_STALL_THRESHOLD", DEFAULT_STALL_THRESHOLD)?;
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        if max_steps == 0 {
            bail!("ORCHESTRATOR_MAX_STEPS must be at least 1");
        }
        if stall_threshold == 0 {
            bail!("ORCHESTRATOR_STALL_THRESHOLD must be at least 1");
        }

        Ok(Config {
            anthropic_api_key,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_steps,
            stall_threshold,
            target_role: lookup("TARGET_ROLE")
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty()),
            max_upload_bytes,
            document_root: lookup("DOCUMENT_ROOT")
                .map(|root| root.trim().to_string())
                .filter(|root| !root.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
        })
    }

    pub fn loop_limits(&self) -> LoopLimits {
        LoopLimits {
            max_steps: self.max_steps,
            stall_threshold: self.stall_threshold,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
