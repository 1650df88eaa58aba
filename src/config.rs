use std::net::SocketAddr;
use std::path::PathBuf;

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::summarize::{DEFAULT_MODEL, DEFAULT_WORD_BOUND, clamp_word_bound};

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub model: Option<String>,
    pub word_bound: Option<u32>,
    pub languages: Option<Vec<String>>,
    pub bind: Option<String>,
    pub require_login: Option<bool>,
}

impl Config {
    /// Load config from ~/.config/ytnotes/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn word_bound(&self) -> u32 {
        clamp_word_bound(self.word_bound.unwrap_or(DEFAULT_WORD_BOUND))
    }

    pub fn languages(&self) -> Vec<String> {
        match &self.languages {
            Some(langs) if !langs.is_empty() => langs.clone(),
            _ => vec!["en".to_string()],
        }
    }

    pub fn bind(&self) -> Result<SocketAddr> {
        let bind = self.bind.as_deref().unwrap_or(DEFAULT_BIND);
        bind.parse().wrap_err_with(|| format!("invalid bind address: {bind}"))
    }

    pub fn require_login(&self) -> bool {
        self.require_login.unwrap_or(false)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytnotes")
        .join("config.toml")
}
