use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::session::question::{Difficulty, Kind};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_target_correct")]
    pub target_correct: u32,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_progress_span")]
    pub progress_span: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_kind() -> String {
    "boolean".to_string()
}
fn default_difficulty() -> String {
    "easy".to_string()
}
fn default_target_correct() -> u32 {
    5
}
fn default_advance_delay_ms() -> u64 {
    900
}
fn default_progress_span() -> u32 {
    10
}
fn default_history_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            theme: default_theme(),
            kind: default_kind(),
            difficulty: default_difficulty(),
            target_correct: default_target_correct(),
            advance_delay_ms: default_advance_delay_ms(),
            progress_span: default_progress_span(),
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trivr")
            .join("config.toml")
    }

    /// Clamp numeric fields to sane ranges and reset unknown kind/difficulty
    /// names to their defaults. Call after deserialization so a hand-edited
    /// or stale config file cannot put the app in a nonsense state.
    pub fn validate(&mut self) {
        self.target_correct = self.target_correct.clamp(1, 50);
        self.advance_delay_ms = self.advance_delay_ms.min(10_000);
        self.progress_span = self.progress_span.clamp(1, 100);
        self.history_limit = self.history_limit.clamp(1, 500);
        if Kind::from_name(&self.kind).is_none() {
            self.kind = default_kind();
        }
        if Difficulty::from_name(&self.difficulty).is_none() {
            self.difficulty = default_difficulty();
        }
        if self.api_base_url.trim().is_empty() {
            self.api_base_url = default_api_base_url();
        }
    }

    pub fn kind(&self) -> Kind {
        Kind::from_name(&self.kind).unwrap_or(Kind::Boolean)
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_name(&self.difficulty).unwrap_or(Difficulty::Easy)
    }
}
