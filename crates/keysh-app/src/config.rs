//! Shell configuration.
//!
//! Loaded from `keysh.toml` in the working directory (overridable via the
//! `KEYSH_CONFIG` environment variable). A missing file yields defaults; a
//! file that exists but fails to parse is a startup error.

use std::path::Path;

use keysh_types::Result;
use serde::Deserialize;

/// User-tunable shell settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt printed before each input line (a space is appended).
    pub prompt: String,
    /// History entries skipped by PageUp/PageDown.
    pub page_step: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "keysh >".to_string(),
            page_step: 10,
        }
    }
}

impl ShellConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}
