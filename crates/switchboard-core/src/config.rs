//! Configuration management for Switchboard.
//!
//! Loads configuration from ${SWITCHBOARD_HOME}/config.toml with sensible
//! defaults. Single-field saves go through toml_edit so user comments and
//! unrelated fields survive a model switch.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Reasoning level for models that support configurable thinking.
///
/// Higher levels spend more tokens on reasoning before responding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
    /// No reasoning (default)
    #[default]
    Off,
    /// Very brief reasoning
    Minimal,
    /// Light reasoning
    Low,
    /// Moderate reasoning
    Medium,
    /// Deep reasoning
    High,
    /// Very deep reasoning
    XHigh,
}

impl ThinkingLevel {
    /// Returns whether thinking is enabled for this level.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ThinkingLevel::Off)
    }

    /// Returns the short display name for this level.
    pub fn display_name(&self) -> &'static str {
        match self {
            ThinkingLevel::Off => "off",
            ThinkingLevel::Minimal => "minimal",
            ThinkingLevel::Low => "low",
            ThinkingLevel::Medium => "medium",
            ThinkingLevel::High => "high",
            ThinkingLevel::XHigh => "xhigh",
        }
    }

    /// Returns a human-readable description of this thinking level.
    pub fn description(&self) -> &'static str {
        match self {
            ThinkingLevel::Off => "No reasoning",
            ThinkingLevel::Minimal => "Very brief",
            ThinkingLevel::Low => "Light",
            ThinkingLevel::Medium => "Moderate",
            ThinkingLevel::High => "Deep",
            ThinkingLevel::XHigh => "Very deep",
        }
    }

    /// Returns the ThinkingLevel for a given display name.
    pub fn from_name(name: &str) -> Option<ThinkingLevel> {
        match name.to_lowercase().as_str() {
            "off" => Some(ThinkingLevel::Off),
            "minimal" => Some(ThinkingLevel::Minimal),
            "low" => Some(ThinkingLevel::Low),
            "medium" => Some(ThinkingLevel::Medium),
            "high" => Some(ThinkingLevel::High),
            "xhigh" => Some(ThinkingLevel::XHigh),
            _ => None,
        }
    }

    /// Returns all thinking levels for iteration (e.g., in a picker).
    pub fn all() -> &'static [ThinkingLevel] {
        &[
            ThinkingLevel::Off,
            ThinkingLevel::Minimal,
            ThinkingLevel::Low,
            ThinkingLevel::Medium,
            ThinkingLevel::High,
            ThinkingLevel::XHigh,
        ]
    }
}

pub mod paths {
    //! Path resolution for Switchboard configuration files.
    //!
    //! SWITCHBOARD_HOME resolution order:
    //! 1. SWITCHBOARD_HOME environment variable (if set)
    //! 2. ~/.config/switchboard (default)

    use std::path::PathBuf;

    /// Returns the Switchboard home directory.
    pub fn switchboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("SWITCHBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("switchboard"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        switchboard_home().join("config.toml")
    }

    /// Returns the path to the favourites file.
    pub fn favorites_path() -> PathBuf {
        switchboard_home().join("favorites.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active model in `provider/id` form.
    pub model: String,

    /// Thinking level for models that support it.
    #[serde(default)]
    pub thinking_level: ThinkingLevel,

    /// Allow-list of `provider/id` patterns offered by the pickers.
    /// Empty means every catalog model is offered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_models: Vec<String>,
}

impl Config {
    const DEFAULT_MODEL: &str = "anthropic/claude-haiku-4-5";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::debug!(path = %path.display(), "config file missing, using defaults");
            Ok(Config::default())
        }
    }

    /// Saves only the model field to the config file.
    pub fn save_model(model: &str) -> Result<()> {
        Self::save_field(&paths::config_path(), "model", model)
    }

    /// Saves only the model field to a specific config file path.
    pub fn save_model_to(path: &Path, model: &str) -> Result<()> {
        Self::save_field(path, "model", model)
    }

    /// Saves only the thinking_level field to the config file.
    pub fn save_thinking_level(level: ThinkingLevel) -> Result<()> {
        Self::save_field(&paths::config_path(), "thinking_level", level.display_name())
    }

    /// Saves only the thinking_level field to a specific config file path.
    pub fn save_thinking_level_to(path: &Path, level: ThinkingLevel) -> Result<()> {
        Self::save_field(path, "thinking_level", level.display_name())
    }

    /// Updates one top-level string field in place, preserving everything
    /// else in the document (comments included).
    fn save_field(path: &Path, field: &str, field_value: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc[field] = value(field_value);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, doc.to_string())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            thinking_level: ThinkingLevel::default(),
            enabled_models: Vec::new(),
        }
    }
}
