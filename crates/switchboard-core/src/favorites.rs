//! Favourite model presets.
//!
//! An ordered list of up to eight presets, each bound to one literal key for
//! the quick-pick overlay. Loading is lenient: malformed entries are dropped
//! with a warning, excess entries are truncated. A broken favourites file
//! must never take the picker down with it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::ThinkingLevel;

/// Maximum number of favourite slots.
pub const MAX_FAVORITES: usize = 8;

/// One favourite preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteSlot {
    /// The literal key that selects this slot in the quick-pick overlay.
    pub key: char,
    /// Display label.
    pub label: String,
    /// Provider id, e.g. "anthropic".
    pub provider: String,
    /// Model id within the provider.
    pub model: String,
    /// Optional thinking level applied together with the model.
    pub thinking: Option<ThinkingLevel>,
}

/// On-disk shape of one slot. Kept separate from `FavoriteSlot` so that
/// validation happens in exactly one place (`RawSlot::validate`).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawSlot {
    key: String,
    label: String,
    provider: String,
    model: String,
    thinking: Option<ThinkingLevel>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct FavoritesFile {
    #[serde(rename = "favorite")]
    favorites: Vec<RawSlot>,
}

impl RawSlot {
    fn validate(self) -> Option<FavoriteSlot> {
        let mut keys = self.key.chars();
        let key = keys.next()?;
        if keys.next().is_some() {
            return None;
        }
        if self.provider.trim().is_empty() || self.model.trim().is_empty() {
            return None;
        }
        let label = if self.label.trim().is_empty() {
            format!("{}/{}", self.provider, self.model)
        } else {
            self.label
        };
        Some(FavoriteSlot {
            key,
            label,
            provider: self.provider,
            model: self.model,
            thinking: self.thinking,
        })
    }
}

impl From<&FavoriteSlot> for RawSlot {
    fn from(slot: &FavoriteSlot) -> Self {
        Self {
            key: slot.key.to_string(),
            label: slot.label.clone(),
            provider: slot.provider.clone(),
            model: slot.model.clone(),
            thinking: slot.thinking,
        }
    }
}

/// Loads favourites from the default path.
pub fn load() -> Result<Vec<FavoriteSlot>> {
    load_from(&crate::config::paths::favorites_path())
}

/// Loads favourites from a specific path.
/// Returns an empty list if the file doesn't exist.
pub fn load_from(path: &Path) -> Result<Vec<FavoriteSlot>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read favourites from {}", path.display()))?;
    let file: FavoritesFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse favourites from {}", path.display()))?;

    let total = file.favorites.len();
    let mut slots: Vec<FavoriteSlot> = file
        .favorites
        .into_iter()
        .filter_map(|raw| {
            let keep = raw.validate();
            if keep.is_none() {
                tracing::warn!(path = %path.display(), "dropping malformed favourite entry");
            }
            keep
        })
        .collect();

    if slots.len() > MAX_FAVORITES {
        tracing::warn!(
            total,
            kept = MAX_FAVORITES,
            "truncating favourites beyond slot limit"
        );
        slots.truncate(MAX_FAVORITES);
    }

    Ok(slots)
}

/// Saves favourites to a specific path.
pub fn save_to(path: &Path, slots: &[FavoriteSlot]) -> Result<()> {
    let file = FavoritesFile {
        favorites: slots.iter().take(MAX_FAVORITES).map(RawSlot::from).collect(),
    };
    let contents = toml::to_string_pretty(&file).context("Failed to serialize favourites")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write favourites to {}", path.display()))?;
    Ok(())
}
