//! Built-in model registry.
//!
//! The static catalog the CLI ships with. Hosts with a live model listing
//! implement `ModelCatalog` themselves; this table exists so the pickers
//! work out of the box.

use anyhow::Result;

use crate::catalog::{Modality, ModelCatalog, ModelEntry};

struct RegistryRow {
    provider: &'static str,
    id: &'static str,
    name: &'static str,
    reasoning: bool,
    image_input: bool,
}

const REGISTRY: &[RegistryRow] = &[
    RegistryRow {
        provider: "anthropic",
        id: "claude-opus-4-6",
        name: "Claude Opus 4.6",
        reasoning: true,
        image_input: true,
    },
    RegistryRow {
        provider: "anthropic",
        id: "claude-sonnet-4-5",
        name: "Claude Sonnet 4.5",
        reasoning: true,
        image_input: true,
    },
    RegistryRow {
        provider: "anthropic",
        id: "claude-haiku-4-5",
        name: "Claude Haiku 4.5",
        reasoning: true,
        image_input: true,
    },
    RegistryRow {
        provider: "openai",
        id: "gpt-5.2",
        name: "GPT-5.2",
        reasoning: true,
        image_input: true,
    },
    RegistryRow {
        provider: "openai",
        id: "gpt-5-mini",
        name: "GPT-5 Mini",
        reasoning: false,
        image_input: true,
    },
    RegistryRow {
        provider: "google",
        id: "gemini-3-pro",
        name: "Gemini 3 Pro",
        reasoning: true,
        image_input: true,
    },
    RegistryRow {
        provider: "google",
        id: "gemini-3-flash",
        name: "Gemini 3 Flash",
        reasoning: false,
        image_input: true,
    },
    RegistryRow {
        provider: "mistral",
        id: "devstral-2",
        name: "Devstral 2",
        reasoning: false,
        image_input: false,
    },
];

impl RegistryRow {
    fn to_entry(&self) -> ModelEntry {
        let mut input_modalities = vec![Modality::Text];
        if self.image_input {
            input_modalities.push(Modality::Image);
        }
        ModelEntry {
            provider: self.provider.to_string(),
            id: self.id.to_string(),
            name: self.name.to_string(),
            reasoning: self.reasoning,
            input_modalities,
        }
    }
}

/// Returns every model in the built-in registry.
pub fn entries() -> Vec<ModelEntry> {
    REGISTRY.iter().map(RegistryRow::to_entry).collect()
}

/// Looks up one model by provider and id.
pub fn find(provider: &str, id: &str) -> Option<ModelEntry> {
    REGISTRY
        .iter()
        .find(|row| row.provider == provider && row.id == id)
        .map(RegistryRow::to_entry)
}

/// Catalog backed by the built-in registry.
#[derive(Debug, Default)]
pub struct StaticCatalog;

impl ModelCatalog for StaticCatalog {
    fn list_available(&self) -> Result<Vec<ModelEntry>> {
        Ok(entries())
    }
}
