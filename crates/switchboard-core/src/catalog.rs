//! Model catalog types and the enabled-model allow-list.
//!
//! The catalog is an external collaborator from the selection engine's point
//! of view: the engine only consumes `list_available()` and never caches the
//! result across invocations. The allow-list narrows what the pickers offer
//! without touching what the host can resolve.

use anyhow::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Input modality a model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Audio,
}

/// One model as listed by a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// Provider id, e.g. "anthropic".
    pub provider: String,
    /// Model id within the provider, e.g. "claude-haiku-4-5".
    pub id: String,
    /// Human-readable name for display.
    pub name: String,
    /// Whether the model supports a configurable reasoning level.
    pub reasoning: bool,
    /// Input modalities the model accepts.
    pub input_modalities: Vec<Modality>,
}

impl ModelEntry {
    /// Returns the `provider/id` form used by the allow-list and favourites.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.provider, self.id)
    }
}

/// Source of available models.
///
/// Implementations may hit disk or network; the selection flows call
/// `list_available` once per invocation. Structurally broken catalog data is
/// the only condition that should surface as an error here.
pub trait ModelCatalog {
    fn list_available(&self) -> Result<Vec<ModelEntry>>;
}

/// Allow-list over `provider/id` names, supporting `*` and `?` globs.
///
/// An empty pattern list matches everything. Matching is case-insensitive.
/// Patterns that fail to compile are skipped (logged), not fatal: a typo in
/// the config should not lock the user out of every model.
#[derive(Debug)]
pub struct ModelAllowList {
    globs: Option<GlobSet>,
}

impl ModelAllowList {
    pub fn new(patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return Self { globs: None };
        }

        let mut builder = GlobSetBuilder::new();
        let mut added = 0usize;
        for pattern in patterns {
            match GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(false)
                .build()
            {
                Ok(glob) => {
                    builder.add(glob);
                    added += 1;
                }
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "skipping invalid enabled-model pattern");
                }
            }
        }

        if added == 0 {
            return Self { globs: None };
        }

        match builder.build() {
            Ok(set) => Self { globs: Some(set) },
            Err(e) => {
                tracing::warn!(error = %e, "enabled-model allow-list disabled");
                Self { globs: None }
            }
        }
    }

    /// Returns true if `provider/id` is allowed.
    pub fn allows(&self, qualified_name: &str) -> bool {
        match &self.globs {
            Some(set) => set.is_match(qualified_name),
            None => true,
        }
    }

    /// Filters a catalog listing down to the allowed entries.
    pub fn filter(&self, entries: Vec<ModelEntry>) -> Vec<ModelEntry> {
        if self.globs.is_none() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| self.allows(&entry.qualified_name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(provider: &str, id: &str) -> ModelEntry {
        ModelEntry {
            provider: provider.to_string(),
            id: id.to_string(),
            name: id.to_string(),
            reasoning: false,
            input_modalities: vec![Modality::Text],
        }
    }

    #[test]
    fn test_empty_allow_list_matches_everything() {
        let allow = ModelAllowList::new(&[]);
        assert!(allow.allows("anthropic/claude-x"));
        assert!(allow.allows("openai/gpt-x"));
    }

    #[test]
    fn test_star_glob_scopes_to_provider() {
        let allow = ModelAllowList::new(&["anthropic/*".to_string()]);
        assert!(allow.allows("anthropic/claude-x"));
        assert!(!allow.allows("openai/claude-x"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let allow = ModelAllowList::new(&["openai/gpt-?".to_string()]);
        assert!(allow.allows("openai/gpt-5"));
        assert!(!allow.allows("openai/gpt-5-mini"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let allow = ModelAllowList::new(&["Anthropic/Claude-*".to_string()]);
        assert!(allow.allows("anthropic/claude-x"));
        assert!(allow.allows("ANTHROPIC/CLAUDE-X"));
    }

    #[test]
    fn test_exact_pattern() {
        let allow = ModelAllowList::new(&["anthropic/claude-x".to_string()]);
        assert!(allow.allows("anthropic/claude-x"));
        assert!(!allow.allows("anthropic/claude-y"));
    }

    #[test]
    fn test_invalid_pattern_is_skipped_not_fatal() {
        let allow = ModelAllowList::new(&["anthropic/[".to_string(), "openai/*".to_string()]);
        assert!(allow.allows("openai/gpt-5"));
        assert!(!allow.allows("anthropic/claude-x"));
    }

    #[test]
    fn test_filter_keeps_order() {
        let allow = ModelAllowList::new(&["anthropic/*".to_string()]);
        let entries = vec![
            entry("anthropic", "claude-x"),
            entry("openai", "gpt-5"),
            entry("anthropic", "claude-y"),
        ];
        let filtered = allow.filter(entries);
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["claude-x", "claude-y"]);
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            entry("anthropic", "claude-x").qualified_name(),
            "anthropic/claude-x"
        );
    }
}
