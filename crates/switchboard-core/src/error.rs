//! Flow-level error taxonomy.
//!
//! Every variant here is handled at a flow's top boundary and reported
//! through the notification sink, never unwound as fatal. Explicit user
//! cancellation is not an error at all; flows model it as
//! `FlowOutcome::Cancelled` and stay silent.

use thiserror::Error;

use crate::host::{ApplyError, Severity};

/// Terminal outcome of a selection flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// A selection was made and applied.
    Applied,
    /// The user backed out; nothing changed, nothing is reported.
    Cancelled,
    /// A recoverable failure, already reported via the notifier.
    Failed,
}

/// Recoverable failures inside a selection flow.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Nothing to pick from (no providers, no models, no favourites).
    #[error("{0}")]
    Empty(String),

    /// A chosen provider/model no longer resolves in the catalog.
    #[error("model {qualified} is not in the catalog")]
    Lookup { qualified: String },

    /// The host rejected the apply call; no state was changed.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl FlowError {
    /// Notification severity for this failure.
    pub fn severity(&self) -> Severity {
        match self {
            FlowError::Empty(_) => Severity::Warning,
            FlowError::Lookup { .. } => Severity::Error,
            FlowError::Apply(_) => Severity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(
            FlowError::Empty("no models".into()).severity(),
            Severity::Warning
        );
        assert_eq!(
            FlowError::Lookup {
                qualified: "a/b".into()
            }
            .severity(),
            Severity::Error
        );
        assert_eq!(
            FlowError::Apply(ApplyError::MissingCredential {
                provider: "openai".into()
            })
            .severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_messages_are_user_readable() {
        let e = FlowError::Lookup {
            qualified: "anthropic/claude-x".into(),
        };
        assert_eq!(e.to_string(), "model anthropic/claude-x is not in the catalog");
    }
}
