//! Host-side traits the selection flows talk to.
//!
//! The flows never touch config files or credentials directly: they read and
//! apply the active model through `ModelHost` and report outcomes through
//! `Notifier`. This keeps the engine free of I/O and lets tests observe
//! every externally visible effect.

use thiserror::Error;

use crate::config::ThinkingLevel;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Sink for user-visible outcome messages.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Failure applying a selection to external state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The provider needs a credential that is not configured.
    #[error("no credential configured for {provider}")]
    MissingCredential { provider: String },
    /// The host rejected the change for another reason.
    #[error("{0}")]
    Rejected(String),
}

/// Read/apply surface for the active model and thinking level.
pub trait ModelHost {
    /// Returns the current model in `provider/id` form.
    fn current_model(&self) -> String;

    /// Returns the current thinking level.
    fn current_thinking(&self) -> ThinkingLevel;

    /// Applies a new model. On error, no state may have changed.
    fn set_model(&mut self, provider: &str, id: &str) -> Result<(), ApplyError>;

    /// Applies a new thinking level. On error, no state may have changed.
    fn set_thinking(&mut self, level: ThinkingLevel) -> Result<(), ApplyError>;
}
