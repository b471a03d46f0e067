//! Host-side collaborators backed by the config file and the environment.

use std::path::PathBuf;

use switchboard_core::config::{Config, ThinkingLevel, paths};
use switchboard_core::host::{ApplyError, ModelHost, Notifier, Severity};

/// `ModelHost` that persists selections to config.toml.
///
/// Credential presence is checked before persisting, so a switch to a
/// provider without a configured key fails cleanly with nothing written.
pub struct ConfigHost {
    config: Config,
    config_path: PathBuf,
}

impl ConfigHost {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: paths::config_path(),
        }
    }

    #[cfg(test)]
    fn with_path(config: Config, config_path: PathBuf) -> Self {
        Self {
            config,
            config_path,
        }
    }
}

impl ModelHost for ConfigHost {
    fn current_model(&self) -> String {
        self.config.model.clone()
    }

    fn current_thinking(&self) -> ThinkingLevel {
        self.config.thinking_level
    }

    fn set_model(&mut self, provider: &str, id: &str) -> Result<(), ApplyError> {
        if let Some(env_var) = credential_env_var(provider)
            && std::env::var_os(env_var).is_none()
        {
            return Err(ApplyError::MissingCredential {
                provider: provider.to_string(),
            });
        }

        let qualified = format!("{provider}/{id}");
        Config::save_model_to(&self.config_path, &qualified)
            .map_err(|e| ApplyError::Rejected(format!("could not persist model: {e:#}")))?;
        self.config.model = qualified;
        Ok(())
    }

    fn set_thinking(&mut self, level: ThinkingLevel) -> Result<(), ApplyError> {
        Config::save_thinking_level_to(&self.config_path, level)
            .map_err(|e| ApplyError::Rejected(format!("could not persist thinking level: {e:#}")))?;
        self.config.thinking_level = level;
        Ok(())
    }
}

/// API key environment variable for a provider, if it needs one.
fn credential_env_var(provider: &str) -> Option<&'static str> {
    match provider {
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        "google" => Some("GEMINI_API_KEY"),
        "mistral" => Some("MISTRAL_API_KEY"),
        _ => None,
    }
}

/// Notifier that queues messages while the alternate screen is up and
/// prints them after the terminal is restored.
#[derive(Debug, Default)]
pub struct QueuedNotifier {
    queued: Vec<(Severity, String)>,
}

impl QueuedNotifier {
    /// Prints everything queued. Call after `restore_terminal`.
    pub fn flush(self) {
        for (severity, message) in self.queued {
            match severity {
                Severity::Info => eprintln!("{message}"),
                Severity::Warning => eprintln!("warning: {message}"),
                Severity::Error => eprintln!("error: {message}"),
            }
        }
    }
}

impl Notifier for QueuedNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.queued.push((severity, message.to_string()));
    }
}
