//! The model-switch wizard: provider → model → thinking level.
//!
//! Step candidate sets resolve lazily: the model step is built from the
//! chosen provider, and the thinking step collapses to an automatic "off"
//! when the chosen model has no reasoning support. On completion the pair
//! is re-resolved against a fresh catalog listing before anything is
//! applied, so a registry change mid-flow surfaces as a lookup failure
//! instead of applying a stale choice.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Terminal;
use ratatui::backend::Backend;
use switchboard_core::catalog::{ModelAllowList, ModelCatalog, ModelEntry};
use switchboard_core::config::ThinkingLevel;
use switchboard_core::error::{FlowError, FlowOutcome};
use switchboard_core::host::{ModelHost, Notifier, Severity};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::list::{Candidate, SearchableList};
use crate::step::SelectionStep;
use crate::wizard::{StepPlan, WizardFlow, WizardOutcome};

pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &mut UnboundedReceiver<KeyEvent>,
    catalog: &dyn ModelCatalog,
    allow: &ModelAllowList,
    host: &mut dyn ModelHost,
    notifier: &mut dyn Notifier,
) -> Result<FlowOutcome>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    match drive(terminal, events, catalog, allow, host, notifier).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => super::absorb(err, notifier),
    }
}

async fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &mut UnboundedReceiver<KeyEvent>,
    catalog: &dyn ModelCatalog,
    allow: &ModelAllowList,
    host: &mut dyn ModelHost,
    notifier: &mut dyn Notifier,
) -> Result<FlowOutcome>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    let entries = allow.filter(catalog.list_available()?);
    let (current_provider, current_model) = split_qualified(&host.current_model());
    let current_thinking = host.current_thinking();

    let providers = providers_in_order(&entries);
    let entries_for_models = entries.clone();
    let entries_for_thinking = entries.clone();
    let preselect_provider = current_provider.clone();

    let wizard = WizardFlow::new()
        .step(move |_| {
            if providers.is_empty() {
                return Err(FlowError::Empty("no providers available".to_string()).into());
            }
            let candidates = providers
                .iter()
                .map(|(provider, count)| {
                    let models = if *count == 1 { "model" } else { "models" };
                    Candidate::new(provider.clone(), provider.clone())
                        .with_description(format!("{count} {models}"))
                })
                .collect();
            let list = SearchableList::new("Provider", candidates)
                .with_selected_value(&preselect_provider);
            Ok(StepPlan::Prompt(SelectionStep::new(list)))
        })
        .step(move |chosen| {
            let provider = chosen[0].as_str();
            let models: Vec<&ModelEntry> = entries_for_models
                .iter()
                .filter(|entry| entry.provider == provider)
                .collect();
            if models.is_empty() {
                return Err(
                    FlowError::Empty(format!("no models available for {provider}")).into(),
                );
            }
            let candidates = models
                .iter()
                .map(|entry| {
                    let description = if entry.reasoning {
                        "reasoning"
                    } else {
                        "standard"
                    };
                    Candidate::new(entry.id.clone(), entry.name.clone())
                        .with_description(description)
                })
                .collect();
            let mut list = SearchableList::new("Model", candidates);
            if provider == current_provider {
                list = list.with_selected_value(&current_model);
            }
            Ok(StepPlan::Prompt(SelectionStep::new(list)))
        })
        .step(move |chosen| {
            let (provider, model) = (chosen[0].as_str(), chosen[1].as_str());
            let reasoning = entries_for_thinking
                .iter()
                .find(|entry| entry.provider == provider && entry.id == model)
                .is_some_and(|entry| entry.reasoning);
            if !reasoning {
                // Not a flow state of its own: the step resolves to an
                // automatic choice and no prompt is ever shown.
                return Ok(StepPlan::Skip(
                    ThinkingLevel::Off.display_name().to_string(),
                ));
            }
            let candidates = ThinkingLevel::all()
                .iter()
                .map(|level| {
                    Candidate::new(level.display_name(), level.display_name())
                        .with_description(level.description())
                })
                .collect();
            let list = SearchableList::new("Thinking Level", candidates)
                .with_selected_value(current_thinking.display_name());
            Ok(StepPlan::Prompt(SelectionStep::new(list)))
        });

    let values = match wizard.run(terminal, events).await? {
        WizardOutcome::Cancelled => return Ok(FlowOutcome::Cancelled),
        WizardOutcome::Completed(values) => values,
    };

    let mut values = values.into_iter();
    let (Some(provider), Some(model), Some(level_name)) =
        (values.next(), values.next(), values.next())
    else {
        anyhow::bail!("model-switch wizard yielded wrong arity");
    };

    // Re-resolve against a fresh listing before touching host state.
    let fresh = catalog.list_available()?;
    let entry = fresh
        .iter()
        .find(|entry| entry.provider == provider && entry.id == model)
        .ok_or(FlowError::Lookup {
            qualified: format!("{provider}/{model}"),
        })?;

    host.set_model(&provider, &model).map_err(FlowError::Apply)?;

    let level = ThinkingLevel::from_name(&level_name).unwrap_or_default();
    if entry.reasoning {
        host.set_thinking(level).map_err(FlowError::Apply)?;
    }

    tracing::debug!(
        provider = %provider,
        model = %model,
        level = level.display_name(),
        "model switched"
    );
    notifier.notify(
        Severity::Info,
        &format!(
            "Switched to {} ({provider}/{model}), thinking {}",
            entry.name,
            level.display_name()
        ),
    );
    Ok(FlowOutcome::Applied)
}

/// Providers in first-seen catalog order, with their model counts.
fn providers_in_order(entries: &[ModelEntry]) -> Vec<(String, usize)> {
    let mut providers: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        match providers.iter_mut().find(|(p, _)| *p == entry.provider) {
            Some((_, count)) => *count += 1,
            None => providers.push((entry.provider.clone(), 1)),
        }
    }
    providers
}

fn split_qualified(qualified: &str) -> (String, String) {
    match qualified.split_once('/') {
        Some((provider, model)) => (provider.to_string(), model.to_string()),
        None => (String::new(), qualified.to_string()),
    }
}
