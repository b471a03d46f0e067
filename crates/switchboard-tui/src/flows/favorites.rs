//! The favourites quick-pick flow.
//!
//! One overlay, one keystroke: the chosen preset is re-resolved against the
//! catalog (favourites can outlive the models they point at) and applied.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Terminal;
use ratatui::backend::Backend;
use switchboard_core::catalog::ModelCatalog;
use switchboard_core::error::{FlowError, FlowOutcome};
use switchboard_core::favorites::FavoriteSlot;
use switchboard_core::host::{ModelHost, Notifier, Severity};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::quickpick::{QuickPickOutcome, QuickPickOverlay};

pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &mut UnboundedReceiver<KeyEvent>,
    slots: Vec<FavoriteSlot>,
    catalog: &dyn ModelCatalog,
    host: &mut dyn ModelHost,
    notifier: &mut dyn Notifier,
) -> Result<FlowOutcome>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    match drive(terminal, events, slots, catalog, host, notifier).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => super::absorb(err, notifier),
    }
}

async fn drive<B: Backend>(
    terminal: &mut Terminal<B>,
    events: &mut UnboundedReceiver<KeyEvent>,
    slots: Vec<FavoriteSlot>,
    catalog: &dyn ModelCatalog,
    host: &mut dyn ModelHost,
    notifier: &mut dyn Notifier,
) -> Result<FlowOutcome>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    if slots.is_empty() {
        return Err(FlowError::Empty("no favourites configured".to_string()).into());
    }

    let overlay = QuickPickOverlay::new("Favourites", slots);
    let slot = match overlay.run(terminal, events).await? {
        QuickPickOutcome::Dismissed => return Ok(FlowOutcome::Cancelled),
        QuickPickOutcome::Picked(slot) => slot,
    };

    let fresh = catalog.list_available()?;
    let entry = fresh
        .iter()
        .find(|entry| entry.provider == slot.provider && entry.id == slot.model)
        .ok_or(FlowError::Lookup {
            qualified: format!("{}/{}", slot.provider, slot.model),
        })?;

    host.set_model(&slot.provider, &slot.model)
        .map_err(FlowError::Apply)?;

    if let Some(level) = slot.thinking
        && entry.reasoning
    {
        host.set_thinking(level).map_err(FlowError::Apply)?;
    }

    tracing::debug!(label = %slot.label, "favourite applied");
    notifier.notify(
        Severity::Info,
        &format!(
            "Switched to {} ({}/{})",
            entry.name, slot.provider, slot.model
        ),
    );
    Ok(FlowOutcome::Applied)
}
