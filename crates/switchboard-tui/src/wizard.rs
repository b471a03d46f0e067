//! Multi-step selection wizard.
//!
//! A `WizardFlow` chains selection steps into one composite choice. Step
//! specifications are factories resolved lazily against the accumulator of
//! already-chosen values, so a later step's candidate set can depend on an
//! earlier choice and is never even constructed if the flow dies first.
//! Cancellation at any step terminates the whole flow with `Cancelled`;
//! nothing is applied partially.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::step::{SelectionStep, StepOutcome};

/// What a step factory resolved to.
pub enum StepPlan {
    /// Show this prompt and wait for the user.
    Prompt(SelectionStep),
    /// Skip the step, recording the given value as chosen with no UI shown.
    Skip(String),
}

/// Terminal outcome of a whole wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Every step resolved; carries all chosen values in step order.
    Completed(Vec<String>),
    /// Some step was cancelled; earlier choices are discarded.
    Cancelled,
}

type StepFactory<'a> = Box<dyn FnMut(&[String]) -> Result<StepPlan> + 'a>;

#[derive(Default)]
pub struct WizardFlow<'a> {
    steps: Vec<StepFactory<'a>>,
}

impl<'a> WizardFlow<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a step specification. The factory receives the values chosen
    /// so far and is only invoked when the flow actually reaches this step.
    #[must_use]
    pub fn step(mut self, factory: impl FnMut(&[String]) -> Result<StepPlan> + 'a) -> Self {
        self.steps.push(Box::new(factory));
        self
    }

    /// Drives all steps sequentially to one terminal outcome.
    pub async fn run<B: Backend>(
        self,
        terminal: &mut Terminal<B>,
        events: &mut UnboundedReceiver<KeyEvent>,
    ) -> Result<WizardOutcome>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        let mut chosen: Vec<String> = Vec::new();

        for mut factory in self.steps {
            match factory(&chosen)? {
                StepPlan::Skip(value) => chosen.push(value),
                StepPlan::Prompt(step) => match step.run(terminal, events).await? {
                    StepOutcome::Chosen(value) => chosen.push(value),
                    StepOutcome::Cancelled => return Ok(WizardOutcome::Cancelled),
                },
            }
        }

        Ok(WizardOutcome::Completed(chosen))
    }
}
