//! One awaitable selection prompt.
//!
//! `SelectionStep` wraps a `SearchableList` behind a run-until-terminal
//! contract: the caller awaits until the user confirms a candidate or
//! cancels. The synchronous `handle_key` state machine is separate from the
//! async driver so tests can script keystrokes directly.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::keys::{KeyAction, classify};
use crate::list::SearchableList;

/// Terminal outcome of one selection step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The user confirmed a candidate; carries its `value`.
    Chosen(String),
    /// The user backed out.
    Cancelled,
}

#[derive(Debug)]
pub struct SelectionStep {
    list: SearchableList,
}

impl SelectionStep {
    pub fn new(list: SearchableList) -> Self {
        Self { list }
    }

    /// Feeds one key event into the step. Returns the terminal outcome once
    /// reached, None while the prompt stays open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<StepOutcome> {
        match classify(key) {
            KeyAction::Cancel => Some(StepOutcome::Cancelled),
            KeyAction::Backspace => {
                // No-op on an already-empty query: the prompt stays open.
                self.list.backspace();
                None
            }
            KeyAction::Up => {
                self.list.move_up();
                None
            }
            KeyAction::Down => {
                self.list.move_down();
                None
            }
            KeyAction::Confirm => self
                .list
                .confirm()
                .map(|candidate| StepOutcome::Chosen(candidate.value.clone())),
            KeyAction::Char(c) => {
                self.list.push_char(c);
                None
            }
            KeyAction::Other => None,
        }
    }

    /// Runs the step to its terminal outcome, redrawing once per event.
    ///
    /// A closed event channel counts as cancellation: there is no way to
    /// confirm anything once input is gone.
    pub async fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
        events: &mut UnboundedReceiver<KeyEvent>,
    ) -> Result<StepOutcome>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        loop {
            terminal.draw(|frame| self.list.render(frame, frame.area()))?;
            let Some(key) = events.recv().await else {
                return Ok(StepOutcome::Cancelled);
            };
            if let Some(outcome) = self.handle_key(key) {
                return Ok(outcome);
            }
        }
    }

    pub fn list(&self) -> &SearchableList {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::keys::press;
    use crate::list::Candidate;

    fn step() -> SelectionStep {
        SelectionStep::new(SearchableList::new(
            "Provider",
            vec![
                Candidate::new("anthropic", "Anthropic"),
                Candidate::new("openai", "OpenAI"),
                Candidate::new("google", "Google"),
            ],
        ))
    }

    #[test]
    fn test_confirm_yields_highlighted_value() {
        let mut step = step();
        assert_eq!(step.handle_key(press(KeyCode::Down)), None);
        assert_eq!(
            step.handle_key(press(KeyCode::Enter)),
            Some(StepOutcome::Chosen("openai".to_string()))
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut step = step();
        assert_eq!(
            step.handle_key(press(KeyCode::Esc)),
            Some(StepOutcome::Cancelled)
        );
    }

    #[test]
    fn test_typing_filters_then_confirm() {
        let mut step = step();
        step.handle_key(press(KeyCode::Char('g')));
        step.handle_key(press(KeyCode::Char('o')));
        assert_eq!(
            step.handle_key(press(KeyCode::Enter)),
            Some(StepOutcome::Chosen("google".to_string()))
        );
    }

    #[test]
    fn test_confirm_with_no_matches_keeps_prompt_open() {
        let mut step = step();
        step.handle_key(press(KeyCode::Char('z')));
        step.handle_key(press(KeyCode::Char('z')));
        assert_eq!(step.handle_key(press(KeyCode::Enter)), None);
        // Still cancellable afterwards.
        assert_eq!(
            step.handle_key(press(KeyCode::Esc)),
            Some(StepOutcome::Cancelled)
        );
    }

    #[test]
    fn test_backspace_on_empty_query_keeps_prompt_open() {
        let mut step = step();
        assert_eq!(step.handle_key(press(KeyCode::Backspace)), None);
        assert_eq!(step.list().filtered_len(), 3);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut step = step();
        assert_eq!(step.handle_key(press(KeyCode::F(2))), None);
        assert_eq!(step.list().filtered_len(), 3);
    }

    #[tokio::test]
    async fn test_run_drives_to_terminal_outcome() {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(press(KeyCode::Char('a'))).unwrap();
        tx.send(press(KeyCode::Char('n'))).unwrap();
        tx.send(press(KeyCode::Enter)).unwrap();

        let outcome = step().run(&mut terminal, &mut rx).await.unwrap();
        assert_eq!(outcome, StepOutcome::Chosen("anthropic".to_string()));
    }

    #[tokio::test]
    async fn test_run_treats_closed_channel_as_cancel() {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<crossterm::event::KeyEvent>();
        drop(tx);

        let outcome = step().run(&mut terminal, &mut rx).await.unwrap();
        assert_eq!(outcome, StepOutcome::Cancelled);
    }
}
