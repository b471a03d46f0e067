//! Single-key favourites overlay.
//!
//! A flat picker over the configured favourite slots. Each slot is bound to
//! one literal key; pressing it selects immediately, no Enter required.
//! Arrow-navigate plus Enter works as the fallback when the key is not
//! known. Unlike the searchable prompts there is no query to edit, so
//! backspace means "get me out of here" and cancels.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use switchboard_core::favorites::FavoriteSlot;

use crate::keys::{KeyAction, classify};
use crate::render::{self, KeyHint, OverlayChrome, chord_badge, truncate_with_ellipsis};

/// Terminal outcome of a quick-pick session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickPickOutcome {
    Picked(FavoriteSlot),
    Dismissed,
}

#[derive(Debug)]
pub struct QuickPickOverlay {
    title: String,
    slots: Vec<FavoriteSlot>,
    selected: usize,
}

impl QuickPickOverlay {
    pub fn new(title: impl Into<String>, slots: Vec<FavoriteSlot>) -> Self {
        Self {
            title: title.into(),
            slots,
            selected: 0,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Feeds one key event in. Returns the terminal outcome once reached.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<QuickPickOutcome> {
        match classify(key) {
            KeyAction::Cancel | KeyAction::Backspace => Some(QuickPickOutcome::Dismissed),
            KeyAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            KeyAction::Down => {
                if !self.slots.is_empty() && self.selected < self.slots.len() - 1 {
                    self.selected += 1;
                }
                None
            }
            KeyAction::Confirm => self
                .slots
                .get(self.selected)
                .cloned()
                .map(QuickPickOutcome::Picked),
            KeyAction::Char(c) => {
                // The bound key is literal: 'g' and 'G' are different slots.
                let slot = self.slots.iter().find(|slot| slot.key == c)?;
                Some(QuickPickOutcome::Picked(slot.clone()))
            }
            KeyAction::Other => None,
        }
    }

    /// Runs the overlay to its terminal outcome.
    pub async fn run<B: ratatui::backend::Backend>(
        mut self,
        terminal: &mut ratatui::Terminal<B>,
        events: &mut tokio::sync::mpsc::UnboundedReceiver<KeyEvent>,
    ) -> Result<QuickPickOutcome>
    where
        <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
    {
        loop {
            terminal.draw(|frame| self.render(frame, frame.area()))?;
            let Some(key) = events.recv().await else {
                return Ok(QuickPickOutcome::Dismissed);
            };
            if let Some(outcome) = self.handle_key(key) {
                return Ok(outcome);
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        const HINTS: &[KeyHint<'static>] = &[
            KeyHint {
                key: "key",
                action: "select",
            },
            KeyHint {
                key: "↑↓ Enter",
                action: "pick",
            },
            KeyHint {
                key: "Esc",
                action: "close",
            },
        ];

        let rows = self.slots.len().max(1) as u16;
        let chrome = OverlayChrome {
            title: &self.title,
            border_color: Color::Green,
            width: 56,
            height: rows + 3,
            hints: HINTS,
        };
        let layout = render::render_chrome(frame, area, &chrome);

        let width = layout.body.width as usize;
        let lines: Vec<Line> = if self.slots.is_empty() {
            vec![Line::from(Span::styled(
                "  No favourites configured",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.slots
                .iter()
                .enumerate()
                .map(|(i, slot)| slot_row(slot, i == self.selected, width))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines), layout.body);
    }
}

fn slot_row(slot: &FavoriteSlot, is_selected: bool, width: usize) -> Line<'static> {
    let marker = if is_selected { "▶ " } else { "  " };
    let label_style = if is_selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let label = truncate_with_ellipsis(&slot.label, width.saturating_sub(10));
    let mut detail = format!("{}/{}", slot.provider, slot.model);
    if let Some(thinking) = slot.thinking {
        detail.push_str(&format!(" · {}", thinking.display_name()));
    }

    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
        chord_badge(slot.key, Color::Green),
        Span::styled(format!(" {label}"), label_style),
    ];
    let remaining = width.saturating_sub(6 + label.len());
    if remaining > 3 {
        spans.push(Span::styled(
            format!("  {}", truncate_with_ellipsis(&detail, remaining)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use switchboard_core::config::ThinkingLevel;

    use super::*;
    use crate::keys::press;

    fn slots() -> Vec<FavoriteSlot> {
        vec![
            FavoriteSlot {
                key: 'g',
                label: "fast".to_string(),
                provider: "anthropic".to_string(),
                model: "claude-haiku-4-5".to_string(),
                thinking: None,
            },
            FavoriteSlot {
                key: 'o',
                label: "deep".to_string(),
                provider: "openai".to_string(),
                model: "gpt-5.2".to_string(),
                thinking: Some(ThinkingLevel::High),
            },
        ]
    }

    #[test]
    fn test_bound_key_selects_immediately() {
        let mut pick = QuickPickOverlay::new("Favourites", slots());
        let outcome = pick.handle_key(press(KeyCode::Char('g')));
        match outcome {
            Some(QuickPickOutcome::Picked(slot)) => assert_eq!(slot.key, 'g'),
            other => panic!("expected pick, got {other:?}"),
        }
    }

    #[test]
    fn test_unbound_key_is_noop() {
        let mut pick = QuickPickOverlay::new("Favourites", slots());
        assert_eq!(pick.handle_key(press(KeyCode::Char('x'))), None);
        assert_eq!(pick.selected_index(), 0);
    }

    #[test]
    fn test_bound_key_is_literal_not_case_folded() {
        let mut pick = QuickPickOverlay::new("Favourites", slots());
        assert_eq!(pick.handle_key(press(KeyCode::Char('G'))), None);
    }

    #[test]
    fn test_navigate_and_confirm_fallback() {
        let mut pick = QuickPickOverlay::new("Favourites", slots());
        pick.handle_key(press(KeyCode::Down));
        let outcome = pick.handle_key(press(KeyCode::Enter));
        match outcome {
            Some(QuickPickOutcome::Picked(slot)) => assert_eq!(slot.key, 'o'),
            other => panic!("expected pick, got {other:?}"),
        }
    }

    #[test]
    fn test_backspace_cancels() {
        let mut pick = QuickPickOverlay::new("Favourites", slots());
        assert_eq!(
            pick.handle_key(press(KeyCode::Backspace)),
            Some(QuickPickOutcome::Dismissed)
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut pick = QuickPickOverlay::new("Favourites", slots());
        assert_eq!(
            pick.handle_key(press(KeyCode::Esc)),
            Some(QuickPickOutcome::Dismissed)
        );
    }

    #[test]
    fn test_confirm_on_empty_list_is_noop() {
        let mut pick = QuickPickOverlay::new("Favourites", Vec::new());
        assert_eq!(pick.handle_key(press(KeyCode::Enter)), None);
    }

    #[tokio::test]
    async fn test_run_returns_picked_slot() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(press(KeyCode::Char('o'))).unwrap();

        let outcome = QuickPickOverlay::new("Favourites", slots())
            .run(&mut terminal, &mut rx)
            .await
            .unwrap();
        match outcome {
            QuickPickOutcome::Picked(slot) => assert_eq!(slot.model, "gpt-5.2"),
            QuickPickOutcome::Dismissed => panic!("expected pick"),
        }
    }
}
