//! Two-level chorded command palette.
//!
//! The palette is a small state machine over a fixed entry tree: at the
//! root, single-character chord keys open groups or fire direct actions;
//! inside a group, chord keys fire that group's actions. The reserved
//! control keys (Up/Down/Enter/Esc/Backspace) always operate on the
//! highlighted row, so every action stays reachable without knowing its
//! chord.
//!
//! Entries form a closed tagged variant (`Group` or `Action`), matched
//! exhaustively. Duplicate chord keys within one scope are a construction
//! error: silently shadowed actions are unreachable, which is a data bug
//! worth surfacing where the data is written.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use thiserror::Error;

use crate::keys::{KeyAction, classify};
use crate::render::{self, KeyHint, OverlayChrome, chord_badge, truncate_with_ellipsis};

/// One action: a chord key, a label, and the command value handed back to
/// the caller when it fires.
#[derive(Debug, Clone)]
pub struct PaletteAction<C> {
    pub chord: char,
    pub label: String,
    pub description: Option<String>,
    pub command: C,
}

impl<C> PaletteAction<C> {
    pub fn new(chord: char, label: impl Into<String>, command: C) -> Self {
        Self {
            chord,
            label: label.into(),
            description: None,
            command,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A group of actions behind one chord key.
#[derive(Debug, Clone)]
pub struct PaletteGroup<C> {
    pub chord: char,
    pub label: String,
    pub actions: Vec<PaletteAction<C>>,
}

impl<C> PaletteGroup<C> {
    pub fn new(chord: char, label: impl Into<String>, actions: Vec<PaletteAction<C>>) -> Self {
        Self {
            chord,
            label: label.into(),
            actions,
        }
    }
}

/// One top-level palette entry.
#[derive(Debug, Clone)]
pub enum PaletteEntry<C> {
    Group(PaletteGroup<C>),
    Action(PaletteAction<C>),
}

impl<C> PaletteEntry<C> {
    fn chord(&self) -> char {
        match self {
            PaletteEntry::Group(group) => group.chord,
            PaletteEntry::Action(action) => action.chord,
        }
    }
}

/// Construction-time validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// Two entries in the same scope share a chord key, making one of them
    /// unreachable.
    #[error("duplicate chord key '{chord}' in {scope}")]
    DuplicateChord { chord: char, scope: String },
}

/// Which level the palette is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteView {
    Root,
    /// Index of the open group within the entry list.
    InGroup(usize),
}

/// Terminal outcome of a palette session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteOutcome<C> {
    /// An action fired; carries its command value.
    Selected(C),
    /// The palette was dismissed without selecting anything.
    Dismissed,
}

#[derive(Debug)]
pub struct ChordedPalette<C> {
    title: String,
    entries: Vec<PaletteEntry<C>>,
    view: PaletteView,
    selected: usize,
}

impl<C: Clone> ChordedPalette<C> {
    /// Builds a palette, rejecting duplicate chord keys per scope.
    pub fn new(
        title: impl Into<String>,
        entries: Vec<PaletteEntry<C>>,
    ) -> Result<Self, PaletteError> {
        validate_scope(
            "the root scope",
            entries.iter().map(PaletteEntry::chord),
        )?;
        for entry in &entries {
            if let PaletteEntry::Group(group) = entry {
                validate_scope(
                    &format!("group '{}'", group.label),
                    group.actions.iter().map(|a| a.chord),
                )?;
            }
        }

        Ok(Self {
            title: title.into(),
            entries,
            view: PaletteView::Root,
            selected: 0,
        })
    }

    pub fn view(&self) -> PaletteView {
        self.view
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Feeds one key event into the state machine. Returns the terminal
    /// outcome once reached, None while the palette stays open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PaletteOutcome<C>> {
        match classify(key) {
            KeyAction::Cancel => Some(PaletteOutcome::Dismissed),
            KeyAction::Backspace => match self.view {
                // Backspace is "back": to the root from a group, out of the
                // palette from the root.
                PaletteView::InGroup(_) => {
                    self.view = PaletteView::Root;
                    self.selected = 0;
                    None
                }
                PaletteView::Root => Some(PaletteOutcome::Dismissed),
            },
            KeyAction::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            KeyAction::Down => {
                let len = self.scope_len();
                if len > 0 && self.selected < len - 1 {
                    self.selected += 1;
                }
                None
            }
            KeyAction::Confirm => self.activate(self.selected),
            KeyAction::Char(c) => {
                let chord = c.to_ascii_lowercase();
                let position = self.scope_position(chord)?;
                self.activate(position)
            }
            KeyAction::Other => None,
        }
    }

    fn scope_len(&self) -> usize {
        match self.view {
            PaletteView::Root => self.entries.len(),
            PaletteView::InGroup(group_idx) => match &self.entries[group_idx] {
                PaletteEntry::Group(group) => group.actions.len(),
                PaletteEntry::Action(_) => 0,
            },
        }
    }

    fn scope_position(&self, chord: char) -> Option<usize> {
        match self.view {
            PaletteView::Root => self
                .entries
                .iter()
                .position(|e| e.chord().to_ascii_lowercase() == chord),
            PaletteView::InGroup(group_idx) => match &self.entries[group_idx] {
                PaletteEntry::Group(group) => group
                    .actions
                    .iter()
                    .position(|a| a.chord.to_ascii_lowercase() == chord),
                PaletteEntry::Action(_) => None,
            },
        }
    }

    fn activate(&mut self, position: usize) -> Option<PaletteOutcome<C>> {
        match self.view {
            PaletteView::Root => match self.entries.get(position)? {
                PaletteEntry::Group(_) => {
                    self.view = PaletteView::InGroup(position);
                    self.selected = 0;
                    None
                }
                PaletteEntry::Action(action) => {
                    Some(PaletteOutcome::Selected(action.command.clone()))
                }
            },
            PaletteView::InGroup(group_idx) => match &self.entries[group_idx] {
                PaletteEntry::Group(group) => group
                    .actions
                    .get(position)
                    .map(|action| PaletteOutcome::Selected(action.command.clone())),
                PaletteEntry::Action(_) => None,
            },
        }
    }

    /// Runs the palette to its terminal outcome. Returns the selected
    /// command, or None when dismissed. The selected action's effect runs
    /// in the caller, after the palette is already gone.
    pub async fn run<B: ratatui::backend::Backend>(
        mut self,
        terminal: &mut ratatui::Terminal<B>,
        events: &mut tokio::sync::mpsc::UnboundedReceiver<KeyEvent>,
    ) -> Result<Option<C>>
    where
        <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
    {
        loop {
            terminal.draw(|frame| self.render(frame, frame.area()))?;
            let Some(key) = events.recv().await else {
                return Ok(None);
            };
            match self.handle_key(key) {
                Some(PaletteOutcome::Selected(command)) => return Ok(Some(command)),
                Some(PaletteOutcome::Dismissed) => return Ok(None),
                None => {}
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        const ROOT_HINTS: &[KeyHint<'static>] = &[
            KeyHint {
                key: "key",
                action: "select",
            },
            KeyHint {
                key: "Esc",
                action: "close",
            },
        ];
        const GROUP_HINTS: &[KeyHint<'static>] = &[
            KeyHint {
                key: "key",
                action: "run",
            },
            KeyHint {
                key: "Bksp",
                action: "back",
            },
            KeyHint {
                key: "Esc",
                action: "close",
            },
        ];

        let rows = self.scope_len().max(1) as u16;

        let (header, hints) = match self.view {
            PaletteView::Root => (self.title.clone(), ROOT_HINTS),
            PaletteView::InGroup(group_idx) => {
                let label = match &self.entries[group_idx] {
                    PaletteEntry::Group(group) => group.label.as_str(),
                    PaletteEntry::Action(action) => action.label.as_str(),
                };
                (format!("< {label}"), GROUP_HINTS)
            }
        };

        let chrome = OverlayChrome {
            title: &header,
            border_color: Color::Magenta,
            width: 50,
            height: rows + 3,
            hints,
        };
        let layout = render::render_chrome(frame, area, &chrome);

        let width = layout.body.width as usize;
        let lines: Vec<Line> = match self.view {
            PaletteView::Root => self
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| self.entry_row(entry, i == self.selected, width))
                .collect(),
            PaletteView::InGroup(group_idx) => match &self.entries[group_idx] {
                PaletteEntry::Group(group) => group
                    .actions
                    .iter()
                    .enumerate()
                    .map(|(i, action)| action_row(action, i == self.selected, width))
                    .collect(),
                PaletteEntry::Action(_) => Vec::new(),
            },
        };

        frame.render_widget(Paragraph::new(lines), layout.body);
    }

    fn entry_row(&self, entry: &PaletteEntry<C>, is_selected: bool, width: usize) -> Line<'static> {
        match entry {
            PaletteEntry::Action(action) => action_row(action, is_selected, width),
            PaletteEntry::Group(group) => {
                let marker = if is_selected { "▶ " } else { "  " };
                let label = truncate_with_ellipsis(&group.label, width.saturating_sub(10));
                Line::from(vec![
                    Span::styled(marker.to_string(), Style::default().fg(Color::Magenta)),
                    chord_badge(group.chord, Color::Magenta),
                    Span::styled(
                        format!(" {label} "),
                        row_style(is_selected).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("…", Style::default().fg(Color::DarkGray)),
                ])
            }
        }
    }
}

fn action_row<C>(action: &PaletteAction<C>, is_selected: bool, width: usize) -> Line<'static> {
    let marker = if is_selected { "▶ " } else { "  " };
    let label = truncate_with_ellipsis(&action.label, width.saturating_sub(10));
    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Magenta)),
        chord_badge(action.chord, Color::Magenta),
        Span::styled(format!(" {label}"), row_style(is_selected)),
    ];
    if let Some(desc) = &action.description {
        let remaining = width.saturating_sub(6 + label.len());
        if remaining > 3 {
            spans.push(Span::styled(
                format!("  {}", truncate_with_ellipsis(desc, remaining)),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    Line::from(spans)
}

fn row_style(is_selected: bool) -> Style {
    if is_selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn validate_scope(scope: &str, chords: impl Iterator<Item = char>) -> Result<(), PaletteError> {
    let mut seen = std::collections::HashSet::new();
    for chord in chords {
        let normalized = chord.to_ascii_lowercase();
        if !seen.insert(normalized) {
            return Err(PaletteError::DuplicateChord {
                chord: normalized,
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::keys::press;

    fn palette() -> ChordedPalette<&'static str> {
        ChordedPalette::new(
            "Actions",
            vec![
                PaletteEntry::Group(PaletteGroup::new(
                    'm',
                    "Model",
                    vec![
                        PaletteAction::new('s', "Switch model", "switch"),
                        PaletteAction::new('f', "Favourites", "favorites"),
                    ],
                )),
                PaletteEntry::Action(PaletteAction::new('q', "Quit", "quit")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_group_chord_enters_group() {
        let mut p = palette();
        assert_eq!(p.handle_key(press(KeyCode::Char('m'))), None);
        assert_eq!(p.view(), PaletteView::InGroup(0));
        assert_eq!(p.selected_index(), 0);
    }

    #[test]
    fn test_chord_is_case_insensitive() {
        let mut p = palette();
        assert_eq!(p.handle_key(press(KeyCode::Char('M'))), None);
        assert_eq!(p.view(), PaletteView::InGroup(0));
    }

    #[test]
    fn test_action_chord_in_group_fires() {
        let mut p = palette();
        p.handle_key(press(KeyCode::Char('m')));
        assert_eq!(
            p.handle_key(press(KeyCode::Char('f'))),
            Some(PaletteOutcome::Selected("favorites"))
        );
    }

    #[test]
    fn test_direct_action_at_root_fires() {
        let mut p = palette();
        assert_eq!(
            p.handle_key(press(KeyCode::Char('q'))),
            Some(PaletteOutcome::Selected("quit"))
        );
    }

    #[test]
    fn test_backspace_returns_to_root_and_resets_highlight() {
        let mut p = palette();
        p.handle_key(press(KeyCode::Char('m')));
        p.handle_key(press(KeyCode::Down));
        assert_eq!(p.selected_index(), 1);

        assert_eq!(p.handle_key(press(KeyCode::Backspace)), None);
        assert_eq!(p.view(), PaletteView::Root);
        assert_eq!(p.selected_index(), 0);
    }

    #[test]
    fn test_backspace_at_root_dismisses() {
        let mut p = palette();
        assert_eq!(
            p.handle_key(press(KeyCode::Backspace)),
            Some(PaletteOutcome::Dismissed)
        );
    }

    #[test]
    fn test_escape_dismisses_from_both_levels() {
        let mut p = palette();
        assert_eq!(
            p.handle_key(press(KeyCode::Esc)),
            Some(PaletteOutcome::Dismissed)
        );

        let mut p = palette();
        p.handle_key(press(KeyCode::Char('m')));
        assert_eq!(
            p.handle_key(press(KeyCode::Esc)),
            Some(PaletteOutcome::Dismissed)
        );
    }

    #[test]
    fn test_navigation_and_confirm_reach_group_actions() {
        let mut p = palette();
        // Highlight the group, open it with Enter, pick the second action.
        assert_eq!(p.handle_key(press(KeyCode::Enter)), None);
        assert_eq!(p.view(), PaletteView::InGroup(0));
        p.handle_key(press(KeyCode::Down));
        assert_eq!(
            p.handle_key(press(KeyCode::Enter)),
            Some(PaletteOutcome::Selected("favorites"))
        );
    }

    #[test]
    fn test_unbound_chord_is_ignored() {
        let mut p = palette();
        assert_eq!(p.handle_key(press(KeyCode::Char('z'))), None);
        assert_eq!(p.view(), PaletteView::Root);
    }

    #[test]
    fn test_highlight_clamps_within_scope() {
        let mut p = palette();
        for _ in 0..5 {
            p.handle_key(press(KeyCode::Down));
        }
        assert_eq!(p.selected_index(), 1);
    }

    #[test]
    fn test_duplicate_chord_at_root_rejected() {
        let result = ChordedPalette::new(
            "Actions",
            vec![
                PaletteEntry::Action(PaletteAction::new('q', "Quit", "quit")),
                PaletteEntry::Action(PaletteAction::new('Q', "Quiet", "quiet")),
            ],
        );
        assert_eq!(
            result.err(),
            Some(PaletteError::DuplicateChord {
                chord: 'q',
                scope: "the root scope".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_chord_within_group_rejected() {
        let result = ChordedPalette::new(
            "Actions",
            vec![PaletteEntry::Group(PaletteGroup::new(
                'm',
                "Model",
                vec![
                    PaletteAction::new('s', "Switch", "a"),
                    PaletteAction::new('s', "Shadowed", "b"),
                ],
            ))],
        );
        assert!(matches!(
            result.err(),
            Some(PaletteError::DuplicateChord { chord: 's', .. })
        ));
    }

    #[test]
    fn test_same_chord_in_different_scopes_is_fine() {
        // 'f' appears in two different groups; scopes are independent.
        let result = ChordedPalette::new(
            "Actions",
            vec![
                PaletteEntry::Group(PaletteGroup::new(
                    'm',
                    "Model",
                    vec![PaletteAction::new('f', "Favourites", "a")],
                )),
                PaletteEntry::Group(PaletteGroup::new(
                    't',
                    "Thread",
                    vec![PaletteAction::new('f', "Fork", "b")],
                )),
            ],
        );
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_returns_selected_command() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.send(press(KeyCode::Char('m'))).unwrap();
        tx.send(press(KeyCode::Char('s'))).unwrap();

        let chosen = palette().run(&mut terminal, &mut rx).await.unwrap();
        assert_eq!(chosen, Some("switch"));
    }

    #[test]
    fn test_render_breadcrumb_and_badges() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let mut p = palette();
        terminal.draw(|f| p.render(f, f.area())).unwrap();
        let root = format!("{:?}", terminal.backend().buffer());
        assert!(root.contains("[m]"));
        assert!(root.contains("[q]"));

        p.handle_key(press(KeyCode::Char('m')));
        terminal.draw(|f| p.render(f, f.area())).unwrap();
        let group = format!("{:?}", terminal.backend().buffer());
        assert!(group.contains("< Model"));
        assert!(group.contains("[s]"));
    }
}
