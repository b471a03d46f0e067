//! Incrementally-filtered searchable pick list.
//!
//! `SearchableList` owns the query text, the filtered/ranked view, the
//! highlighted row, and the scroll window over a fixed candidate set. The
//! matcher is injected at construction, so filtering strategy is a
//! constructor argument rather than something callers reach in and rewrite.
//!
//! Invariants kept by every mutation:
//! - `selected < filtered.len()` whenever `filtered` is non-empty, else 0
//! - `offset <= selected < offset + window`
//! - scrolling is minimal: navigation moves the window just far enough to
//!   keep the highlight visible, never re-centers

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::matcher::{self, ScoredMatch};
use crate::render::{
    self, KeyHint, OverlayChrome, highlighted_line, more_indicator, truncate_with_ellipsis,
};

/// Default number of candidate rows visible at once.
pub const VISIBLE_WINDOW: usize = 15;

/// One selectable item. `value` is the identity; `label` and `description`
/// are display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub label: String,
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Pluggable filtering strategy: candidates + query in, ranked matches out.
pub type MatcherFn = fn(&[Candidate], &str) -> Vec<ScoredMatch>;

fn default_matcher(candidates: &[Candidate], query: &str) -> Vec<ScoredMatch> {
    matcher::rank(candidates, query, |c| format!("{} {}", c.label, c.value))
}

#[derive(Debug)]
pub struct SearchableList {
    title: String,
    candidates: Vec<Candidate>,
    matcher: MatcherFn,
    query: String,
    filtered: Vec<ScoredMatch>,
    selected: usize,
    offset: usize,
    window: usize,
}

impl SearchableList {
    pub fn new(title: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        let filtered = matcher::identity_listing(candidates.len());
        Self {
            title: title.into(),
            candidates,
            matcher: default_matcher,
            query: String::new(),
            filtered,
            selected: 0,
            offset: 0,
            window: VISIBLE_WINDOW,
        }
    }

    /// Replaces the filtering strategy and re-filters.
    #[must_use]
    pub fn with_matcher(mut self, matcher: MatcherFn) -> Self {
        self.matcher = matcher;
        self.refilter();
        self
    }

    /// Overrides the visible window size (min 1).
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self.scroll_to_selected();
        self
    }

    /// Pre-highlights the candidate with the given value, if present.
    #[must_use]
    pub fn with_selected_value(mut self, value: &str) -> Self {
        if let Some(pos) = self
            .filtered
            .iter()
            .position(|m| self.candidates[m.index].value == value)
        {
            self.selected = pos;
            self.scroll_to_selected();
        }
        self
    }

    /// Appends one printable character to the query and re-filters.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    /// Removes the last query character and re-filters. A backspace on an
    /// already-empty query is a no-op at this layer; the quick-pick overlay
    /// layers its own cancel-on-backspace policy on top.
    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.refilter();
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_to_selected();
        }
    }

    pub fn move_down(&mut self) {
        if !self.filtered.is_empty() && self.selected < self.filtered.len() - 1 {
            self.selected += 1;
            self.scroll_to_selected();
        }
    }

    /// Returns the highlighted candidate, or None when nothing matches
    /// (confirm on an empty result set is a no-op).
    pub fn confirm(&self) -> Option<&Candidate> {
        self.filtered
            .get(self.selected)
            .map(|m| &self.candidates[m.index])
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Number of filtered rows scrolled off above the window.
    pub fn hidden_above(&self) -> usize {
        self.offset
    }

    /// Number of filtered rows below the window.
    pub fn hidden_below(&self) -> usize {
        self.filtered.len().saturating_sub(self.offset + self.window)
    }

    /// Values of the filtered rows, in ranked order. Test-friendly view of
    /// the ordering without exposing the internals.
    pub fn filtered_values(&self) -> Vec<&str> {
        self.filtered
            .iter()
            .map(|m| self.candidates[m.index].value.as_str())
            .collect()
    }

    fn refilter(&mut self) {
        self.filtered = (self.matcher)(&self.candidates, &self.query);
        self.selected = 0;
        self.offset = 0;
    }

    fn scroll_to_selected(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.window {
            self.offset = self.selected - self.window + 1;
        }
    }

    fn visible(&self) -> impl Iterator<Item = (usize, &ScoredMatch)> {
        self.filtered
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.window)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let query_rows: u16 = if self.query.is_empty() { 0 } else { 2 };
        let above = self.hidden_above().min(1) as u16;
        let below = self.hidden_below().min(1) as u16;
        let shown = self
            .filtered
            .len()
            .saturating_sub(self.offset)
            .min(self.window)
            .max(1) as u16;

        let chrome = OverlayChrome {
            title: &self.title,
            border_color: Color::Cyan,
            width: 60,
            height: query_rows + above + shown + below + 3,
            hints: &[
                KeyHint::new("↑↓", "navigate"),
                KeyHint::new("Enter", "select"),
                KeyHint::new("Esc", "cancel"),
            ],
        };
        let layout = render::render_chrome(frame, area, &chrome);

        let mut y = layout.body.y;
        if !self.query.is_empty() {
            let query_area = Rect::new(layout.body.x, y, layout.body.width, 1);
            render::render_query_line(frame, query_area, &self.query, Color::Cyan);
            render::render_separator(frame, layout.body, 1);
            y += 2;
        }

        let mut lines: Vec<Line> = Vec::new();
        if self.filtered.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No matches",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            if self.hidden_above() > 0 {
                lines.push(more_indicator(self.hidden_above(), true));
            }
            let width = layout.body.width as usize;
            for (pos, m) in self.visible() {
                lines.push(self.candidate_row(pos, m, width));
            }
            if self.hidden_below() > 0 {
                lines.push(more_indicator(self.hidden_below(), false));
            }
        }

        let rows_area = Rect::new(
            layout.body.x,
            y,
            layout.body.width,
            layout.body.height.saturating_sub(y - layout.body.y),
        );
        frame.render_widget(Paragraph::new(lines), rows_area);
    }

    fn candidate_row(&self, pos: usize, m: &ScoredMatch, width: usize) -> Line<'static> {
        let candidate = &self.candidates[m.index];
        let is_selected = pos == self.selected;
        let marker = if is_selected { "▶ " } else { "  " };

        let label_width = width.saturating_sub(2).min(width * 2 / 3);
        let label = truncate_with_ellipsis(&candidate.label, label_width);

        // Match indices were computed against "label value"; only the ones
        // inside the label are highlightable on screen.
        let label_indices: Vec<usize> = m
            .indices
            .iter()
            .copied()
            .filter(|&i| i < label.len())
            .collect();

        let base = if is_selected { Color::White } else { Color::Cyan };
        let mut line = highlighted_line(&label, &label_indices, base, Color::Yellow);
        line.spans.insert(
            0,
            Span::styled(
                marker.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        );

        if let Some(desc) = &candidate.description {
            let used: usize = 2 + label.len();
            let remaining = width.saturating_sub(used + 2);
            if remaining > 3 {
                line.spans.push(Span::styled(
                    format!("  {}", truncate_with_ellipsis(desc, remaining)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        if is_selected {
            line.style = line.style.add_modifier(Modifier::BOLD);
        }
        line
    }
}
