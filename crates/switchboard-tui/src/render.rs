//! Shared rendering utilities for selection overlays.
//!
//! Every component renders the same chrome: a cleared, bordered, centered
//! popup with a title, a body, and a footer line of key hints. The helpers
//! here own that chrome so the components only fill in rows.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` terminal
/// columns (unicode-width aware; CJK and emoji count as two columns).
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        let next_width = truncated.width() + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// One key hint in the footer, e.g. `↑↓ navigate`.
pub struct KeyHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> KeyHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Chrome configuration for one overlay.
pub struct OverlayChrome<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [KeyHint<'a>],
}

/// Rectangles produced by `render_chrome`.
pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Renders the popup chrome (clear, border, title, footer hints) centered in
/// `area`, and returns the inner body rect for the component's rows.
pub fn render_chrome(frame: &mut Frame, area: Rect, chrome: &OverlayChrome<'_>) -> OverlayLayout {
    let width = chrome.width.min(area.width.saturating_sub(4));
    let height = chrome.height.min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(chrome.border_color))
        .title(format!(" {} ", chrome.title))
        .title_style(
            Style::default()
                .fg(chrome.border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, popup);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    let footer_height = u16::from(!chrome.hints.is_empty());
    if footer_height > 0 {
        let footer = Rect::new(
            inner.x,
            inner.y + inner.height.saturating_sub(1),
            inner.width,
            1,
        );
        render_hints(frame, footer, chrome.hints, chrome.border_color);
    }

    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );

    OverlayLayout { popup, body }
}

/// Renders the footer hint line, centered.
fn render_hints(frame: &mut Frame, area: Rect, hints: &[KeyHint<'_>], highlight: Color) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Renders the query echo row: `› <query>█`.
pub fn render_query_line(frame: &mut Frame, area: Rect, query: &str, accent: Color) {
    let max_width = area.width.saturating_sub(4) as usize;
    let display = truncate_with_ellipsis(query, max_width);
    let line = Line::from(vec![
        Span::styled("› ", Style::default().fg(Color::DarkGray)),
        Span::styled(display, Style::default().fg(accent)),
        Span::styled("█", Style::default().fg(accent)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Renders a horizontal separator at `y_offset` rows into `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        separator_area,
    );
}

/// The `↑ N more` / `↓ N more` indicator row shown when the filtered set
/// overflows the visible window.
pub fn more_indicator(hidden: usize, above: bool) -> Line<'static> {
    let arrow = if above { "↑" } else { "↓" };
    Line::from(Span::styled(
        format!("  {arrow} {hidden} more"),
        Style::default().fg(Color::DarkGray),
    ))
}

/// A chord-key badge: `[g]` in a distinct style.
pub fn chord_badge(key: char, accent: Color) -> Span<'static> {
    Span::styled(
        format!("[{key}]"),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )
}

/// Builds a line with matched characters highlighted.
///
/// Bytes listed in `match_indices` render bold in the accent color, the
/// rest in `base`.
pub fn highlighted_line(
    text: &str,
    match_indices: &[usize],
    base: Color,
    accent: Color,
) -> Line<'static> {
    use std::collections::HashSet;

    if match_indices.is_empty() {
        return Line::from(Span::styled(text.to_string(), Style::default().fg(base)));
    }

    let match_set: HashSet<usize> = match_indices.iter().copied().collect();
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_is_match = false;

    for (byte_idx, ch) in text.char_indices() {
        let is_match = match_set.contains(&byte_idx);
        if is_match != current_is_match && !current.is_empty() {
            spans.push(styled_run(std::mem::take(&mut current), current_is_match, base, accent));
        }
        current.push(ch);
        current_is_match = is_match;
    }
    if !current.is_empty() {
        spans.push(styled_run(current, current_is_match, base, accent));
    }

    Line::from(spans)
}

fn styled_run(text: String, is_match: bool, base: Color, accent: Color) -> Span<'static> {
    let style = if is_match {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(base)
    };
    Span::styled(text, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_and_exact() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // CJK characters take two columns each.
        assert_eq!(truncate_with_ellipsis("中文test", 6), "中文t…");
    }

    #[test]
    fn test_highlighted_line_no_matches_is_single_span() {
        let line = highlighted_line("claude-x", &[], Color::Cyan, Color::Yellow);
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_highlighted_line_splits_runs() {
        let line = highlighted_line("claude-x", &[0, 1, 7], Color::Cyan, Color::Yellow);
        // "cl" highlighted, "aude-" base, "x" highlighted.
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[0].content, "cl");
        assert_eq!(line.spans[0].style.fg, Some(Color::Yellow));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line.spans[1].content, "aude-");
        assert_eq!(line.spans[1].style.fg, Some(Color::Cyan));
        assert_eq!(line.spans[2].content, "x");
    }

    #[test]
    fn test_more_indicator_text() {
        let above = more_indicator(3, true);
        assert_eq!(above.spans[0].content, "  ↑ 3 more");
        let below = more_indicator(7, false);
        assert_eq!(below.spans[0].content, "  ↓ 7 more");
    }
}
