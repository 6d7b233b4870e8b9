//! Declaration source pane with syntax highlighting
//!
//! Shows the declaration file as written, with the selected struct's
//! definition line marked. Highlighting is a small character tokenizer, not
//! the real lexer; it only needs to color keywords, numbers, and comments.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source: &'a str,
    /// 1-based line of the selected struct's definition.
    pub highlight_line: usize,
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    reveal_line: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            reveal_line: None,
        }
    }

    /// Ask the next render to bring `line` (1-based) into view.
    pub fn reveal(&mut self, line: usize) {
        self.reveal_line = Some(line);
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple syntax highlighting for declaration lines
fn highlight_decl_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to end of line
        if c == '/' && i + 1 < chars.len() && (chars[i + 1] == '/' || chars[i + 1] == '*') {
            if !current_word.is_empty() {
                spans.push(Span::styled(
                    current_word.clone(),
                    word_style(&current_word),
                ));
                current_word.clear();
            }
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(
                rest,
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                spans.push(Span::styled(
                    current_word.clone(),
                    word_style(&current_word),
                ));
                current_word.clear();
            }

            let style = match c {
                '{' | '}' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = word_style(&current_word);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn word_style(word: &str) -> Style {
    match word {
        "char" | "bool" | "short" | "int" | "long" | "float" | "double" | "void" => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        "struct" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the declaration source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Declarations ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = data.source.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Bring a newly selected struct into view; manual scrolling afterwards
    // is left alone.
    if let Some(line) = scroll_state.reveal_line.take() {
        let line_idx = line.saturating_sub(1);
        let in_view = line_idx >= scroll_state.offset
            && line_idx < scroll_state.offset + visible_height;
        if !in_view {
            scroll_state.offset = line_idx.saturating_sub(visible_height / 2);
        }
    }

    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_selected = line_num == data.highlight_line;
            let line_num_str = format!("{:4} ", line_num);

            let (num_style, content_bg) = if is_selected {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Some(Style::default().bg(DEFAULT_THEME.current_line_bg)),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), None)
            };

            let mut content_line = highlight_decl_line(line);
            if let Some(bg) = content_bg {
                for span in &mut content_line.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
