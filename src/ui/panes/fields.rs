//! Fields pane: the member table for the selected struct
//!
//! One row per member showing its color swatch, offset, size, and C
//! declaration, with dim rows for the padding in between, mirroring the
//! text report. The cursor row is highlighted and kept visible when the
//! list scrolls.

use crate::types::StructLayout;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the fields pane
pub struct FieldsRenderData<'a> {
    pub layout: &'a StructLayout,
    /// Index of the member under the cursor.
    pub cursor: usize,
    pub packed: bool,
}

/// Scroll state for the fields pane
pub struct FieldsScrollState {
    pub offset: usize,
}

impl FieldsScrollState {
    pub fn new() -> Self {
        Self { offset: 0 }
    }
}

impl Default for FieldsScrollState {
    fn default() -> Self {
        Self::new()
    }
}

fn padding_row(bytes: usize, label: &str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        format!("   {:>4} {:>3}  {}", "", bytes, label),
        Style::default().fg(DEFAULT_THEME.comment),
    )))
}

/// Render the fields pane
pub fn render_fields_pane(
    frame: &mut Frame,
    area: Rect,
    data: FieldsRenderData,
    is_focused: bool,
    scroll_state: &mut FieldsScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let title = if data.packed {
        format!(" struct {} [packed] ", data.layout.name)
    } else {
        format!(" struct {} ", data.layout.name)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items: Vec<ListItem> = Vec::new();
    let mut cursor_row = 0;

    for (i, member) in data.layout.members.iter().enumerate() {
        if member.padding_before > 0 {
            all_items.push(padding_row(member.padding_before, "(padding)"));
        }

        let selected = i == data.cursor;
        if selected {
            cursor_row = all_items.len();
        }
        let bg = if selected {
            Style::default().bg(DEFAULT_THEME.current_line_bg)
        } else {
            Style::default()
        };

        let spans = vec![
            Span::styled(
                " ■ ",
                Style::default().fg(DEFAULT_THEME.field_color(i)).patch(bg),
            ),
            Span::styled(
                format!("{:>4} ", member.offset),
                Style::default().fg(DEFAULT_THEME.number).patch(bg),
            ),
            Span::styled(
                format!("{:>3}  ", member.size),
                Style::default().fg(DEFAULT_THEME.comment).patch(bg),
            ),
            Span::styled(
                member.decl.c_decl(&member.name),
                Style::default().fg(DEFAULT_THEME.fg).patch(bg),
            ),
        ];
        all_items.push(ListItem::new(Line::from(spans)));
    }

    if data.layout.trailing_padding > 0 {
        all_items.push(padding_row(data.layout.trailing_padding, "(trailing padding)"));
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the cursor row in view, then clamp to the valid range.
    if cursor_row < scroll_state.offset {
        scroll_state.offset = cursor_row;
    } else if cursor_row >= scroll_state.offset + visible_height {
        scroll_state.offset = cursor_row + 1 - visible_height;
    }
    if total_items > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_items - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
