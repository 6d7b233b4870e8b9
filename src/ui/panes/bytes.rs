//! Byte map pane: one cell per byte of the selected struct
//!
//! Field bytes render as `00` in the owning field's palette color so the
//! zeroed memory is visible at a glance; padding bytes render dim as `··`.
//! The decimal offset gutter lines rows up with the fields table and the
//! text report. Bytes belonging to the member under the cursor are shown
//! reversed.

use crate::types::StructLayout;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the byte map pane
pub struct BytesRenderData<'a> {
    pub layout: &'a StructLayout,
    /// Index of the member under the cursor.
    pub cursor: usize,
}

/// Scroll state for the byte map pane
pub struct BytesScrollState {
    pub offset: usize,
}

impl BytesScrollState {
    pub fn new() -> Self {
        Self { offset: 0 }
    }
}

impl Default for BytesScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the byte map pane
pub fn render_bytes_pane(
    frame: &mut Frame,
    area: Rect,
    data: BytesRenderData,
    is_focused: bool,
    scroll_state: &mut BytesScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Byte Map ({} bytes) ", data.layout.size))
        .borders(Borders::ALL)
        .border_style(border_style);

    // "  NN: " gutter is 6 columns, each cell is "xx " at 3.
    let content_width = area.width.saturating_sub(2) as usize;
    let bytes_per_line = (content_width.saturating_sub(6) / 3).clamp(4, 16);
    let total_rows = data.layout.size.div_ceil(bytes_per_line);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_rows > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_rows - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    // Only rows inside the viewport get built; the aggregate can be huge.
    let last_row = (scroll_state.offset + visible_height).min(total_rows);
    let mut items: Vec<ListItem> = Vec::with_capacity(last_row - scroll_state.offset);
    for row in scroll_state.offset..last_row {
        let row_start = row * bytes_per_line;
        let row_end = row_start.saturating_add(bytes_per_line).min(data.layout.size);

        let mut spans = vec![Span::styled(
            format!("{:>4}: ", row_start),
            Style::default().fg(DEFAULT_THEME.comment),
        )];
        for byte in row_start..row_end {
            match owner_of(data.layout, byte) {
                Some(i) => {
                    let mut style = Style::default().fg(DEFAULT_THEME.field_color(i));
                    if i == data.cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled("00", style));
                }
                None => {
                    spans.push(Span::styled(
                        "··",
                        Style::default().fg(DEFAULT_THEME.padding_byte),
                    ));
                }
            }
            spans.push(Span::raw(" "));
        }
        items.push(ListItem::new(Line::from(spans)));
    }

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Index of the member owning `byte`, or `None` for a padding byte.
///
/// Members sit in ascending offset order with non-overlapping extents, so
/// the owner is found by binary search rather than a per-byte table.
fn owner_of(layout: &StructLayout, byte: usize) -> Option<usize> {
    let i = layout.members.partition_point(|m| m.end() <= byte);
    let member = layout.members.get(i)?;
    if member.offset <= byte {
        Some(i)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;
    use crate::types::StructRegistry;

    fn layout_of(source: &str, name: &str) -> StructLayout {
        let mut parser = Parser::new(source).unwrap();
        let mut registry = StructRegistry::from_program(parser.parse_program().unwrap()).unwrap();
        registry.resolve(name).unwrap()
    }

    #[test]
    fn test_owner_of_fields_and_padding() {
        let layout = layout_of("struct M { char a; double d; };", "M");

        assert_eq!(owner_of(&layout, 0), Some(0));
        assert_eq!(owner_of(&layout, 1), None); // padding before d
        assert_eq!(owner_of(&layout, 7), None);
        assert_eq!(owner_of(&layout, 8), Some(1));
        assert_eq!(owner_of(&layout, 15), Some(1));
    }

    #[test]
    fn test_owner_of_trailing_padding() {
        let layout = layout_of("struct T { double d; char c; };", "T");

        assert_eq!(layout.size, 16);
        assert_eq!(owner_of(&layout, 8), Some(1));
        assert_eq!(owner_of(&layout, 9), None);
        assert_eq!(owner_of(&layout, 15), None);
    }

    #[test]
    fn test_owner_of_scales_past_the_viewport() {
        let layout = layout_of("struct Big { char buf[2000000000]; bool done; };", "Big");

        assert_eq!(owner_of(&layout, 0), Some(0));
        assert_eq!(owner_of(&layout, 1_999_999_999), Some(0));
        assert_eq!(owner_of(&layout, 2_000_000_000), Some(1));
    }
}
