//! Main application state and event loop for the TUI
//!
//! # Layout
//!
//! The screen splits into the declaration source on the left and the
//! selected struct on the right, with the member table above the byte map
//! and a one-line status bar at the bottom. Left/Right cycle through the
//! structs in declaration order, Up/Down move within the focused pane,
//! and `o` toggles between the declared layout and the reordered
//! (padding-minimized) one.

use crate::types::StructLayout;
use crate::ui::panes::{
    render_bytes_pane, render_fields_pane, render_source_pane, render_status_bar, BytesRenderData,
    BytesScrollState, FieldsRenderData, FieldsScrollState, SourceRenderData, SourceScrollState,
    StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane owns Up/Down input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Fields,
    Bytes,
}

impl FocusedPane {
    fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Fields,
            FocusedPane::Fields => FocusedPane::Bytes,
            FocusedPane::Bytes => FocusedPane::Source,
        }
    }
}

/// Application state for the layout inspector
pub struct App {
    source_code: String,
    /// Layouts in declaration order; never empty.
    layouts: Vec<StructLayout>,
    /// Reordered counterpart of each entry in `layouts`.
    packed_layouts: Vec<StructLayout>,
    selected: usize,
    field_cursor: usize,
    show_packed: bool,
    focused_pane: FocusedPane,
    source_scroll: SourceScrollState,
    fields_scroll: FieldsScrollState,
    bytes_scroll: BytesScrollState,
    should_quit: bool,
}

impl App {
    pub fn new(
        source_code: String,
        layouts: Vec<StructLayout>,
        packed_layouts: Vec<StructLayout>,
    ) -> Self {
        let mut source_scroll = SourceScrollState::new();
        if let Some(first) = layouts.first() {
            source_scroll.reveal(first.location.line);
        }
        Self {
            source_code,
            layouts,
            packed_layouts,
            selected: 0,
            field_cursor: 0,
            show_packed: false,
            focused_pane: FocusedPane::Fields,
            source_scroll,
            fields_scroll: FieldsScrollState::new(),
            bytes_scroll: BytesScrollState::new(),
            should_quit: false,
        }
    }

    /// Run the event loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(outer[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let layout = if self.show_packed {
            &self.packed_layouts[self.selected]
        } else {
            &self.layouts[self.selected]
        };

        render_source_pane(
            frame,
            columns[0],
            SourceRenderData {
                source: &self.source_code,
                highlight_line: layout.location.line,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        render_fields_pane(
            frame,
            right[0],
            FieldsRenderData {
                layout,
                cursor: self.field_cursor,
                packed: self.show_packed,
            },
            self.focused_pane == FocusedPane::Fields,
            &mut self.fields_scroll,
        );

        render_bytes_pane(
            frame,
            right[1],
            BytesRenderData {
                layout,
                cursor: self.field_cursor,
            },
            self.focused_pane == FocusedPane::Bytes,
            &mut self.bytes_scroll,
        );

        render_status_bar(
            frame,
            outer[1],
            StatusRenderData {
                name: &layout.name,
                size: layout.size,
                align: layout.align,
                padding: layout.padding_total(),
                index: self.selected,
                total: self.layouts.len(),
                packed: self.show_packed,
            },
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.focused_pane = self.focused_pane.next(),
            KeyCode::Left => self.select_previous(),
            KeyCode::Right => self.select_next(),
            KeyCode::Char('o') | KeyCode::Char('O') => self.show_packed = !self.show_packed,
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            _ => {}
        }
    }

    fn current_layout(&self) -> &StructLayout {
        if self.show_packed {
            &self.packed_layouts[self.selected]
        } else {
            &self.layouts[self.selected]
        }
    }

    fn select_next(&mut self) {
        if self.layouts.len() > 1 {
            self.selected = (self.selected + 1) % self.layouts.len();
            self.on_selection_change();
        }
    }

    fn select_previous(&mut self) {
        if self.layouts.len() > 1 {
            self.selected = if self.selected == 0 {
                self.layouts.len() - 1
            } else {
                self.selected - 1
            };
            self.on_selection_change();
        }
    }

    fn on_selection_change(&mut self) {
        self.field_cursor = 0;
        self.fields_scroll.offset = 0;
        self.bytes_scroll.offset = 0;
        self.source_scroll
            .reveal(self.layouts[self.selected].location.line);
    }

    fn move_up(&mut self) {
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_scroll.offset = self.source_scroll.offset.saturating_sub(1);
            }
            FocusedPane::Fields => {
                self.field_cursor = self.field_cursor.saturating_sub(1);
            }
            FocusedPane::Bytes => {
                self.bytes_scroll.offset = self.bytes_scroll.offset.saturating_sub(1);
            }
        }
    }

    fn move_down(&mut self) {
        match self.focused_pane {
            FocusedPane::Source => {
                // Clamped to the content during the next render.
                self.source_scroll.offset += 1;
            }
            FocusedPane::Fields => {
                let members = self.current_layout().members.len();
                if self.field_cursor + 1 < members {
                    self.field_cursor += 1;
                }
            }
            FocusedPane::Bytes => {
                self.bytes_scroll.offset += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;
    use crate::types::StructRegistry;
    use crossterm::event::KeyModifiers;

    fn app_from_source(source: &str) -> App {
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();
        let mut registry = StructRegistry::from_program(program).unwrap();
        let names: Vec<String> = registry.names().to_vec();
        let layouts: Vec<StructLayout> = names
            .iter()
            .map(|name| registry.resolve(name).unwrap())
            .collect();
        let packed: Vec<StructLayout> = names
            .iter()
            .map(|name| registry.resolve_packed(name).unwrap())
            .collect();
        App::new(source.to_string(), layouts, packed)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_struct_selection_wraps() {
        let mut app = app_from_source(
            "struct A { int x; };\nstruct B { int y; };\nstruct C { int z; };",
        );
        assert_eq!(app.selected, 0);

        app.handle_key_event(press(KeyCode::Left));
        assert_eq!(app.selected, 2);
        app.handle_key_event(press(KeyCode::Right));
        assert_eq!(app.selected, 0);
        app.handle_key_event(press(KeyCode::Right));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_field_cursor_clamps_to_member_count() {
        let mut app = app_from_source("struct P { int x; int y; };");
        assert_eq!(app.focused_pane, FocusedPane::Fields);

        app.handle_key_event(press(KeyCode::Down));
        app.handle_key_event(press(KeyCode::Down));
        app.handle_key_event(press(KeyCode::Down));
        assert_eq!(app.field_cursor, 1);

        app.handle_key_event(press(KeyCode::Up));
        app.handle_key_event(press(KeyCode::Up));
        assert_eq!(app.field_cursor, 0);
    }

    #[test]
    fn test_selection_change_resets_cursor() {
        let mut app = app_from_source(
            "struct A { char a; double b; int c; };\nstruct B { long x; };",
        );
        app.handle_key_event(press(KeyCode::Down));
        assert_eq!(app.field_cursor, 1);

        app.handle_key_event(press(KeyCode::Right));
        assert_eq!(app.selected, 1);
        assert_eq!(app.field_cursor, 0);
    }

    #[test]
    fn test_pack_toggle_keeps_selection() {
        let mut app = app_from_source("struct M { char a; long b; char c; };");
        assert!(!app.show_packed);

        app.handle_key_event(press(KeyCode::Char('o')));
        assert!(app.show_packed);
        assert_eq!(app.current_layout().size, 16);

        app.handle_key_event(press(KeyCode::Char('o')));
        assert!(!app.show_packed);
        assert_eq!(app.current_layout().size, 24);
    }

    #[test]
    fn test_quit_key() {
        let mut app = app_from_source("struct P { int x; };");
        assert!(!app.should_quit);
        app.handle_key_event(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
