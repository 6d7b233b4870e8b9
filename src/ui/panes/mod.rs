//! TUI pane rendering modules
//!
//! Each pane takes a render-data struct borrowed from [`crate::ui::app::App`]
//! plus its own scroll state, so rendering never needs mutable access to the
//! whole application.
//!
//! - `source`: the declaration file with syntax highlighting
//! - `fields`: the member table for the selected struct
//! - `bytes`: the per-byte map with padding marked
//! - `status`: the bottom bar with keybindings

pub mod bytes;
pub mod fields;
pub mod source;
pub mod status;

pub use bytes::{render_bytes_pane, BytesRenderData, BytesScrollState};
pub use fields::{render_fields_pane, FieldsRenderData, FieldsScrollState};
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
