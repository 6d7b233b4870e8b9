//! Terminal user interface for the layout inspector
//!
//! Built on ratatui + crossterm. [`app`] owns the state and event loop,
//! [`panes`] renders the individual views, and [`theme`] holds the colors.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
