//! # Introduction
//!
//! structty parses C struct declarations and computes their memory layout
//! under the usual LP64 alignment rules: each field goes at the next offset
//! that is a multiple of its alignment, and the struct is padded out to a
//! multiple of its strictest member.  The result is shown either as a text
//! report or in a terminal UI built with [ratatui](https://docs.rs/ratatui)
//! that maps every byte, padding included.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Registry → Layout → Report / TUI
//! ```
//!
//! 1. [`parser`] — tokenises the declaration file and builds an AST.
//! 2. [`types`] — resolves field types against a [`types::StructRegistry`]
//!    and produces a [`types::StructLayout`] per struct.
//! 3. [`layout`] — the core calculator: pure offset arithmetic over
//!    (size, alignment) pairs, no parsing involved.
//! 4. [`value`] — tagged [`value::Value`] variants used to show each
//!    member's zero value alongside its slot.
//! 5. [`report`] — plain-text rendering of a resolved layout.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported declarations
//!
//! Types: `char`, `bool`, `short`, `int`, `long`, `float`, `double`,
//! pointers, fixed-size arrays, and by-value nesting of previously declared
//! structs.  Self-reference is allowed through pointers only.

pub mod layout;
pub mod parser;
pub mod report;
pub mod types;
pub mod ui;
pub mod value;
