//! Struct declaration parser
//!
//! This module transforms declaration source text into an AST:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → struct definitions)
//! - [`ast`]: AST node definitions
//!
//! # Supported Subset
//!
//! Declarations only:
//! - `struct Name { ... };` definitions at the top level
//! - Field types: `char`, `bool`, `short`, `int`, `long`, `float`,
//!   `double`, `struct X`, pointers, sized arrays
//! - `void` only behind at least one `*`
//! - Comments and preprocessor lines are skipped
//! - No typedefs, unions, enums, bitfields, or function declarations
//!
//! Hand-written recursive descent parser, no parser generator.

pub mod ast;
pub mod lexer;
pub mod parse;
