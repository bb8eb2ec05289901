//! xof-core: two-stage parser for the DirectX .x text format.
//!
//! A .x text file is self-describing: a schema section declares named record
//! types ("templates"), and a data section — with no separator in between —
//! contains instances of them. For every declared template this crate
//! composes, at runtime, a parsing procedure out of small combinators, and
//! stores it in a registry consulted while the data section is parsed.
//! Backtracking (needed to discover the section boundary, and to end
//! restriction child loops) is done with immutable cursor values rather than
//! any undo machinery.
//!
//! # Public API
//!
//! - [`parse_source()`] -- lex and parse a complete source
//! - [`parse()`] -- parse from an already-built [`Cursor`]
//! - [`Record`], [`Value`], [`Child`] -- the parsed data model
//! - [`Registry`], [`DataParser`], [`ComponentParser`] -- the composed-
//!   procedure machinery, usable directly for custom environments
//! - [`ParseError`] -- the error type; `Unsupported` is fatal

pub mod combinator;
pub mod component;
pub mod cursor;
pub mod data;
pub mod error;
pub mod lexer;
pub mod parse;
pub mod record;
pub mod registry;
pub mod template;

// ── Convenience re-exports: key types ────────────────────────────────

pub use cursor::Cursor;
pub use data::Instance;
pub use error::ParseError;
pub use lexer::{Primitive, Spanned, Token};
pub use record::{Child, Record, Value};
pub use registry::{ComponentParser, DataParser, Registry};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use lexer::lex;
pub use parse::{parse, parse_source};
