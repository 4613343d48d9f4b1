//! # Generator Module
//!
//! Turns a parsed [`SourceFile`](crate::source::SourceFile) into a Rust module
//! that binds, validates and dispatches HTTP requests to annotated handlers.
//!
//! ## Overview
//!
//! For every record type with annotated fields the generator emits
//!
//! - **`bind`** - fills the record from named string inputs, parsing integers
//! - **`validate`** - applies `default`, `required`, `min`, `max`, `enum` in
//!   that order, returning the first failure
//!
//! and for every handler whose doc comment carries the route marker
//!
//! - **`handle_<name>`** - checks the HTTP method and the auth header, collects
//!   inputs, binds and validates the parameter record, calls the handler and
//!   wraps the outcome in a JSON envelope
//! - **`serve`** - one per receiver type, matching the request path exactly
//!
//! ## Architecture
//!
//! ```text
//! source file → syn → declarations → single pass → record / handler code
//!                                         ↓
//!                                  ReceiverRoutes → serve per receiver
//! ```
//!
//! Records and handler wrappers are written while the pass visits them;
//! `serve` blocks are written after the pass, once every route of a receiver
//! is known.
//!
//! ## Generated Module
//!
//! The output is meant to be included as a child module of the input:
//!
//! ```rust,ignore
//! #[path = "api_handlers.rs"]
//! mod api_handlers;
//! ```
//!
//! It starts with `use super::*;` and expects the parent to define the error
//! type (`ApiError { http_status: http::StatusCode, message: String }` by
//! default), `Default` for parameter records, and handlers shaped
//! `fn name(&self, request: &http::Request<Vec<u8>>, params: P) -> Result<R, E>`.
//! The consuming crate needs `http`, `url` and `serde_json`.
//!
//! Every response body is `{"error": "...", "response": ...}` with
//! `Content-Type: application/json`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use apigen::config::GeneratorConfig;
//! use apigen::generator::generate_file;
//!
//! let report = generate_file(
//!     Path::new("src/api.rs"),
//!     Path::new("src/api_handlers.rs"),
//!     &GeneratorConfig::default(),
//! )?;
//! println!("{} records, {} routes", report.records.len(), report.route_count());
//! ```
//!
//! ## Templates
//!
//! File-level templates live in `templates/`:
//!
//! - `preamble.rs.txt` - imports and runtime helpers
//! - `record.rs.txt` - `bind` / `validate` impl block
//! - `handler.rs.txt` - per-handler wrapper
//! - `serve.rs.txt` - per-receiver dispatch
//!
//! Per-rule snippets are kept in [`RULE_TEMPLATES`].

mod dispatch;
mod emit;
mod format;
mod record;
mod templates;

pub use dispatch::*;
pub use emit::*;
pub use format::*;
pub use record::*;
pub use templates::*;
