//! # Source Model
//!
//! Structural view of the input file: record types with their fields and
//! annotations, and functions with their receiver, parameter types and doc
//! comment. Built with `syn`; only top-level items and items of top-level
//! `impl` blocks are considered.

mod load;
mod types;

pub use load::*;
pub use types::*;
