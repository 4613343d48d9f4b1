//! # apigen
//!
//! **apigen** generates HTTP request binding, validation and dispatch code for
//! plain Rust handler types, driven by attributes and doc comments in the
//! source file itself.
//!
//! ## Overview
//!
//! Given a source file with parameter records
//!
//! ```rust,ignore
//! #[derive(Default, apigen_macros::ApiParams)]
//! pub struct CreateParams {
//!     #[apivalidator("required,min=10")]
//!     pub login: String,
//!     #[apivalidator("enum=user|moderator|admin,default=user")]
//!     pub status: String,
//!     #[apivalidator("min=0,max=128")]
//!     pub age: i64,
//! }
//! ```
//!
//! and handlers marked with a route annotation
//!
//! ```rust,ignore
//! impl MyApi {
//!     /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
//!     pub fn create(
//!         &mut self,
//!         request: &http::Request<Vec<u8>>,
//!         params: CreateParams,
//!     ) -> Result<NewUser, ApiError> { ... }
//! }
//! ```
//!
//! apigen writes a module with `CreateParams::bind`, `CreateParams::validate`
//! and `MyApi::serve(request) -> http::Response<String>`.
//!
//! ## Architecture
//!
//! - **[`rules`]** - annotation mini-language (`required,min=10`)
//! - **[`source`]** - `syn`-based loader for records and handlers
//! - **[`routes`]** - route annotation parsing and per-receiver grouping
//! - **[`generator`]** - templates, record/dispatch generation and the driver
//! - **[`config`]** - generator settings and defaults
//! - **[`cli`]** - the `apigen` command line
//! - **[`logging`]** - tracing subscriber setup
//! - **[`error`]** - error type of the library
//!
//! ## Annotation Rules
//!
//! | Rule              | Effect                                                  |
//! |-------------------|---------------------------------------------------------|
//! | `paramname=<key>` | input key used by `bind` (`-` skips binding)            |
//! | `default=<value>` | assigned when the field holds `0` / `""`                |
//! | `required`        | fails when the field still holds `0` / `""`             |
//! | `min=<n>`         | lower bound (ints) or minimum length (strings)          |
//! | `max=<n>`         | upper bound (ints) or maximum length (strings)          |
//! | `enum=a\|b\|c`    | allowed values                                          |
//!
//! `validate` always applies them in the order default, required, min, max,
//! enum, field by field in declaration order, and stops at the first failure.
//!
//! ## Quick Start
//!
//! ```bash
//! apigen src/api.rs src/api_handlers.rs --fmt
//! ```
//!
//! ```rust,ignore
//! // src/api.rs
//! #[path = "api_handlers.rs"]
//! mod api_handlers;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod routes;
pub mod rules;
pub mod source;

pub use config::GeneratorConfig;
pub use error::GenError;
pub use generator::{generate, generate_file, generate_to_string, GenerationReport};
pub use source::{load_source, parse_source, SourceFile};
