//! # CLI Module
//!
//! Command-line front end of the generator.
//!
//! ```bash
//! apigen src/api.rs src/api_handlers.rs
//! ```
//!
//! Options (each falls back to an environment variable, then a default):
//! - `--marker <PREFIX>` - route marker (`APIGEN_ROUTE_MARKER`, `apigen:api`)
//! - `--attr <NAME>` - field attribute (`APIGEN_VALIDATOR_ATTR`, `apivalidator`)
//! - `--error-type <TYPE>` - error type (`APIGEN_ERROR_TYPE`, `ApiError`)
//! - `--auth-header <NAME>` - auth header (`APIGEN_AUTH_HEADER`, `X-Auth`)
//! - `--auth-token <TOKEN>` - auth token (`APIGEN_AUTH_TOKEN`, `100500`)
//! - `--fmt` - run `rustfmt` on the output
//!
//! Exit status is 0 on success and 1 on any error, with the error chain on
//! stderr. On error the output file may hold a partial module and must not
//! be used.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use apigen::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli)?;
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli};
