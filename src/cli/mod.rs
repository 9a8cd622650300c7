//! # CLI Module
//!
//! Command-line access to a route manifest: print the table, test which route a
//! request hits, and generate paths.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! ```bash
//! routeway routes --manifest routes.yaml
//! ```
//!
//! ### `match`
//!
//! ```bash
//! routeway match --manifest routes.yaml --method POST --override PUT /page/42
//! ```
//!
//! Prints the route key followed by one `name = value` line per parameter, or
//! `no route`.
//!
//! ### `generate`
//!
//! ```bash
//! routeway generate --manifest routes.yaml page --arg id=42
//! routeway generate --manifest routes.yaml page --partial
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,no_run
//! use routeway::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! execute(&cli.command, &mut std::io::stdout()).unwrap();
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands};
