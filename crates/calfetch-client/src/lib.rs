//! CLI wiring for calfetch.
//!
//! This crate provides the `calfetch` command-line interface.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
