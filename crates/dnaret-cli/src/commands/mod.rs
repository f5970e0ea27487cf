//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function; `export` holds
//! the file writer shared by `fetch` and `retrieve`.

pub mod config;
pub mod export;
pub mod fetch;
pub mod list;
pub mod retrieve;
