//! Command-line interface for the `assemblyzero` driver.
//!
//! ## Module structure
//!
//! - `args`: CLI argument definitions and parsing structures (clap)
//! - `run`: entry point, configuration wiring, and command dispatch
//! - `commands`: one module per subcommand implementation

pub mod args;
mod commands;
mod run;

pub use args::{build_cli, Cli, Commands};
pub use run::run;
