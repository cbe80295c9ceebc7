//! CLI argument definitions and parsing structures.
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and the four workflow subcommands
//! (spec.md §6).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// assemblyzero - checkpointed workflow orchestration runtime
#[derive(Parser)]
#[command(name = "assemblyzero")]
#[command(about = "Durable, graph-structured runtime for an LLM-augmented TDD pipeline")]
#[command(long_about = r#"
assemblyzero advances an issue through a fixed node graph (N0...N8, with the
N2.5 and N4b branch nodes) from a Low-Level Design document through scaffolded
tests, generated implementation, verification, and published artifacts. Every
node transition is checkpointed, so a workflow can be resumed after an
external failure.

EXAMPLES:
  assemblyzero run --issue 42 --lld docs/designs/42-lld.md
  assemblyzero run --issue 42 --lld docs/designs/42-lld.md --auto
  assemblyzero resume --workflow-id issue-42
  assemblyzero list --json
  assemblyzero doctor

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > environment > config
  file > defaults. The config file is discovered by searching upward from CWD
  for .agentos/config.toml. Use --config to specify an explicit path.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output regardless of terminal detection
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands (spec.md §6 CLI surface).
#[derive(Subcommand)]
pub enum Commands {
    /// Start a new workflow for an issue from its LLD document
    ///
    /// EXAMPLES:
    ///   assemblyzero run --issue 42 --lld docs/designs/42-lld.md
    ///   assemblyzero run --issue 42 --lld 42-lld.md --scaffold-only
    ///   assemblyzero run --issue 42 --lld 42-lld.md --auto --skip-docs
    Run {
        /// Issue number the workflow is tracking
        #[arg(long)]
        issue: u64,

        /// Path to the LLD markdown document
        #[arg(long)]
        lld: PathBuf,

        /// Auto mode: don't stop on a BLOCKED test-plan review
        #[arg(long)]
        auto: bool,

        /// Stop after N2 (scaffolding tests), without implementing code
        #[arg(long)]
        scaffold_only: bool,

        /// Skip N8 (documentation/report publication)
        #[arg(long)]
        skip_docs: bool,

        /// Repository root to operate against (defaults to the enclosing git
        /// working tree)
        #[arg(long)]
        repo_root: Option<PathBuf>,

        /// Override the configured max N4/N5/N6 iteration cap
        #[arg(long)]
        max_iterations: Option<u32>,
    },

    /// Resume a workflow from its last committed checkpoint
    ///
    /// EXAMPLES:
    ///   assemblyzero resume --workflow-id issue-42
    Resume {
        /// Workflow id to resume (e.g. "issue-42")
        #[arg(long)]
        workflow_id: String,
    },

    /// List known workflows and their last checkpointed node
    ///
    /// EXAMPLES:
    ///   assemblyzero list
    ///   assemblyzero list --json
    List {
        /// Output the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run environment health checks
    ///
    /// Verifies git is available, the checkpoint location can be resolved,
    /// and the audit/report directories are writable.
    ///
    /// EXAMPLES:
    ///   assemblyzero doctor
    ///   assemblyzero doctor --json
    Doctor {
        /// Output doctor results as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the CLI command structure without parsing arguments; used for
/// introspection in tests.
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
