//! assemblyzero - a durable, graph-structured workflow engine driving an
//! LLM-augmented TDD pipeline from a Low-Level Design document through
//! scaffolded tests, generated implementation, verification, and published
//! artifacts.
//!
//! This crate is the thin root binary: it wires together the component
//! crates (`assemblyzero-location`, `assemblyzero-store`,
//! `assemblyzero-state`, `assemblyzero-collab`, `assemblyzero-gate`,
//! `assemblyzero-nodes`, `assemblyzero-graph`) behind a `clap`-based CLI.

pub mod cli;
pub mod collaborators;
pub mod config;

pub use config::Config;
