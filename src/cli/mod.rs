//! CLI module for Team Guard
//!
//! Subcommands:
//! - `serve`: HTTP server with the team pages and probes
//! - `migrate`: apply PostgreSQL migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Team Guard - authorization guard for team-scoped resources
#[derive(Parser)]
#[command(name = "team-guard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply pending PostgreSQL migrations
    Migrate,
}
