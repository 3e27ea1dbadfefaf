//! # CLI Commands
//!
//! Implementation of CLI commands for the Campus application.

pub mod completions;
pub mod migrate;
pub mod validate;

use clap::{Args, Subcommand};

/// Available commands for the Campus CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Verify configuration
    Validate,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Server host to bind to
    #[arg(long, env = "CAMPUS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port to bind to
    #[arg(short, long, env = "CAMPUS_PORT", default_value = "3000")]
    pub port: u16,

    /// Skip applying pending migrations on startup
    #[arg(long, env = "CAMPUS_SKIP_MIGRATIONS")]
    pub skip_migrations: bool,
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// List pending migrations without applying them
    #[arg(long, conflicts_with = "rollback")]
    pub dry_run: bool,

    /// Roll back applied migrations instead of applying new ones
    #[arg(long)]
    pub rollback: bool,

    /// Number of migrations to roll back
    #[arg(long, default_value_t = 1, requires = "rollback", value_parser = clap::value_parser!(u32).range(1..))]
    pub steps: u32,
}

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
