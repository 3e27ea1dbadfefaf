//! # Campus CLI
//!
//! Command-line interface for the Campus academic API.
//!
//! ## Usage
//!
//! ```bash
//! campus serve     # Start the API server (runs migrations automatically)
//! campus migrate   # Run database migrations
//! campus validate  # Check the CAMPUS_* configuration
//! campus --help    # Show help
//! ```

mod commands;
mod config;
mod server;

use clap::{CommandFactory as _, Parser};
use commands::Commands;
use error::Result;
use migration::DatabaseConfig;

/// Campus - school academic structure API
#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level or filter directive (e.g. info, server=debug)
    #[arg(short = 'L', long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    /// Output format (json, pretty, compact)
    #[arg(short, long, env = "CAMPUS_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    /// Also write logs to this file (rolled daily)
    #[arg(long, env = "CAMPUS_LOG_FILE")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _guard = logging::init(&cli.log_level, &cli.log_format, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    logging::info!(target: "app", command = ?cli.command, "Campus CLI starting...");

    match cli.command {
        Commands::Serve(args) => {
            let config = config::AppConfig::from_env()?;
            server::serve(config, &args).await?;
        },
        Commands::Migrate(args) => commands::migrate::migrate(&DatabaseConfig::from_env()?, &args).await?,
        Commands::Completions(args) => commands::completions::completions(args.shell, &mut Cli::command())?,
        Commands::Validate => {
            commands::validate::validate()?;
        },
    }

    logging::info!(target: "app", "Campus CLI completed successfully");
    Ok(())
}
