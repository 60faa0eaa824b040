//! catalog CLI - music catalog REST API
//!
//! Entry point for the catalog server:
//! - `serve` runs the HTTP API (artists, albums, songs)
//! - `migrate` creates the tables and exits

use anyhow::Result;
use clap::{Parser, Subcommand};

mod serve;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    author,
    version,
    about = "REST API for a music catalog of artists, albums and songs"
)]
struct Cli {
    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
    /// Create missing catalog tables and exit
    Migrate(serve::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => serve::run_serve(args).await?,
        Commands::Migrate(args) => serve::run_migrate(args).await?,
    }
    Ok(())
}
