//! Hikari CLI - Command-line interface
//!
//! Provides command-line access to the catalog API server and the dataset
//! validator.

mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "hikari")]
#[command(about = "A read-only anime catalog API")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    commands::handle_command(cli.command).await?;

    Ok(())
}
