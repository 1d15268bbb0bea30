//! CLI entry point.
//!
//! Parses arguments, configures logging, and dispatches to the handler
//! for the chosen subcommand.

use clap::Parser;

use headway_cli::{Cli, Commands, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; --verbose opens the debug targets
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Count { workers, budget } => {
            handlers::count::execute(workers, budget, cli.json).await?;
        }
        Commands::Observe {
            workers,
            budget,
            signaler,
            all_workers,
        } => {
            handlers::observe::execute(workers, budget, signaler, all_workers, cli.json).await?;
        }
        Commands::Cancel {
            workers,
            budget,
            after_ms,
        } => {
            handlers::cancel::execute(workers, budget, after_ms, cli.json).await?;
        }
        Commands::Quotes {
            sources,
            min_ms,
            max_ms,
            timeout_ms,
        } => {
            handlers::quotes::execute(sources, min_ms, max_ms, timeout_ms, cli.json).await?;
        }
    }

    Ok(())
}
