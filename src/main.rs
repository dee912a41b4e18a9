//! Pantry - ingredient autocomplete in the terminal
//!
//! Collect ingredients with type-ahead suggestions and send them to a recipe
//! generation webhook.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode with the bundled ingredient list
//! pantry
//!
//! # One-shot suggestions from the simulated remote source
//! pantry --source simulated suggest chi
//!
//! # Send ingredients to the saved webhook
//! pantry generate rice beans garlic
//! ```

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use pantry::cli::CliInterface;
use pantry::error::Result;
use pantry::repl::ReplEngine;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive REPL
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if !cli.is_interactive() {
        cli.handle_subcommand().await?;
        return Ok(());
    }

    let mut repl = ReplEngine::new(cli.config(), cli.args().quiet)?;
    repl.run().await
}

/// Initialize logging system based on verbosity level
///
/// Logs go to stderr so they never mix with printed results. `RUST_LOG`
/// directives take precedence over the configured level.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
