//! Firewatch CLI - wildfire hazards and proximity alerts in the terminal.

use clap::Parser;
use firewatch_cli::{commands, config, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (log to stderr, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(run());
    // Don't wait on a pending stdin read
    runtime.shutdown_background();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> firewatch_cli::Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli)?;
    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        None => commands::execute_watch(Default::default(), &config, &formatter).await?,
        Some(Command::Watch(args)) => commands::execute_watch(args, &config, &formatter).await?,
        Some(Command::Once) => commands::execute_once(&config, &formatter).await?,
        Some(Command::Nearby(args)) => commands::execute_nearby(args, &config, &formatter).await?,
    }

    Ok(())
}
