mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::interactive::{self, LoopExit};
use flaggate_core::models::{ClientConfiguration, LogLevel};
use flaggate_core::services::logging::init_logging;
use flaggate_core::FactoryBuilder;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flaggate")]
#[command(version)]
#[command(about = "Evaluate feature flags from standard input")]
#[command(
    long_about = "Builds a flag client from TOKEN and reads '<key> <flag>' lines from standard input, \
printing 'on' or 'off' for each. Type 'exit' to quit.\n\n\
Use 'localhost' as TOKEN to serve treatments from ~/.split instead of the remote service."
)]
struct Cli {
    /// SDK token, or `localhost` for local override mode
    token: String,

    /// Path to configuration file (default: ~/.config/flaggate/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wait up to this many milliseconds for rule data before reading input
    #[arg(long)]
    ready_timeout_ms: Option<u64>,

    /// Logging verbosity (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn load_config(path: Option<&PathBuf>) -> Result<ClientConfiguration> {
    let path = match path {
        Some(path) => path.clone(),
        None => match ClientConfiguration::default_config_path() {
            Ok(path) => path,
            Err(_) => return Ok(ClientConfiguration::default()),
        },
    };

    ClientConfiguration::load_from_file(&path).map_err(|e| {
        anyhow::anyhow!("Failed to load configuration from {}: {}", path.display(), e)
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(ms) = cli.ready_timeout_ms {
        config.ready_timeout_ms = Some(ms);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(config.log_level).map_err(|e| anyhow::anyhow!(e))?;

    let ready_timeout = config.ready_timeout();
    let factory = FactoryBuilder::new()
        .build_with_config(&cli.token, config)
        .await
        .context("Failed to build flag client")?;

    if let Some(timeout) = ready_timeout {
        factory
            .await_ready_or_interrupt(timeout, tokio::signal::ctrl_c())
            .await
            .context("Flag client did not become ready")?;
    }

    let client = factory.client();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let exit = interactive::run(stdin.lock(), stdout.lock(), client.as_ref())?;

    tracing::debug!(
        reason = if exit == LoopExit::ExitCommand { "exit" } else { "end of input" },
        "Evaluation loop finished"
    );
    factory.destroy();

    Ok(())
}
