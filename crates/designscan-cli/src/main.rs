//! designscan CLI - Extract design findings from design-file JSON with an LLM.

use clap::Parser;
use designscan_cli::commands;
use designscan_cli::config::OutputFormat;
use designscan_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

async fn run(cli: Cli) -> designscan_cli::Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    match cli.command {
        Command::Analyze(args) => {
            let config = Config::load_from(&config_path)?;
            let color_enabled = !cli.no_color && config.settings.color;
            commands::execute_analyze(args, &config, color_enabled).await?;
        }
        Command::Categories => {
            let config = Config::load_from(&config_path)?;
            commands::execute_categories(&config);
        }
        Command::Config(args) => {
            // A broken file must not block `config init --force`
            let formatter = Formatter::new(OutputFormat::Csv, !cli.no_color);
            commands::execute_config(args, &config_path, &formatter)?;
        }
    }

    Ok(())
}
