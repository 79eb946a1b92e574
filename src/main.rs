use clap::Parser;
use std::path::Path;
use ticker_metrics::cli::{Cli, Commands, DEFAULT_CONFIG_PATH};
use ticker_metrics::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config)?
    } else {
        if cli.config != DEFAULT_CONFIG_PATH {
            eprintln!("Warning: config file {} not found", cli.config);
            eprintln!("Using default configuration");
        }
        toml::from_str(include_str!("../config.toml.example"))?
    };

    // Initialize telemetry
    ticker_metrics::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Analyze(args) => {
            tracing::info!(ticker = %args.ticker, "Starting analysis");
            args.execute(&config).await?;
        }
        Commands::Interactive(args) => {
            args.execute(&config).await?;
        }
        Commands::Graham(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
