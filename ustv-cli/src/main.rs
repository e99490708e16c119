mod cli;
mod codecs;
mod commands;
mod config;
mod error;
mod output;
mod player;
mod prompt;

use crate::{
    cli::{Args, Commands},
    commands::CommandExecutor,
    config::AppConfig,
    error::Result,
    output::OutputManager,
};
use clap::Parser;
use std::process;
use tracing::{error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        let out = OutputManager::new(true);
        out.error(&e.to_string());
        if let Some(exchange) = e.exchange() {
            out.exchange(exchange);
        }
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    match &args.command {
        Some(Commands::Completions { shell }) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Config { show, reset }) => {
            if *reset {
                AppConfig::reset(args.config.as_deref())?;
                println!("✓ Configuration reset to defaults");
            } else if *show {
                let config = AppConfig::load(args.config.as_deref())?;
                println!("{}", config.show()?);
            } else {
                println!(
                    "Use --show to display current configuration or --reset to reset to defaults"
                );
            }
            return Ok(());
        }
        _ => {}
    }

    let config = AppConfig::load(args.config.as_deref())?;
    info!("Loaded configuration: base url {}", config.base_url);

    let executor = CommandExecutor::new(config, &args)?;
    match &args.command {
        Some(Commands::Channels { json }) => executor.channels(&args.watch, *json).await,
        _ => executor.watch(&args.watch).await,
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("warn,ustv=debug,ustvnow=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_level(verbose))
        .with(filter)
        .init();
}
