#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hackathon_finder_lib::config::AppConfig;
use hackathon_finder_lib::logging;

#[derive(Parser, Debug)]
#[command(name = "hackathon-finder")]
#[command(about = "Collect hackathon listings and regenerate the listing pages", long_about = None)]
struct Cli {
    /// JSON config file (defaults to ./hackathon-finder.json when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enable verbose logging (or set HACKATHON_FINDER_LOG)
    #[arg(long)]
    verbose: bool,
    /// Query the live source APIs instead of the bundled listings
    #[arg(long)]
    live: bool,
    /// Where to write the JSON snapshot
    #[arg(long)]
    data_file: Option<PathBuf>,
    /// Where to write the listing document
    #[arg(long)]
    readme: Option<PathBuf>,
    /// Where to write the archive document
    #[arg(long)]
    archive: Option<PathBuf>,
    /// Append the run log to this file (default: ./hackathon-finder.log)
    #[arg(long, conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,
    /// Log to stderr only
    #[arg(long)]
    no_log_file: bool,
}

fn init_tracing(verbose: bool, log_file: Option<&Path>) {
    let env = std::env::var("HACKATHON_FINDER_LOG")
        .unwrap_or_else(|_| logging::default_filter(verbose));
    let file = log_file.and_then(|path| match logging::open_log_file(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("unable to open log file {}: {err}", path.display());
            None
        }
    });
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(env))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file.map(logging::file_layer))
        .try_init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.live {
        config.live = true;
    }
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    if let Some(path) = &cli.readme {
        config.readme_path = path.clone();
    }
    if let Some(path) = &cli.archive {
        config.archive_path = path.clone();
    }
    if cli.no_log_file {
        config.log_file = None;
    } else if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    Ok(config)
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.verbose, None);
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbose, config.log_file.as_deref());

    if let Err(e) = hackathon_finder_lib::run(&config) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
