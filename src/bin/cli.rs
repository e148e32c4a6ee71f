//! Crew scraper CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crew_scraper::{
    error::Result,
    models::Config,
    pipeline::{self, Capability, CycleOrchestrator},
    services::SystemClock,
    storage::{JobStore, LocalJobStore, MemoryJobStore},
};
use tokio::sync::watch;

/// Yacht crew job scraper
#[derive(Parser, Debug)]
#[command(
    name = "crew-scraper",
    version,
    about = "Collects yacht crew job postings from social groups and channels"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a cycle now and then on the configured interval until Ctrl-C
    Run,

    /// Run a single cycle and print its report
    Once {
        /// Keep jobs in memory and print them instead of storing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Classify a text file and print the extracted job
    Classify {
        /// File holding the post text
        file: PathBuf,
    },

    /// Show job store info
    Info,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Resolve `--config`, falling back to defaults when it cannot be read.
fn load_config(cli: &Cli) -> Config {
    match Config::load(&cli.config) {
        Ok(config) => {
            init_logging(cli.verbose, &config.logging.level);
            log::info!("Loaded configuration from {}", cli.config.display());
            config
        }
        Err(e) => {
            let config = Config::default();
            init_logging(cli.verbose, &config.logging.level);
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                cli.config.display(),
                e
            );
            config
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Arc::new(load_config(&cli));

    match &cli.command {
        Command::Run => {
            config.validate()?;

            let (tx, rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::info!("Ctrl-C received; stopping after the current poll");
                    let _ = tx.send(true);
                }
            });

            let orchestrator = CycleOrchestrator::new(
                Arc::clone(&config),
                Capability::from_env(&config.api)?,
                Arc::new(LocalJobStore::new(&config.sink.store_path)),
                Arc::new(SystemClock),
                rx.clone(),
            );

            pipeline::run_scheduled(
                &orchestrator,
                config.schedule.interval(),
                config.schedule.run_on_start,
                rx,
            )
            .await;
        }

        Command::Once { dry_run } => {
            config.validate()?;

            let memory = Arc::new(MemoryJobStore::new());
            let store: Arc<dyn JobStore> = if *dry_run {
                memory.clone()
            } else {
                Arc::new(LocalJobStore::new(&config.sink.store_path))
            };

            let (_tx, rx) = watch::channel(false);
            let orchestrator = CycleOrchestrator::new(
                Arc::clone(&config),
                Capability::from_env(&config.api)?,
                store,
                Arc::new(SystemClock),
                rx,
            );

            let report = orchestrator.run_cycle().await;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if *dry_run {
                println!("{}", serde_json::to_string_pretty(&memory.records())?);
            }
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }

        Command::Classify { file } => {
            let text = std::fs::read_to_string(file)?;
            match pipeline::run_classify(&text) {
                Some(job) => println!("{}", serde_json::to_string_pretty(&job)?),
                None => log::info!("{} is not a job posting", file.display()),
            }
        }

        Command::Info => {
            let store = LocalJobStore::new(&config.sink.store_path);
            log::info!("Job store: {}", store.path().display());

            let records = store.load_all().await?;
            log::info!("Stored jobs: {}", records.len());
            if let Some(latest) = records.iter().max_by_key(|r| r.created_at) {
                log::info!("Last saved: {} ({})", latest.created_at, latest.title);
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
