use anyhow::Result;
use clap::Parser;
use log_report::{run, settings::Settings};
use std::{fs::OpenOptions, path::PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "log-report",
    about = "Builds a ranked per-URL latency report from nginx access logs",
    version,
    after_help = r#"Configuration:
    Configuration can be provided via:
    1. Environment variables with LOG_REPORT__ prefix (e.g., LOG_REPORT__LOG_DIR)
    2. .env file in the current directory
    3. Config file with -c option (TOML format)

Examples:
    # Analyze ./log and write the report under ./reports
    log-report

    # Use a custom configuration file
    log-report -c config.toml"#
)]
pub struct Cli {
    /// Path to the configuration file (TOML format)
    ///
    /// If not provided, will attempt to load from environment variables
    #[clap(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let settings = if let Some(config_path) = &self.config {
            Settings::from_path(config_path)?
        } else {
            Settings::from_env()?
        };
        let _guard = init_logging(&settings)?;

        run::run(&settings)?;

        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}

/// Set up tracing with an env-filter; the guard keeps the file writer alive
/// until the process exits.
fn init_logging(settings: &Settings) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    match &settings.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .init();
            Ok(None)
        }
    }
}
