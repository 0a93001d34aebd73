use anyhow::{Context, Result, bail};
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Main settings for the report builder.
///
/// Every field has a default, so the tool runs with no configuration at all.
/// Values can come from a TOML file (`-c` option) and from environment
/// variables with the `LOG_REPORT` prefix (e.g. `LOG_REPORT__LOG_DIR`);
/// the environment wins over the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level for application logging (e.g., "info", "debug", "warn", "error")
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional log destination file; logs go to stderr when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Directory scanned for rotated nginx access logs
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Directory the rendered HTML reports are written to
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    /// Number of top URLs (by total duration) kept in the report
    #[serde(default = "default_report_size")]
    pub report_size: usize,
    /// HTML template with a `$table_json` placeholder
    #[serde(default = "default_report_template")]
    pub report_template: PathBuf,
    /// Overwrite an existing report for the same log date
    #[serde(default)]
    pub rewrite_report: bool,
    /// Maximum tolerated share of unparsable lines, in percent
    #[serde(default = "default_error_limit_percentage")]
    pub error_limit_percentage: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./log")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./reports")
}

fn default_report_size() -> usize {
    1000
}

fn default_report_template() -> PathBuf {
    PathBuf::from("./reports/report.html")
}

fn default_error_limit_percentage() -> f64 {
    25.0
}

impl Settings {
    /// Load configuration from a specific config file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(Some(path.as_ref()))
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        // NOTE: It's ok if this fails (file might not exist)
        let _ = dotenvy::dotenv();

        Self::load(None)
    }

    fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(&path.to_string_lossy()));
        }

        // Env vars take priority over the file
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("LOG_REPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        validate_config(&settings)?;

        Ok(settings)
    }
}

/// Validate the configuration values
fn validate_config(settings: &Settings) -> Result<()> {
    if !(0.0..=100.0).contains(&settings.error_limit_percentage) {
        bail!(
            "error_limit_percentage must be between 0 and 100, got {}",
            settings.error_limit_percentage
        );
    }

    if settings.report_size == 0 {
        bail!("report_size must be greater than 0");
    }

    if settings.log_dir.as_os_str().is_empty() {
        bail!("log_dir cannot be empty");
    }

    if settings.report_dir.as_os_str().is_empty() {
        bail!("report_dir cannot be empty");
    }

    Ok(())
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings {{\n\
             \tLog Level: {}\n\
             \tLog Dir: {}\n\
             \tReport Dir: {}\n\
             \tReport Size: {}\n\
             \tReport Template: {}\n\
             \tRewrite Report: {}\n\
             \tError Limit: {}%\n\
             }}",
            self.log_level,
            self.log_dir.display(),
            self.report_dir.display(),
            self.report_size,
            self.report_template.display(),
            self.rewrite_report,
            self.error_limit_percentage,
        )
    }
}
