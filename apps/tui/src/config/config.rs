use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const GEOJSON_VAR: &str = "TSOVIEW_GEOJSON";
pub const RECORDS_VAR: &str = "TSOVIEW_RECORDS";
pub const LOG_FILE_VAR: &str = "TSOVIEW_LOG_FILE";
pub const DEBUG_VAR: &str = "DEBUG";

const DEFAULT_GEOJSON: &str = "europe.geojson";
const DEFAULT_RECORDS: &str = "tso_data_cleaned.json";

/// Resolved locations of the two data sources plus logging switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub geojson_path: PathBuf,
    pub records_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl AppConfig {
    /// Builds the configuration from `lookup`, resolving relative paths
    /// against `base_dir`.
    pub fn from_lookup(base_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path_var = |name: &str, default: &str| {
            let value = lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string());
            base_dir.join(value.trim())
        };

        let debug = lookup(DEBUG_VAR)
            .is_some_and(|value| matches!(value.trim(), "1" | "true" | "yes"));

        Self {
            geojson_path: path_var(GEOJSON_VAR, DEFAULT_GEOJSON),
            records_path: path_var(RECORDS_VAR, DEFAULT_RECORDS),
            log_file: lookup(LOG_FILE_VAR)
                .filter(|value| !value.trim().is_empty())
                .map(|value| base_dir.join(value.trim())),
            debug,
        }
    }
}

/// Initializes the application configuration from `.env`, the process
/// environment and the current directory.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir: PathBuf = env::current_dir()
        .map_err(|e| eyre!("Cannot determine current directory: {e}"))?;

    Ok(AppConfig::from_lookup(&base_dir, |name| env::var(name).ok()))
}
