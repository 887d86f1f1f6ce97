use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Level used when `RUST_LOG` is not set.
pub const fn default_directive(debug: bool) -> &'static str {
    if debug {
        "tsoview=debug,info"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Logs go to the configured file, or to
/// stderr when none is set.
pub fn init(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.debug)));

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eyre!("Failed to open log file {}: {e}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| eyre!("Failed to initialize logging: {e}"))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| eyre!("Failed to initialize logging: {e}"))
    }
}
