#[allow(clippy::module_inception)]
mod config;

pub use config::{
    init_app_config, AppConfig, DEBUG_VAR, GEOJSON_VAR, LOG_FILE_VAR, RECORDS_VAR,
};
