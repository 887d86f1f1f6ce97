use clap::{CommandFactory, Parser};

use crate::config::{DEBUG_VAR, GEOJSON_VAR, LOG_FILE_VAR, RECORDS_VAR};
use crate::domain::SelectorField;

#[derive(Debug, Parser)]
#[command(name = "tsoview", version, about = "Interactive TSO map of Europe")]
pub struct CliArgs {
    /// Print the selection report and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the country geometry file
    #[arg(long, value_name = "PATH")]
    pub geojson: Option<String>,

    /// Override the TSO record file
    #[arg(long, value_name = "PATH")]
    pub records: Option<String>,

    /// Write logs to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,

    /// Start on the record with this country name
    #[arg(long, value_name = "NAME")]
    pub country: Option<String>,

    /// Start on the record with this acronym
    #[arg(long, value_name = "CODE")]
    pub acronym: Option<String>,

    /// Start on the record with this TSO name
    #[arg(long, value_name = "NAME")]
    pub company: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.geojson {
            std::env::set_var(GEOJSON_VAR, path);
        }
        if let Some(path) = &self.records {
            std::env::set_var(RECORDS_VAR, path);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_FILE_VAR, path);
        }
        if self.debug {
            std::env::set_var(DEBUG_VAR, "1");
        }
    }

    /// Selector values requested on the command line, in precedence order.
    pub fn initial_choices(&self) -> Vec<(SelectorField, &str)> {
        [
            (SelectorField::Country, self.country.as_deref()),
            (SelectorField::Acronym, self.acronym.as_deref()),
            (SelectorField::Company, self.company.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
