use clap::Parser;
use color_eyre::Result;
use tracing::{error, info};

use tsoview::app::App;
use tsoview::cli::CliArgs;
use tsoview::config::init_app_config;
use tsoview::{event, logging, terminal};

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    logging::init(&config)?;
    info!(
        geojson = %config.geojson_path.display(),
        records = %config.records_path.display(),
        "starting tsoview"
    );

    // Both data sources are required, a load failure ends the process
    let mut app = App::load(&config)?;

    let headless = args.headless || !terminal::is_terminal();
    if let Err(e) = app.apply_initial_choices(&args.initial_choices()) {
        if headless {
            return Err(e.into());
        }
        error!(error = %e, "keeping default selection");
    }

    if headless {
        return event::run_headless(&app, args.json);
    }

    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app);

    terminal::cleanup_terminal_state(true, true);

    result
}
