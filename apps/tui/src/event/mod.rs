mod loop_handler;

pub use loop_handler::{print_report, run, run_headless};
