mod setup;

pub use setup::{cleanup_terminal_state, is_terminal, setup_terminal};
