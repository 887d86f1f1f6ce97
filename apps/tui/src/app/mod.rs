// App module for tsoview
// Handles application state and selector input

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, SelectorState};
