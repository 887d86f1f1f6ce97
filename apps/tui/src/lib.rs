// Export our modules for use in binaries and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use domain::{
    CountryRecord, GeoPoint, GeometryStore, NeighborInfo, RecordTable, SelectorChoices,
    SelectorField, Selection, SelectionReport,
};
pub use error::{LoadError, LookupError, TableError};
