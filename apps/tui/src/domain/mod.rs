// Domain module for tsoview
// Record lookup, country outlines, selection sync and neighbor resolution

pub mod geometry;
pub mod neighbors;
pub mod records;
pub mod selection;
pub mod view;

pub use geometry::{CountryGeometry, GeoPoint, GeometryStore, FALLBACK_CENTER};
pub use neighbors::{enrich, neighbors_of, NeighborInfo};
pub use records::{CountryRecord, RecordTable};
pub use selection::{synchronize, SelectorChoices, SelectorField, Selection};
pub use view::{Highlight, SelectionReport, Viewport};
