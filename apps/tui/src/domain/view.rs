use std::collections::HashSet;

use ratatui::style::Color;
use serde::Serialize;

use crate::domain::geometry::{GeoPoint, GeometryStore};
use crate::domain::neighbors::{self, NeighborInfo};
use crate::domain::records::RecordTable;
use crate::domain::selection::Selection;

pub const NO_NEIGHBORS: &str = "No neighboring countries found.";

pub const DEFAULT_ZOOM: u8 = 6;
pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 10;

/// How a feature is painted relative to the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Selected,
    Neighbor,
    Other,
}

impl Highlight {
    /// Selected is checked before neighbors. A record whose neighbor list
    /// contains its own acronym is still painted as the selection, never in
    /// the neighbor color.
    pub fn classify(iso_code: &str, selected: &str, neighbors: &HashSet<&str>) -> Self {
        if iso_code == selected {
            Self::Selected
        } else if neighbors.contains(iso_code) {
            Self::Neighbor
        } else {
            Self::Other
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Selected => Color::Blue,
            Self::Neighbor => Color::Red,
            Self::Other => Color::Gray,
        }
    }

    pub const fn opacity(self) -> f64 {
        match self {
            Self::Selected | Self::Neighbor => 0.7,
            Self::Other => 0.4,
        }
    }

    /// Opaque features get their interior painted, the rest only an outline.
    pub fn is_filled(self) -> bool {
        self.opacity() >= 0.5
    }
}

/// Visible window of the map, centered on a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Viewport {
    pub const fn new(center: GeoPoint, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Degrees of longitude across the whole view.
    pub fn lon_span(&self) -> f64 {
        1440.0 / 2_f64.powi(i32::from(self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)))
    }

    /// `(x_bounds, y_bounds)` for a canvas `width` x `height` cells large.
    /// Cells are about twice as tall as wide, and a degree of longitude
    /// shrinks with latitude.
    pub fn bounds(&self, width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
        let lon_span = self.lon_span();
        let aspect = if width == 0 {
            1.0
        } else {
            f64::from(height) * 2.0 / f64::from(width)
        };
        let lat_span = lon_span * aspect * self.center.lat.to_radians().cos().abs().max(0.1);

        (
            [
                self.center.lon - lon_span / 2.0,
                self.center.lon + lon_span / 2.0,
            ],
            [
                self.center.lat - lat_span / 2.0,
                self.center.lat + lat_span / 2.0,
            ],
        )
    }
}

pub const fn zoom_in(zoom: u8) -> u8 {
    if zoom >= MAX_ZOOM {
        MAX_ZOOM
    } else {
        zoom + 1
    }
}

pub const fn zoom_out(zoom: u8) -> u8 {
    if zoom <= MIN_ZOOM {
        MIN_ZOOM
    } else {
        zoom - 1
    }
}

/// Everything the text panel and headless output show for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    #[serde(flatten)]
    pub selection: Selection,
    pub center: GeoPoint,
    pub neighbors: Vec<NeighborInfo>,
    pub panel: Vec<String>,
}

impl SelectionReport {
    pub fn build(selection: &Selection, table: &RecordTable, geometry: &GeometryStore) -> Self {
        let neighbors = neighbors::resolve(&selection.acronym, table);
        let panel = panel_lines(selection, &neighbors);
        Self {
            selection: selection.clone(),
            center: geometry.centroid_of(&selection.acronym),
            neighbors,
            panel,
        }
    }

    /// Acronyms painted with the neighbor color.
    pub fn neighbor_codes(&self) -> HashSet<&str> {
        self.neighbors
            .iter()
            .map(|info| info.acronym.as_str())
            .collect()
    }
}

pub fn panel_lines(selection: &Selection, neighbors: &[NeighborInfo]) -> Vec<String> {
    let mut lines = vec![
        format!("Country: {}", selection.country),
        format!("Acronym: {}", selection.acronym),
        format!("TSO Name: {}", selection.company),
        "Neighboring Countries and TSOs:".to_string(),
    ];

    if neighbors.is_empty() {
        lines.push(NO_NEIGHBORS.to_string());
    } else {
        lines.extend(neighbors.iter().map(|info| format!("- {}", info.describe())));
    }

    lines
}
