use std::fs;
use std::path::Path;

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::orient::Direction;
use geo::{
    unary_union, Area, BooleanOps, Centroid, Contains, Coord, Geometry, InteriorPoint, Intersects,
    Line, LineString, MultiPolygon, Orient, Polygon, Validation,
};
use geojson::{Feature, GeoJson};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::LoadError;

/// Feature property holding the two-letter code that joins against record acronyms.
pub const ISO_PROPERTY: &str = "ISO2";

/// Map center used when the selected code has no geometry.
pub const FALLBACK_CENTER: GeoPoint = GeoPoint {
    lat: 48.0,
    lon: 16.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone)]
pub struct CountryGeometry {
    pub iso_code: String,
    pub shape: MultiPolygon<f64>,
}

/// Country outlines keyed by ISO code, valid after load.
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    countries: Vec<CountryGeometry>,
}

impl GeometryStore {
    /// Wraps already-valid geometries; repair only happens in [`GeometryStore::load`].
    pub fn from_geometries(countries: Vec<CountryGeometry>) -> Self {
        Self { countries }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let geojson = raw
            .parse::<GeoJson>()
            .map_err(|source| LoadError::GeoJson {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(LoadError::NotACollection {
                path: path.to_path_buf(),
            });
        };

        let mut countries = Vec::with_capacity(collection.features.len());
        let mut repaired = 0_usize;
        for (index, feature) in collection.features.into_iter().enumerate() {
            let country = read_feature(path, index, feature)?;
            let country = if country.shape.is_valid() {
                country
            } else {
                repaired += 1;
                repair(path, country)?
            };
            countries.push(country);
        }

        info!(
            path = %path.display(),
            features = countries.len(),
            repaired,
            "loaded country geometries"
        );
        Ok(Self { countries })
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn get(&self, iso_code: &str) -> Option<&CountryGeometry> {
        self.countries
            .iter()
            .find(|country| country.iso_code == iso_code)
    }

    /// Centroid of the matching outline, or [`FALLBACK_CENTER`].
    pub fn centroid_of(&self, iso_code: &str) -> GeoPoint {
        self.get(iso_code)
            .and_then(|country| country.shape.centroid())
            .map_or(FALLBACK_CENTER, |point| GeoPoint {
                lat: point.y(),
                lon: point.x(),
            })
    }

    /// Every feature in file order. Each call starts a fresh pass.
    pub fn features(&self) -> impl Iterator<Item = (&str, &MultiPolygon<f64>)> {
        self.countries
            .iter()
            .map(|country| (country.iso_code.as_str(), &country.shape))
    }
}

fn read_feature(path: &Path, index: usize, feature: Feature) -> Result<CountryGeometry, LoadError> {
    let invalid = |reason: &str| LoadError::InvalidFeature {
        path: path.to_path_buf(),
        index,
        reason: reason.to_string(),
    };

    let iso_code = feature
        .property(ISO_PROPERTY)
        .and_then(|value| value.as_str())
        .ok_or_else(|| invalid("missing string property ISO2"))?
        .to_string();

    let geometry = feature
        .geometry
        .ok_or_else(|| invalid("missing geometry"))?;
    let geometry = Geometry::<f64>::try_from(geometry.value)
        .map_err(|err| invalid(&format!("unreadable geometry: {err}")))?;

    let shape = match geometry {
        Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
        Geometry::MultiPolygon(multi) => multi,
        other => {
            return Err(LoadError::UnsupportedGeometry {
                path: path.to_path_buf(),
                code: iso_code,
                kind: geometry_kind(&other),
            })
        }
    };

    Ok(CountryGeometry { iso_code, shape })
}

/// Distance under which a crossing is snapped onto an existing vertex.
const SNAP: f64 = 1e-9;

/// Rebuilds an invalid outline. Every ring is cut into simple loops where it
/// crosses or touches itself, the loops are oriented, and overlapping loops
/// are unioned. Holes are subtracted from the part they belong to. The result
/// must be valid and still cover every outer loop.
fn repair(path: &Path, country: CountryGeometry) -> Result<CountryGeometry, LoadError> {
    let mut outer_loops = Vec::new();
    let mut hole_loops = Vec::new();
    let mut parts = Vec::with_capacity(country.shape.0.len());

    for polygon in &country.shape {
        let outer: Vec<Polygon<f64>> = loops_of(polygon.exterior());
        let holes: Vec<Polygon<f64>> = polygon.interiors().iter().flat_map(loops_of).collect();

        let mut part = merge(outer.clone());
        if !holes.is_empty() {
            part = part.difference(&merge(holes.clone()));
        }
        parts.extend(part.orient(Direction::Default));
        outer_loops.extend(outer);
        hole_loops.extend(holes);
    }

    let shape = merge(parts);
    if !shape.is_valid() || !covers_loops(&shape, &outer_loops, &hole_loops) {
        return Err(LoadError::Repair {
            path: path.to_path_buf(),
            code: country.iso_code,
        });
    }

    warn!(
        iso = %country.iso_code,
        parts = shape.0.len(),
        "repaired invalid geometry"
    );
    Ok(CountryGeometry {
        iso_code: country.iso_code,
        shape,
    })
}

/// Keeps disjoint or point-touching polygons as they are and unions the rest.
fn merge(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let candidate = MultiPolygon::new(polygons);
    if candidate.is_valid() {
        candidate
    } else {
        unary_union(&candidate.0)
    }
}

/// Whether every outer loop that is not cut away by a hole still shows up in `shape`.
fn covers_loops(shape: &MultiPolygon<f64>, outer: &[Polygon<f64>], holes: &[Polygon<f64>]) -> bool {
    outer
        .iter()
        .filter_map(InteriorPoint::interior_point)
        .all(|point| holes.iter().any(|hole| hole.contains(&point)) || shape.intersects(&point))
}

/// Splits a closed ring into simple closed loops, oriented counter-clockwise.
/// Degenerate loops without area are dropped.
fn loops_of(ring: &LineString<f64>) -> Vec<Polygon<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &coord in &ring.0 {
        if coords.last() != Some(&coord) {
            coords.push(coord);
        }
    }
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.len() < 3 {
        return Vec::new();
    }

    let noded = node_ring(&coords);
    let mut loops = Vec::new();
    let mut path: Vec<Coord<f64>> = Vec::with_capacity(noded.len());
    for coord in noded.iter().copied().chain(noded.first().copied()) {
        let Some(start) = path.iter().position(|seen| *seen == coord) else {
            path.push(coord);
            continue;
        };

        let mut closed = path.split_off(start);
        closed.push(coord);
        path.push(coord);

        let polygon = Polygon::new(LineString::new(closed), vec![]);
        if polygon.unsigned_area() > 0.0 {
            loops.push(polygon.orient(Direction::Default));
        }
    }
    loops
}

/// The ring's vertices with every self-crossing inserted as an extra vertex
/// on both segments involved.
fn node_ring(coords: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let count = coords.len();
    let segments: Vec<Line<f64>> = (0..count)
        .map(|i| Line::new(coords[i], coords[(i + 1) % count]))
        .collect();

    let mut cuts: Vec<Vec<Coord<f64>>> = vec![Vec::new(); count];
    for i in 0..count {
        for j in (i + 2)..count {
            if i == 0 && j == count - 1 {
                continue;
            }
            let (a, b) = (segments[i], segments[j]);
            let crossings = match line_intersection(a, b) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => vec![intersection],
                Some(LineIntersection::Collinear { intersection }) => {
                    vec![intersection.start, intersection.end]
                }
                None => continue,
            };
            for crossing in crossings {
                let crossing = snap(crossing, &[a.start, a.end, b.start, b.end]);
                add_cut(&mut cuts[i], a, crossing);
                add_cut(&mut cuts[j], b, crossing);
            }
        }
    }

    let mut noded = Vec::with_capacity(count);
    for (start, mut extra) in coords.iter().copied().zip(cuts) {
        let distance = |point: &Coord<f64>| (point.x - start.x).hypot(point.y - start.y);
        extra.sort_by(|p, q| distance(p).total_cmp(&distance(q)));
        extra.dedup();
        noded.push(start);
        noded.extend(extra);
    }
    noded
}

fn snap(point: Coord<f64>, vertices: &[Coord<f64>]) -> Coord<f64> {
    vertices
        .iter()
        .copied()
        .find(|vertex| (vertex.x - point.x).abs() < SNAP && (vertex.y - point.y).abs() < SNAP)
        .unwrap_or(point)
}

fn add_cut(cuts: &mut Vec<Coord<f64>>, segment: Line<f64>, point: Coord<f64>) {
    if point != segment.start && point != segment.end {
        cuts.push(point);
    }
}

const fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
