use std::fs;
use std::path::{Path, PathBuf};

use geo::Area;
use tempfile::{tempdir, TempDir};
use tsoview::{GeometryStore, LoadError, RecordTable, TableError};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const RECORDS: &str = r#"[
    {"Country": "Germany", "Acronym": "DE", "Company": "Amprion", "neighbors": ["FR", "PL"]},
    {"Country": "France", "Acronym": "FR", "Company": "RTE", "neighbors": ["DE", "ES"]},
    {"Country": "Malta", "Acronym": "MT", "Company": "Enemalta", "neighbors": null},
    {"Country": "Cyprus", "Acronym": "CY", "Company": "TSO Cyprus"}
]"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf, std::io::Error> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

fn feature(code: &str, geometry: &str) -> String {
    format!(
        r#"{{"type": "Feature", "properties": {{"ISO2": "{code}", "NAME": "{code}"}}, "geometry": {geometry}}}"#
    )
}

fn collection(features: &[String]) -> String {
    format!(
        r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
        features.join(",")
    )
}

const SQUARE: &str = r#"{"type": "Polygon", "coordinates": [[[6.0, 47.0], [14.0, 47.0], [14.0, 55.0], [6.0, 55.0], [6.0, 47.0]]]}"#;

fn load_records(contents: &str) -> Result<RecordTable, Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write(&dir, "records.json", contents)?;
    Ok(RecordTable::load(path)?)
}

fn records_error(contents: &str) -> Result<LoadError, Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write(&dir, "records.json", contents)?;
    RecordTable::load(path)
        .err()
        .ok_or_else(|| "expected the record file to be rejected".into())
}

fn geometry_error(contents: &str) -> Result<LoadError, Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = write(&dir, "europe.geojson", contents)?;
    GeometryStore::load(path)
        .err()
        .ok_or_else(|| "expected the geometry file to be rejected".into())
}

#[test]
fn records_load_with_missing_or_null_neighbors() -> TestResult {
    let table = load_records(RECORDS)?;
    assert_eq!(table.len(), 4);
    assert_eq!(
        table.unique_countries(),
        ["Germany", "France", "Malta", "Cyprus"]
    );
    assert!(table.find_by_acronym("MT").is_some_and(|r| r.neighbors.is_empty()));
    assert!(table.find_by_acronym("CY").is_some_and(|r| r.neighbors.is_empty()));
    Ok(())
}

#[test]
fn missing_record_file_is_io_error() -> TestResult {
    let dir = tempdir()?;
    let result = RecordTable::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(LoadError::Io { .. })));
    Ok(())
}

#[test]
fn malformed_records_are_rejected() -> TestResult {
    assert!(matches!(records_error("[{")?, LoadError::Json { .. }));
    assert!(matches!(
        records_error(r#"{"Country": "Germany"}"#)?,
        LoadError::NotACollection { .. }
    ));
    assert!(matches!(
        records_error(r#"[{"Country": "Germany", "Acronym": "DE"}]"#)?,
        LoadError::InvalidRecord { index: 0, .. }
    ));
    Ok(())
}

#[test]
fn structural_record_problems_are_rejected() -> TestResult {
    assert!(matches!(
        records_error("[]")?,
        LoadError::Records {
            source: TableError::Empty,
            ..
        }
    ));

    let duplicate = r#"[
        {"Country": "Germany", "Acronym": "DE", "Company": "Amprion", "neighbors": []},
        {"Country": "Germany", "Acronym": "DE", "Company": "TenneT", "neighbors": []}
    ]"#;
    let LoadError::Records { source, .. } = records_error(duplicate)? else {
        return Err("expected a table error".into());
    };
    assert_eq!(source, TableError::DuplicateAcronym("DE".to_string()));
    Ok(())
}

#[test]
fn geometries_load_and_report_centroids() -> TestResult {
    let dir = tempdir()?;
    let multi = r#"{"type": "MultiPolygon", "coordinates": [[[[20.0, 40.0], [22.0, 40.0], [22.0, 42.0], [20.0, 42.0], [20.0, 40.0]]]]}"#;
    let path = write(
        &dir,
        "europe.geojson",
        &collection(&[feature("DE", SQUARE), feature("GR", multi)]),
    )?;

    let store = GeometryStore::load(&path)?;
    assert_eq!(store.len(), 2);

    let germany = store.centroid_of("DE");
    assert!((germany.lat - 51.0).abs() < 1e-9);
    assert!((germany.lon - 10.0).abs() < 1e-9);

    let missing = store.centroid_of("XX");
    assert!((missing.lat - 48.0).abs() < f64::EPSILON);
    assert!((missing.lon - 16.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn overlapping_parts_are_repaired_on_load() -> TestResult {
    let dir = tempdir()?;
    let overlapping = r#"{"type": "MultiPolygon", "coordinates": [
        [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]],
        [[[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]]]
    ]}"#;
    let path = write(
        &dir,
        "europe.geojson",
        &collection(&[feature("AT", overlapping)]),
    )?;

    let store = GeometryStore::load(path)?;
    let repaired = store.get("AT").ok_or("AT missing after repair")?;
    assert_eq!(repaired.shape.0.len(), 1);
    Ok(())
}

#[test]
fn self_crossing_outline_keeps_its_area() -> TestResult {
    let dir = tempdir()?;
    let bowtie = r#"{"type": "Polygon", "coordinates": [[[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0], [0.0, 0.0]]]}"#;
    let path = write(&dir, "europe.geojson", &collection(&[feature("BT", bowtie)]))?;

    let store = GeometryStore::load(path)?;
    let repaired = store.get("BT").ok_or("BT missing after repair")?;
    assert_eq!(repaired.shape.0.len(), 2);
    assert!((repaired.shape.unsigned_area() - 2.0).abs() < 1e-9);

    let center = store.centroid_of("BT");
    assert!((center.lat - 1.0).abs() < 1e-9);
    assert!((center.lon - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn unusable_geometry_files_are_rejected() -> TestResult {
    assert!(matches!(geometry_error("not json")?, LoadError::GeoJson { .. }));
    assert!(matches!(
        geometry_error(&feature("DE", SQUARE))?,
        LoadError::NotACollection { .. }
    ));

    let point = r#"{"type": "Point", "coordinates": [10.0, 50.0]}"#;
    assert!(matches!(
        geometry_error(&collection(&[feature("DE", point)]))?,
        LoadError::UnsupportedGeometry { kind: "Point", .. }
    ));

    let unnamed = format!(
        r#"{{"type": "FeatureCollection", "features": [{{"type": "Feature", "properties": {{}}, "geometry": {SQUARE}}}]}}"#
    );
    assert!(matches!(
        geometry_error(&unnamed)?,
        LoadError::InvalidFeature { index: 0, .. }
    ));
    Ok(())
}

#[test]
fn load_errors_name_the_file() -> TestResult {
    let missing = Path::new("definitely/not/here.geojson");
    let message = GeometryStore::load(missing)
        .err()
        .ok_or("expected an error")?
        .to_string();
    assert!(message.contains("here.geojson"));
    Ok(())
}
