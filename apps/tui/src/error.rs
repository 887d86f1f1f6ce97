use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup failure while reading one of the two data sources.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed GeoJSON in {path}: {source}")]
    GeoJson {
        path: PathBuf,
        #[source]
        source: Box<geojson::Error>,
    },

    #[error("{path} is not a collection")]
    NotACollection { path: PathBuf },

    #[error("record #{index} in {path} is invalid: {source}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature #{index} in {path} is invalid: {reason}")]
    InvalidFeature {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("feature {code} in {path} has unsupported geometry type {kind}")]
    UnsupportedGeometry {
        path: PathBuf,
        code: String,
        kind: &'static str,
    },

    #[error("geometry for {code} in {path} could not be repaired")]
    Repair { path: PathBuf, code: String },

    #[error("record table {path} rejected: {source}")]
    Records {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}

/// Structural problems with an otherwise well-formed list of records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("no records")]
    Empty,

    #[error("acronym {0} appears more than once")]
    DuplicateAcronym(String),
}

/// A selector value that does not belong to any record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no record with country {0:?}")]
    Country(String),

    #[error("no record with acronym {0:?}")]
    Acronym(String),

    #[error("no record with company {0:?}")]
    Company(String),
}
