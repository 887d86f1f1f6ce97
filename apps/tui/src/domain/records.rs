use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{LoadError, TableError};

/// One TSO row: the country, its join key, the operating company and the
/// precomputed list of bordering acronyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Acronym")]
    pub acronym: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub neighbors: Vec<String>,
}

impl CountryRecord {
    pub fn new(country: &str, acronym: &str, company: &str, neighbors: &[&str]) -> Self {
        Self {
            country: country.to_string(),
            acronym: acronym.to_string(),
            company: company.to_string(),
            neighbors: neighbors.iter().map(ToString::to_string).collect(),
        }
    }
}

// `"neighbors": null` shows up in exported data and means the same as a missing list.
fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Immutable lookup table over the TSO records, in file order.
#[derive(Debug, Clone)]
pub struct RecordTable {
    records: Vec<CountryRecord>,
    by_acronym: HashMap<String, usize>,
}

impl RecordTable {
    /// Builds a table, rejecting empty input and repeated acronyms.
    pub fn from_records(records: Vec<CountryRecord>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }

        let mut by_acronym = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if by_acronym.insert(record.acronym.clone(), index).is_some() {
                return Err(TableError::DuplicateAcronym(record.acronym.clone()));
            }
        }

        Ok(Self {
            records,
            by_acronym,
        })
    }

    /// Reads a JSON array of record objects from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let Value::Array(items) = value else {
            return Err(LoadError::NotACollection {
                path: path.to_path_buf(),
            });
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<CountryRecord>(item).map_err(|source| {
                    LoadError::InvalidRecord {
                        path: path.to_path_buf(),
                        index,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let table = Self::from_records(records).map_err(|source| LoadError::Records {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            records = table.len(),
            "loaded TSO records"
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryRecord> {
        self.records.iter()
    }

    /// The record the selection starts on.
    pub fn first(&self) -> Option<&CountryRecord> {
        self.records.first()
    }

    pub fn find_by_country(&self, name: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|record| record.country == name)
    }

    pub fn find_by_acronym(&self, code: &str) -> Option<&CountryRecord> {
        let found = self
            .by_acronym
            .get(code)
            .and_then(|&index| self.records.get(index));
        if found.is_none() {
            debug!(acronym = code, "acronym not present in record table");
        }
        found
    }

    pub fn find_by_company(&self, name: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|record| record.company == name)
    }

    pub fn unique_countries(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|record| record.country.as_str()))
    }

    pub fn unique_acronyms(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|record| record.acronym.as_str()))
    }

    pub fn unique_companies(&self) -> Vec<String> {
        unique_in_order(self.records.iter().map(|record| record.company.as_str()))
    }
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
