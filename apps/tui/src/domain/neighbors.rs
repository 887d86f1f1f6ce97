use serde::Serialize;
use tracing::debug;

use crate::domain::records::RecordTable;

/// A bordering country resolved against the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborInfo {
    pub acronym: String,
    pub country: String,
    pub company: String,
}

impl NeighborInfo {
    /// `"{acronym} - {country} ({company})"`
    pub fn describe(&self) -> String {
        format!("{} - {} ({})", self.acronym, self.country, self.company)
    }
}

/// Raw neighbor acronyms for `acronym`; empty when the acronym is unknown.
pub fn neighbors_of<'t>(acronym: &str, table: &'t RecordTable) -> &'t [String] {
    table
        .find_by_acronym(acronym)
        .map(|record| record.neighbors.as_slice())
        .unwrap_or_default()
}

/// Looks up each acronym in input order. References missing from the table
/// are dropped.
pub fn enrich(neighbors: &[String], table: &RecordTable) -> Vec<NeighborInfo> {
    neighbors
        .iter()
        .filter_map(|acronym| {
            let Some(record) = table.find_by_acronym(acronym) else {
                debug!(acronym = %acronym, "skipping neighbor without a record");
                return None;
            };
            Some(NeighborInfo {
                acronym: record.acronym.clone(),
                country: record.country.clone(),
                company: record.company.clone(),
            })
        })
        .collect()
}

/// [`neighbors_of`] followed by [`enrich`].
pub fn resolve(acronym: &str, table: &RecordTable) -> Vec<NeighborInfo> {
    enrich(neighbors_of(acronym, table), table)
}
