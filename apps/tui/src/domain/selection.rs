use serde::Serialize;
use tracing::warn;

use crate::domain::records::{CountryRecord, RecordTable};
use crate::error::LookupError;

/// The three selector keys. Declaration order is the tie-break order used
/// when more than one selector differs from the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorField {
    Country,
    Acronym,
    Company,
}

impl SelectorField {
    pub const ALL: [Self; 3] = [Self::Country, Self::Acronym, Self::Company];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Country => "Select Country:",
            Self::Acronym => "Select Acronym:",
            Self::Company => "Select TSO Name:",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Country => 0,
            Self::Acronym => 1,
            Self::Company => 2,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Country => Self::Acronym,
            Self::Acronym => Self::Company,
            Self::Company => Self::Country,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Country => Self::Company,
            Self::Acronym => Self::Country,
            Self::Company => Self::Acronym,
        }
    }
}

/// The country/acronym/company triple of exactly one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub country: String,
    pub acronym: String,
    pub company: String,
}

impl Selection {
    pub fn from_record(record: &CountryRecord) -> Self {
        Self {
            country: record.country.clone(),
            acronym: record.acronym.clone(),
            company: record.company.clone(),
        }
    }

    pub fn field(&self, field: SelectorField) -> &str {
        match field {
            SelectorField::Country => &self.country,
            SelectorField::Acronym => &self.acronym,
            SelectorField::Company => &self.company,
        }
    }

    /// Candidate values that keep everything as-is except `field`.
    pub fn choices_with<'a>(&'a self, field: SelectorField, value: &'a str) -> SelectorChoices<'a> {
        let mut choices = SelectorChoices::from(self);
        choices.set(field, value);
        choices
    }

    /// Replaces the triple with the record the choices resolve to. On error
    /// the current selection is left untouched.
    pub fn apply(
        &mut self,
        choices: &SelectorChoices<'_>,
        table: &RecordTable,
    ) -> Result<(), LookupError> {
        *self = synchronize(choices, self, table)?;
        Ok(())
    }
}

/// The values currently shown by the three selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorChoices<'a> {
    pub country: &'a str,
    pub acronym: &'a str,
    pub company: &'a str,
}

impl<'a> SelectorChoices<'a> {
    pub fn set(&mut self, field: SelectorField, value: &'a str) {
        match field {
            SelectorField::Country => self.country = value,
            SelectorField::Acronym => self.acronym = value,
            SelectorField::Company => self.company = value,
        }
    }
}

impl<'a> From<&'a Selection> for SelectorChoices<'a> {
    fn from(selection: &'a Selection) -> Self {
        Self {
            country: &selection.country,
            acronym: &selection.acronym,
            company: &selection.company,
        }
    }
}

/// Which selector drives resolution: the first one, in country, acronym,
/// company order, that differs from `current`. Falls through to company.
pub fn driving_field(choices: &SelectorChoices<'_>, current: &Selection) -> SelectorField {
    if choices.country != current.country {
        SelectorField::Country
    } else if choices.acronym != current.acronym {
        SelectorField::Acronym
    } else {
        SelectorField::Company
    }
}

/// Resolves the selector values to a single record and returns its triple.
pub fn synchronize(
    choices: &SelectorChoices<'_>,
    current: &Selection,
    table: &RecordTable,
) -> Result<Selection, LookupError> {
    let field = driving_field(choices, current);
    let resolved = match field {
        SelectorField::Country => table
            .find_by_country(choices.country)
            .ok_or_else(|| LookupError::Country(choices.country.to_string())),
        SelectorField::Acronym => table
            .find_by_acronym(choices.acronym)
            .ok_or_else(|| LookupError::Acronym(choices.acronym.to_string())),
        SelectorField::Company => table
            .find_by_company(choices.company)
            .ok_or_else(|| LookupError::Company(choices.company.to_string())),
    };

    match resolved {
        Ok(record) => Ok(Selection::from_record(record)),
        Err(err) => {
            warn!(?field, error = %err, "selection did not resolve, keeping previous");
            Err(err)
        }
    }
}
