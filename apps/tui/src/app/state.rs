use color_eyre::eyre::eyre;
use color_eyre::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::view::{zoom_in, zoom_out, DEFAULT_ZOOM};
use crate::domain::{
    GeometryStore, RecordTable, SelectionReport, SelectorChoices, SelectorField, Selection, Viewport,
};
use crate::error::LookupError;

/// One dropdown: its full option list, the fuzzy filter typed into it and
/// the highlighted row among the options that pass the filter.
#[derive(Debug, Clone)]
pub struct SelectorState {
    pub field: SelectorField,
    pub options: Vec<String>,
    pub filter: String,
    pub highlighted: usize,
}

impl SelectorState {
    pub const fn new(field: SelectorField, options: Vec<String>) -> Self {
        Self {
            field,
            options,
            filter: String::new(),
            highlighted: 0,
        }
    }

    /// Indices into `options` that match the filter, best match first.
    /// Without a filter every option is visible in its original order.
    pub fn visible(&self) -> Vec<usize> {
        let pattern = self.filter.trim();
        if pattern.is_empty() {
            return (0..self.options.len()).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize)> = self
            .options
            .iter()
            .enumerate()
            .filter_map(|(index, option)| {
                matcher
                    .fuzzy_match(option, pattern)
                    .map(|score| (score, index))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, index)| index).collect()
    }

    pub fn highlighted_value(&self) -> Option<&str> {
        self.visible()
            .get(self.highlighted)
            .and_then(|&index| self.options.get(index))
            .map(String::as_str)
    }

    /// Clears the filter and highlights `value`, the rendered value after a
    /// selection change.
    pub fn sync_to(&mut self, value: &str) {
        self.filter.clear();
        self.highlighted = self
            .options
            .iter()
            .position(|option| option == value)
            .unwrap_or(0);
    }

    pub fn push_filter(&mut self, ch: char) {
        self.filter.push(ch);
        self.highlighted = 0;
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.highlighted = 0;
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub table: RecordTable,
    pub geometry: GeometryStore,
    pub selection: Selection,
    pub selectors: [SelectorState; 3],
    pub focus: SelectorField,
    pub zoom: u8,
    pub status_message: String,
    pub show_help: bool,
}

impl App {
    /// Starts on the first record of `table`.
    pub fn new(table: RecordTable, geometry: GeometryStore) -> Result<Self> {
        let first = table
            .first()
            .ok_or_else(|| eyre!("Record table is empty"))?;
        let selection = Selection::from_record(first);

        let selectors = [
            SelectorState::new(SelectorField::Country, table.unique_countries()),
            SelectorState::new(SelectorField::Acronym, table.unique_acronyms()),
            SelectorState::new(SelectorField::Company, table.unique_companies()),
        ];

        let mut app = Self {
            running: true,
            table,
            geometry,
            selection,
            selectors,
            focus: SelectorField::Country,
            zoom: DEFAULT_ZOOM,
            status_message: String::new(),
            show_help: false,
        };
        app.sync_selectors();
        Ok(app)
    }

    /// Loads both data sources named by `config`.
    pub fn load(config: &AppConfig) -> Result<Self> {
        let table = RecordTable::load(&config.records_path)?;
        let geometry = GeometryStore::load(&config.geojson_path)?;
        Self::new(table, geometry)
    }

    pub fn selector(&self, field: SelectorField) -> &SelectorState {
        &self.selectors[field.index()]
    }

    pub fn selector_mut(&mut self, field: SelectorField) -> &mut SelectorState {
        &mut self.selectors[field.index()]
    }

    pub fn focused(&self) -> &SelectorState {
        self.selector(self.focus)
    }

    pub fn focused_mut(&mut self) -> &mut SelectorState {
        self.selector_mut(self.focus)
    }

    /// Runs `value` for `field` through the synchronization rule. The
    /// selection only changes when the value resolves.
    pub fn choose(&mut self, field: SelectorField, value: &str) -> Result<(), LookupError> {
        let current = self.selection.clone();
        self.resolve(&current.choices_with(field, value))
    }

    fn resolve(&mut self, choices: &SelectorChoices<'_>) -> Result<(), LookupError> {
        let previous = self.selection.clone();
        self.selection.apply(choices, &self.table)?;
        if self.selection != previous {
            info!(
                country = %self.selection.country,
                acronym = %self.selection.acronym,
                company = %self.selection.company,
                "selection changed"
            );
        }
        self.sync_selectors();
        Ok(())
    }

    /// Commits the highlighted option of the focused selector.
    pub fn commit_focused(&mut self) {
        let field = self.focus;
        let Some(value) = self.focused().highlighted_value().map(str::to_string) else {
            self.status_message = "No option matches the filter".to_string();
            return;
        };

        match self.choose(field, &value) {
            Ok(()) => {
                self.status_message = format!(
                    "Selected {} ({})",
                    self.selection.country, self.selection.acronym
                );
            }
            Err(e) => {
                self.status_message = format!("Error: {e}");
            }
        }
    }

    /// Applies command-line starting values as one set of selector values,
    /// so the usual country, acronym, company precedence picks the record.
    /// On error the default selection is kept.
    pub fn apply_initial_choices(
        &mut self,
        choices: &[(SelectorField, &str)],
    ) -> Result<(), LookupError> {
        if choices.is_empty() {
            return Ok(());
        }

        let current = self.selection.clone();
        let mut candidate = SelectorChoices::from(&current);
        for (field, value) in choices {
            candidate.set(*field, value);
        }

        if let Err(e) = self.resolve(&candidate) {
            warn!(error = %e, "ignoring initial selection");
            self.status_message = format!("Error: {e}");
            return Err(e);
        }
        Ok(())
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn zoom_in(&mut self) {
        self.zoom = zoom_in(self.zoom);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = zoom_out(self.zoom);
    }

    pub fn report(&self) -> SelectionReport {
        SelectionReport::build(&self.selection, &self.table, &self.geometry)
    }

    pub fn viewport(&self, report: &SelectionReport) -> Viewport {
        Viewport::new(report.center, self.zoom)
    }

    fn sync_selectors(&mut self) {
        for field in SelectorField::ALL {
            let value = self.selection.field(field).to_string();
            self.selector_mut(field).sync_to(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliArgs;
    use crate::domain::CountryRecord;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn app() -> Result<App, Box<dyn std::error::Error>> {
        let table = RecordTable::from_records(vec![
            CountryRecord::new("Germany", "DE", "Amprion", &["FR", "PL"]),
            CountryRecord::new("France", "FR", "RTE", &["DE"]),
            CountryRecord::new("Poland", "PL", "PSE", &["DE"]),
        ])?;
        Ok(App::new(table, GeometryStore::default())?)
    }

    #[test]
    fn starts_on_first_record() -> TestResult {
        let app = app()?;
        assert_eq!(app.selection.country, "Germany");
        assert_eq!(app.selector(SelectorField::Company).highlighted_value(), Some("Amprion"));
        Ok(())
    }

    #[test]
    fn committing_company_syncs_all_selectors() -> TestResult {
        let mut app = app()?;
        app.focus = SelectorField::Company;
        app.focused_mut().highlighted = 1;
        app.commit_focused();

        assert_eq!(app.selection.acronym, "FR");
        assert_eq!(app.selector(SelectorField::Country).highlighted_value(), Some("France"));
        assert_eq!(app.selector(SelectorField::Acronym).highlighted_value(), Some("FR"));
        assert_eq!(app.status_message, "Selected France (FR)");
        Ok(())
    }

    #[test]
    fn unknown_choice_keeps_selection() -> TestResult {
        let mut app = app()?;
        let result = app.choose(SelectorField::Acronym, "XX");
        assert_eq!(result, Err(LookupError::Acronym("XX".to_string())));
        assert_eq!(app.selection.acronym, "DE");
        Ok(())
    }

    #[test]
    fn fuzzy_filter_narrows_options() -> TestResult {
        let mut app = app()?;
        for ch in "pol".chars() {
            app.focused_mut().push_filter(ch);
        }
        assert_eq!(app.focused().highlighted_value(), Some("Poland"));
        app.commit_focused();
        assert_eq!(app.selection.company, "PSE");
        assert!(app.focused().filter.is_empty());
        Ok(())
    }

    #[test]
    fn filter_without_matches_does_not_commit() -> TestResult {
        let mut app = app()?;
        for ch in "zzz".chars() {
            app.focused_mut().push_filter(ch);
        }
        app.commit_focused();
        assert_eq!(app.selection.country, "Germany");
        assert_eq!(app.status_message, "No option matches the filter");
        Ok(())
    }

    #[test]
    fn initial_choices_follow_precedence() -> TestResult {
        let mut app = app()?;
        app.apply_initial_choices(&[(SelectorField::Acronym, "PL")])?;
        assert_eq!(app.selection.country, "Poland");

        let result = app.apply_initial_choices(&[(SelectorField::Country, "Atlantis")]);
        assert!(result.is_err());
        assert_eq!(app.selection.country, "Poland");
        Ok(())
    }

    fn start_with(flags: &[&str]) -> Result<App, Box<dyn std::error::Error>> {
        let args = CliArgs::try_parse_from(std::iter::once("tsoview").chain(flags.iter().copied()))?;
        let mut app = app()?;
        app.apply_initial_choices(&args.initial_choices())?;
        Ok(app)
    }

    #[test]
    fn conflicting_flags_resolve_by_country_then_acronym() -> TestResult {
        let app = start_with(&["--country", "France", "--acronym", "PL"])?;
        assert_eq!(app.selection.country, "France");

        let app = start_with(&["--company", "RTE", "--country", "Poland"])?;
        assert_eq!(app.selection.company, "PSE");

        let app = start_with(&["--acronym", "PL", "--company", "RTE"])?;
        assert_eq!(app.selection.acronym, "PL");
        Ok(())
    }

    #[test]
    fn flag_matching_the_default_defers_to_the_next_one() -> TestResult {
        let app = start_with(&["--country", "Germany", "--company", "RTE"])?;
        assert_eq!(app.selection.country, "France");
        Ok(())
    }

    #[test]
    fn failed_initial_choices_keep_the_default() -> TestResult {
        let mut app = app()?;
        let result = app.apply_initial_choices(&[
            (SelectorField::Acronym, "XX"),
            (SelectorField::Company, "RTE"),
        ]);
        assert_eq!(result, Err(LookupError::Acronym("XX".to_string())));
        assert_eq!(app.selection.country, "Germany");
        assert_eq!(app.status_message, "Error: no record with acronym \"XX\"");
        Ok(())
    }
}
