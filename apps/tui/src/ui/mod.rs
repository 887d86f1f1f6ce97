// UI module for tsoview
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::main::render_main(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountryGeometry, CountryRecord, GeometryStore, RecordTable};
    use geo::{polygon, MultiPolygon};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn app() -> Result<App, Box<dyn std::error::Error>> {
        let table = RecordTable::from_records(vec![
            CountryRecord::new("Germany", "DE", "Amprion", &["FR"]),
            CountryRecord::new("France", "FR", "RTE", &["DE"]),
        ])?;
        let square = |x: f64, y: f64| {
            MultiPolygon::new(vec![polygon![
                (x: x, y: y),
                (x: x + 4.0, y: y),
                (x: x + 4.0, y: y + 4.0),
                (x: x, y: y + 4.0),
                (x: x, y: y),
            ]])
        };
        let geometry = GeometryStore::from_geometries(vec![
            CountryGeometry {
                iso_code: "DE".to_string(),
                shape: square(8.0, 49.0),
            },
            CountryGeometry {
                iso_code: "FR".to_string(),
                shape: square(1.0, 45.0),
            },
        ]);
        Ok(App::new(table, geometry)?)
    }

    fn screen_text(app: &App) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(140, 45))?;
        terminal.draw(|f| ui(app, f))?;
        let buffer = terminal.backend().buffer();
        Ok(buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect())
    }

    #[test]
    fn renders_selectors_and_panel() -> TestResult {
        let text = screen_text(&app()?)?;
        assert!(text.contains("Select Country:"));
        assert!(text.contains("Select TSO Name:"));
        assert!(text.contains("Country: Germany"));
        assert!(text.contains("FR - France (RTE)"));
        Ok(())
    }

    #[test]
    fn renders_help_popup() -> TestResult {
        let mut app = app()?;
        app.show_help = true;
        let text = screen_text(&app)?;
        assert!(text.contains("Keyboard Shortcuts"));
        Ok(())
    }
}
