use crate::app::input::helpers::{page_down, page_up, wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_main_input(app: &mut App, key: KeyCode) {
    let filtering = !app.focused().filter.is_empty();

    match key {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Up => move_highlight(app, wrap_decrement),
        KeyCode::Down => move_highlight(app, wrap_increment),
        KeyCode::PageUp => move_highlight(app, page_up),
        KeyCode::PageDown => move_highlight(app, page_down),
        KeyCode::Home => move_highlight(app, |_, _| 0),
        KeyCode::End => move_highlight(app, |_, len| len.saturating_sub(1)),
        KeyCode::Enter => app.commit_focused(),
        KeyCode::Backspace => app.focused_mut().pop_filter(),
        KeyCode::Esc => {
            if filtering {
                let value = app.selection.field(app.focus).to_string();
                app.focused_mut().sync_to(&value);
            }
        }
        KeyCode::Char('q') if !filtering => app.running = false,
        KeyCode::Char('+' | '=') if !filtering => app.zoom_in(),
        KeyCode::Char('-') if !filtering => app.zoom_out(),
        KeyCode::Char(ch) => app.focused_mut().push_filter(ch),
        _ => {}
    }
}

fn move_highlight(app: &mut App, step: impl Fn(usize, usize) -> usize) {
    let len = app.focused().visible().len();
    if len == 0 {
        return;
    }
    let selector = app.focused_mut();
    selector.highlighted = step(selector.highlighted.min(len - 1), len);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountryRecord, GeometryStore, RecordTable, SelectorField};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn app() -> Result<App, Box<dyn std::error::Error>> {
        let table = RecordTable::from_records(vec![
            CountryRecord::new("Germany", "DE", "Amprion", &["FR", "PL"]),
            CountryRecord::new("France", "FR", "RTE", &["DE"]),
            CountryRecord::new("Poland", "PL", "PSE", &["DE"]),
        ])?;
        Ok(App::new(table, GeometryStore::default())?)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            handle_main_input(app, *key);
        }
    }

    #[test]
    fn arrows_wrap_around_the_option_list() -> TestResult {
        let mut app = app()?;
        press(&mut app, &[KeyCode::Up]);
        assert_eq!(app.focused().highlighted_value(), Some("Poland"));
        press(&mut app, &[KeyCode::Down]);
        assert_eq!(app.focused().highlighted_value(), Some("Germany"));
        Ok(())
    }

    #[test]
    fn tab_then_enter_commits_in_the_acronym_selector() -> TestResult {
        let mut app = app()?;
        press(&mut app, &[KeyCode::Tab, KeyCode::End, KeyCode::Enter]);
        assert_eq!(app.focus, SelectorField::Acronym);
        assert_eq!(app.selection.country, "Poland");
        Ok(())
    }

    #[test]
    fn q_types_into_an_active_filter() -> TestResult {
        let mut app = app()?;
        press(&mut app, &[KeyCode::Char('P'), KeyCode::Char('q')]);
        assert!(app.running);
        assert_eq!(app.focused().filter, "Pq");
        press(&mut app, &[KeyCode::Esc, KeyCode::Char('q')]);
        assert!(!app.running);
        Ok(())
    }

    #[test]
    fn zoom_keys_adjust_the_map() -> TestResult {
        let mut app = app()?;
        let start = app.zoom;
        press(&mut app, &[KeyCode::Char('+')]);
        assert_eq!(app.zoom, start + 1);
        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('-')]);
        assert_eq!(app.zoom, start - 1);
        Ok(())
    }
}
