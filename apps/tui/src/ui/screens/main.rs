use crate::app::App;
use crate::domain::{SelectionReport, SelectorField};
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use crate::ui::widgets::selector::render_selector;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const TITLE: &str = "Interactive TSO Map in Europe";

pub fn render_main(app: &App, f: &mut Frame<'_>) {
    let main_layout = build_main_layout(f);
    let report = app.report();

    render_title_section(f, main_layout[0]);
    render_selector_section(app, f, main_layout[1]);
    render_content_section(app, &report, f, main_layout[2]);
    render_status_section(app, f, main_layout[3]);
    render_shortcuts(f, main_layout[4]);

    if app.show_help {
        let area = f.area();
        render_help_popup(f, area);
    }
}

fn build_main_layout(f: &Frame<'_>) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec()
}

fn render_title_section(f: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(TextLine::from(Span::styled(
        TITLE,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_selector_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(22),
            Constraint::Percentage(44),
        ])
        .split(area);

    for field in SelectorField::ALL {
        render_selector(
            app.selector(field),
            app.selection.field(field),
            app.focus == field,
            f,
            columns[field.index()],
        );
    }
}

fn render_content_section(app: &App, report: &SelectionReport, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_map(&app.geometry, report, app.viewport(report), f, columns[0]);
    render_info_panel(report, f, columns[1]);
}

fn render_info_panel(report: &SelectionReport, f: &mut Frame<'_>, area: Rect) {
    let lines: Vec<TextLine<'_>> = report
        .panel
        .iter()
        .map(|line| {
            let style = if line.starts_with("- ") {
                Style::default().fg(Color::Red)
            } else if line.ends_with(':') || line.starts_with("Country:") {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            TextLine::from(Span::styled(line.as_str(), style))
        })
        .collect();

    let panel = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Selection ")
                .title_style(Style::default().fg(Color::Blue))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_text = if app.status_message.is_empty() {
        Text::from(Span::styled(
            "Type to filter, Enter to select",
            Style::default().fg(Color::Gray),
        ))
    } else {
        let style = if app.status_message.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };

        Text::from(Span::styled(app.status_message.as_str(), style))
    };

    let status_paragraph = Paragraph::new(status_text)
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let shortcuts_paragraph = Paragraph::new(shortcuts_line()).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn shortcuts_line() -> TextLine<'static> {
    let separator = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
    TextLine::from(vec![
        key_span("F1"),
        separator(": Help | "),
        key_span("Tab"),
        separator(": Next selector | "),
        key_span("Enter"),
        separator(": Select | "),
        key_span("Esc"),
        separator(": Clear filter | "),
        key_span("+/-"),
        separator(": Zoom | "),
        key_span("q"),
        separator(": Quit"),
    ])
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn help_entry(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            key,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        TextLine::from(Span::styled(
            TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Pick a country, acronym or TSO name. The other two selectors follow the record you picked.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled("Keyboard Shortcuts:", bold)),
        help_entry("  Tab / Shift+Tab", " - Move between selectors"),
        help_entry("  Up / Down", " - Move the highlight"),
        help_entry("  PgUp / PgDn / Home / End", " - Jump through the list"),
        help_entry("  Enter", " - Select the highlighted option"),
        help_entry("  (typing)", " - Fuzzy filter the focused selector"),
        help_entry("  Backspace", " - Remove the last filter character"),
        help_entry("  Esc", " - Clear the filter"),
        help_entry("  + / -", " - Zoom the map in or out"),
        help_entry("  F1", " - Toggle this help popup"),
        help_entry("  q", " - Quit application"),
        TextLine::from(""),
        TextLine::from(Span::styled("Map:", bold)),
        TextLine::from(vec![
            Span::styled("  Blue", Style::default().fg(Color::Blue)),
            Span::raw(" - selected country"),
        ]),
        TextLine::from(vec![
            Span::styled("  Red", Style::default().fg(Color::Red)),
            Span::raw(" - neighboring countries"),
        ]),
        TextLine::from(vec![
            Span::styled("  Gray", Style::default().fg(Color::Gray)),
            Span::raw(" - everything else"),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled("CLI Options:", bold)),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
