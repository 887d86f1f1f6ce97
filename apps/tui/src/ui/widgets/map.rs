use std::collections::HashSet;
use std::ops::Range;

use geo::{BoundingRect, Centroid, Contains, LineString, MultiPolygon, Point};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line as TextLine;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::domain::{GeometryStore, Highlight, SelectionReport, Viewport};

/// Braille dots per terminal cell, horizontally and vertically.
const DOTS_X: u16 = 2;
const DOTS_Y: u16 = 4;

pub fn render_map(
    geometry: &GeometryStore,
    report: &SelectionReport,
    viewport: Viewport,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(
            " Map {:.2}, {:.2} (zoom {}) ",
            viewport.center.lat, viewport.center.lon, viewport.zoom
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height < 2 {
        return;
    }

    let (x_bounds, y_bounds) = viewport.bounds(inner.width, inner.height);
    let grid = SampleGrid {
        x_bounds,
        y_bounds,
        columns: inner.width.saturating_mul(DOTS_X),
        rows: inner.height.saturating_mul(DOTS_Y),
    };
    let layers = paint_order(geometry, report);

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                for (_, shape, highlight) in &layers {
                    if highlight.is_filled() {
                        ctx.draw(&Points {
                            coords: &grid.fill(shape),
                            color: highlight.color(),
                        });
                    }
                    draw_outline(ctx, shape, highlight.color());
                }

                ctx.layer();
                for (code, shape, highlight) in &layers {
                    if *highlight == Highlight::Other {
                        continue;
                    }
                    if let Some(label) = shape.centroid() {
                        ctx.print(
                            label.x(),
                            label.y(),
                            TextLine::styled(
                                (*code).to_string(),
                                Style::default()
                                    .fg(Color::White)
                                    .add_modifier(Modifier::BOLD),
                            ),
                        );
                    }
                }
            })
            .x_bounds(x_bounds)
            .y_bounds(y_bounds),
        inner,
    );
}

/// Features with their highlight, unhighlighted first so the selection and
/// its neighbors are drawn on top.
fn paint_order<'g>(
    geometry: &'g GeometryStore,
    report: &SelectionReport,
) -> Vec<(&'g str, &'g MultiPolygon<f64>, Highlight)> {
    let neighbors: HashSet<&str> = report.neighbor_codes();
    let mut layers: Vec<_> = geometry
        .features()
        .map(|(code, shape)| {
            let highlight = Highlight::classify(code, &report.selection.acronym, &neighbors);
            (code, shape, highlight)
        })
        .collect();
    layers.sort_by_key(|(_, _, highlight)| match highlight {
        Highlight::Other => 0,
        Highlight::Neighbor => 1,
        Highlight::Selected => 2,
    });
    layers
}

fn draw_outline(ctx: &mut Context<'_>, shape: &MultiPolygon<f64>, color: Color) {
    for polygon in shape {
        draw_ring(ctx, polygon.exterior(), color);
        for interior in polygon.interiors() {
            draw_ring(ctx, interior, color);
        }
    }
}

fn draw_ring(ctx: &mut Context<'_>, ring: &LineString<f64>, color: Color) {
    for segment in ring.lines() {
        ctx.draw(&CanvasLine {
            x1: segment.start.x,
            y1: segment.start.y,
            x2: segment.end.x,
            y2: segment.end.y,
            color,
        });
    }
}

/// One sample per braille dot across the visible window.
#[derive(Debug, Clone, Copy)]
struct SampleGrid {
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    columns: u16,
    rows: u16,
}

impl SampleGrid {
    fn step_x(&self) -> f64 {
        (self.x_bounds[1] - self.x_bounds[0]) / f64::from(self.columns.max(1))
    }

    fn step_y(&self) -> f64 {
        (self.y_bounds[1] - self.y_bounds[0]) / f64::from(self.rows.max(1))
    }

    /// Dot centers inside `shape`. Only the part of the grid covered by the
    /// shape's bounding box is tested.
    fn fill(&self, shape: &MultiPolygon<f64>) -> Vec<(f64, f64)> {
        let Some(rect) = shape.bounding_rect() else {
            return Vec::new();
        };
        let (step_x, step_y) = (self.step_x(), self.step_y());
        if step_x <= 0.0 || step_y <= 0.0 {
            return Vec::new();
        }

        let column_range = Self::index_range(
            rect.min().x,
            rect.max().x,
            self.x_bounds[0],
            step_x,
            self.columns,
        );
        let row_range =
            Self::index_range(rect.min().y, rect.max().y, self.y_bounds[0], step_y, self.rows);

        let mut coords = Vec::new();
        for row in row_range {
            let y = (f64::from(row) + 0.5).mul_add(step_y, self.y_bounds[0]);
            for column in column_range.clone() {
                let x = (f64::from(column) + 0.5).mul_add(step_x, self.x_bounds[0]);
                if shape.contains(&Point::new(x, y)) {
                    coords.push((x, y));
                }
            }
        }
        coords
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn index_range(min: f64, max: f64, origin: f64, step: f64, count: u16) -> Range<u16> {
        let to_index = |value: f64| ((value - origin) / step).clamp(0.0, f64::from(count)) as u16;
        to_index(min)..to_index(max).saturating_add(1).min(count)
    }
}
