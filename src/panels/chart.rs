//! src/panels/chart.rs
//!
//! Chart panel: paints a rendered `Scene` onto a braille canvas.
//!
//! The canvas bounds are the logical surface size, so ratatui does the
//! scaling; only the y axis is flipped (surface y grows down, canvas y grows
//! up). Filled shapes are sampled at the canvas dot pitch.

use std::cell::Cell;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Context, Line as CanvasLine, Painter, Shape as CanvasShape},
    },
};

use crate::render::geometry::Point;
use crate::render::scene::{Align, Layer, Rgba, Scene, Shape};

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Renders the scene and reports where the canvas landed for pointer mapping.
pub struct ChartPanel<'a> {
    pub scene: &'a Scene,
    pub title: String,
    /// Receives the canvas rectangle (inside the border) after drawing.
    pub canvas_area: &'a Cell<Option<Rect>>,
}

impl<'a> ChartPanel<'a> {
    pub fn new(scene: &'a Scene, title: String, canvas_area: &'a Cell<Option<Rect>>) -> Self {
        Self {
            scene,
            title,
            canvas_area,
        }
    }
}

/// Canvas dot pitch expressed in surface units.
#[derive(Clone, Copy, Debug)]
struct Pitch {
    /// surface units per braille dot, horizontally and vertically
    dot_x: f64,
    dot_y: f64,
    /// surface units per terminal column
    cell_x: f64,
}

impl Pitch {
    fn new(scene: &Scene, inner: Rect) -> Self {
        let cols = f64::from(inner.width.max(1));
        let rows = f64::from(inner.height.max(1));
        Self {
            dot_x: scene.width / (cols * 2.0),
            dot_y: scene.height / (rows * 4.0),
            cell_x: scene.width / cols,
        }
    }
}

impl crate::ui::Panel for ChartPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let scene = self.scene;
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        self.canvas_area.set(Some(inner));
        let pitch = Pitch::new(scene, inner);

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .background_color(scene.background.into())
            .x_bounds([0.0, scene.width])
            .y_bounds([0.0, scene.height])
            .paint(|ctx| paint_scene(ctx, scene, pitch));

        f.render_widget(canvas, area);
    }
}

fn paint_scene(ctx: &mut Context<'_>, scene: &Scene, pitch: Pitch) {
    let flip = |y: f64| scene.height - y;
    let mut current: Option<Layer> = None;

    for item in &scene.items {
        // keep grid, axes and each series on their own canvas layer
        if current.is_some_and(|l| l != item.layer) {
            ctx.layer();
        }
        current = Some(item.layer);

        let color = item.shape.color();
        match &item.shape {
            Shape::Line { from, to, .. } => {
                ctx.draw(&CanvasLine::new(
                    from.x,
                    flip(from.y),
                    to.x,
                    flip(to.y),
                    color.into(),
                ));
            }
            Shape::Stroke { path, .. } => {
                let pts = path.flatten();
                for pair in pts.windows(2) {
                    ctx.draw(&CanvasLine::new(
                        pair[0].x,
                        flip(pair[0].y),
                        pair[1].x,
                        flip(pair[1].y),
                        color.into(),
                    ));
                }
            }
            Shape::Rect {
                origin,
                width,
                height,
                ..
            } => ctx.draw(&Fill {
                region: Region::Rect {
                    min: *origin,
                    max: Point::new(origin.x + width, origin.y + height),
                },
                color: color.into(),
                surface_height: scene.height,
                pitch,
            }),
            // no blending on a terminal: composite translucent fills up front
            Shape::Polygon { points, .. } => ctx.draw(&Fill {
                region: Region::Polygon(points),
                color: color.over(scene.background).into(),
                surface_height: scene.height,
                pitch,
            }),
            Shape::Circle { center, radius, .. } => ctx.draw(&Fill {
                region: Region::Circle {
                    center: *center,
                    radius: *radius,
                },
                color: color.into(),
                surface_height: scene.height,
                pitch,
            }),
            Shape::Text {
                at, text, align, ..
            } => {
                let span_width = text.chars().count() as f64 * pitch.cell_x;
                let x = match align {
                    Align::Center => at.x - span_width / 2.0,
                    Align::Right => at.x - span_width,
                };
                ctx.print(
                    x.max(0.0),
                    flip(at.y),
                    Span::styled(text.clone(), Style::default().fg(color.into())),
                );
            }
        }
    }
}

enum Region<'s> {
    Rect { min: Point, max: Point },
    Polygon(&'s [Point]),
    Circle { center: Point, radius: f64 },
}

impl Region<'_> {
    /// Bounding box in surface units as (min, max).
    fn bounds(&self) -> (Point, Point) {
        match self {
            Region::Rect { min, max } => (*min, *max),
            Region::Polygon(points) => points.iter().fold(
                (
                    Point::new(f64::INFINITY, f64::INFINITY),
                    Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
                ),
                |(lo, hi), p| {
                    (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    )
                },
            ),
            Region::Circle { center, radius } => (
                Point::new(center.x - radius, center.y - radius),
                Point::new(center.x + radius, center.y + radius),
            ),
        }
    }

    fn contains(&self, p: Point) -> bool {
        match self {
            Region::Rect { min, max } => p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y,
            Region::Polygon(points) => polygon_contains(points, p),
            Region::Circle { center, radius } => {
                let (dx, dy) = (p.x - center.x, p.y - center.y);
                dx * dx + dy * dy <= radius * radius
            }
        }
    }

    /// A point that is always painted so sub-dot shapes stay visible.
    fn anchor(&self) -> Option<Point> {
        match self {
            Region::Rect { min, max } => Some(min.midpoint(*max)),
            Region::Circle { center, .. } => Some(*center),
            Region::Polygon(_) => None,
        }
    }
}

/// Even-odd point in polygon test.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Filled region sampled at the centers of canvas dots.
struct Fill<'s> {
    region: Region<'s>,
    color: Color,
    surface_height: f64,
    pitch: Pitch,
}

impl Fill<'_> {
    fn paint_at(&self, painter: &mut Painter<'_, '_>, p: Point) {
        if let Some((x, y)) = painter.get_point(p.x, self.surface_height - p.y) {
            painter.paint(x, y, self.color);
        }
    }
}

impl CanvasShape for Fill<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let (lo, hi) = self.region.bounds();
        if !(lo.x.is_finite() && lo.y.is_finite() && hi.x.is_finite() && hi.y.is_finite()) {
            return;
        }
        let Pitch { dot_x, dot_y, .. } = self.pitch;
        if dot_x <= 0.0 || dot_y <= 0.0 {
            return;
        }

        let mut row = (lo.y / dot_y).floor();
        while (row + 0.5) * dot_y <= hi.y {
            let y = (row + 0.5) * dot_y;
            let mut col = (lo.x / dot_x).floor();
            while (col + 0.5) * dot_x <= hi.x {
                let p = Point::new((col + 0.5) * dot_x, y);
                if self.region.contains(p) {
                    self.paint_at(painter, p);
                }
                col += 1.0;
            }
            row += 1.0;
        }

        if let Some(anchor) = self.region.anchor() {
            self.paint_at(painter, anchor);
        }
    }
}

/// Map a terminal cell to the surface point under its center.
///
/// Returns `None` when the cell lies outside the canvas.
pub fn surface_point(canvas: Rect, scene: &Scene, column: u16, row: u16) -> Option<Point> {
    if canvas.width == 0 || canvas.height == 0 || !canvas.contains(Position::new(column, row)) {
        return None;
    }
    let cx = f64::from(column - canvas.x) + 0.5;
    let cy = f64::from(row - canvas.y) + 0.5;
    Some(Point::new(
        cx * scene.width / f64::from(canvas.width),
        cy * scene.height / f64::from(canvas.height),
    ))
}

/// Terminal cell containing surface point `p`, clamped to the canvas.
pub fn surface_cell(canvas: Rect, scene: &Scene, p: Point) -> Option<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 || scene.width <= 0.0 || scene.height <= 0.0 {
        return None;
    }
    let col = (p.x * f64::from(canvas.width) / scene.width).floor();
    let row = (p.y * f64::from(canvas.height) / scene.height).floor();
    let col = col.clamp(0.0, f64::from(canvas.width - 1)) as u16;
    let row = row.clamp(0.0, f64::from(canvas.height - 1)) as u16;
    Some((canvas.x + col, canvas.y + row))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::chart::config::{ChartConfig, ChartType};
    use crate::chart::state::LiveChart;
    use crate::control::Control;
    use crate::render::renderer::render;
    use crate::ui::Panel;

    fn draw(scene: &Scene) -> (ratatui::buffer::Buffer, Option<Rect>) {
        let area = Cell::new(None);
        let panel = ChartPanel::new(scene, "chart".into(), &area);
        let mut terminal = Terminal::new(TestBackend::new(82, 22)).unwrap();
        terminal.draw(|f| panel.draw(f, f.area())).unwrap();
        (terminal.backend().buffer().clone(), area.get())
    }

    #[test]
    fn records_canvas_inside_border() {
        let chart = LiveChart::seeded(ChartConfig::default(), 1);
        let (_, area) = draw(&render(&chart));
        assert_eq!(area, Some(Rect::new(1, 1, 80, 20)));
    }

    #[test]
    fn paints_every_chart_type() {
        let mut chart = LiveChart::seeded(ChartConfig::default(), 1);
        for t in ChartType::ALL {
            chart.apply(Control::SetChartType(t));
            let (buf, _) = draw(&render(&chart));
            let painted = buf
                .content()
                .iter()
                .filter(|c| c.symbol() != " " && c.fg == Color::Rgb(0xff, 0, 0))
                .count();
            assert!(painted > 0, "{t:?} left no red cells");
        }
    }

    #[test]
    fn value_labels_are_printed() {
        let chart = LiveChart::seeded(ChartConfig::default(), 1);
        let (buf, _) = draw(&render(&chart));
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("-50"));
        assert!(text.contains("30"));
    }

    #[test]
    fn cell_to_surface_mapping() {
        let chart = LiveChart::seeded(ChartConfig::default(), 1);
        let scene = render(&chart);
        let canvas = Rect::new(1, 1, 80, 20);
        let p = surface_point(canvas, &scene, 1, 1).unwrap();
        assert_eq!(p, Point::new(5.0, 10.0));
        let p = surface_point(canvas, &scene, 80, 20).unwrap();
        assert_eq!(p, Point::new(795.0, 390.0));
        assert_eq!(surface_point(canvas, &scene, 0, 5), None);
        assert_eq!(surface_point(canvas, &scene, 81, 5), None);
    }

    #[test]
    fn surface_to_cell_inverts_mapping() {
        let chart = LiveChart::seeded(ChartConfig::default(), 1);
        let scene = render(&chart);
        let canvas = Rect::new(1, 1, 80, 20);
        for (col, row) in [(1, 1), (40, 7), (80, 20)] {
            let p = surface_point(canvas, &scene, col, row).unwrap();
            assert_eq!(surface_cell(canvas, &scene, p), Some((col, row)));
        }
        assert_eq!(
            surface_cell(canvas, &scene, Point::new(-10.0, 1e6)),
            Some((1, 20))
        );
    }

    #[test]
    fn polygon_hit_test() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(polygon_contains(&square, Point::new(5.0, 5.0)));
        assert!(!polygon_contains(&square, Point::new(15.0, 5.0)));
        assert!(!polygon_contains(&square[..2], Point::new(5.0, 0.0)));
    }
}
