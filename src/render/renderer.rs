//! src/render/renderer.rs
//!
//! Frame composition: background, grid, axes with tick labels, then every
//! series through the draw routine of the selected chart type.
//!
//! Rendering only reads `LiveChart`; the same scene feeds the terminal canvas
//! and the PNG exporter.

use super::geometry::{PlotArea, Point};
use super::scene::{Align, Layer, Path, Rgba, Scene, Shape};
use crate::chart::config::{ChartConfig, ChartType, Palette};
use crate::chart::series::Series;
use crate::chart::state::LiveChart;

/// Vertical grid divisions (one guide line per boundary).
pub const GRID_COLUMNS: usize = 10;
/// Horizontal grid divisions.
pub const GRID_ROWS: usize = 5;

pub const GRID_WIDTH: f64 = 0.5;
pub const AXIS_WIDTH: f64 = 2.0;
pub const LINE_WIDTH: f64 = 2.0;
/// Share of a sample slot covered by its bar.
pub const BAR_FILL: f64 = 0.8;
pub const AREA_OPACITY: f64 = 0.3;
pub const POINT_RADIUS: f64 = 3.0;

/// Distance of x tick labels below the plot and of y tick labels left of it.
const X_LABEL_OFFSET: f64 = 15.0;
const Y_LABEL_OFFSET: f64 = 10.0;
/// Nudges y labels onto their guide line (half a text height).
const Y_LABEL_BASELINE: f64 = 4.0;

/// Render the chart's current state into a fresh scene.
pub fn render(chart: &LiveChart) -> Scene {
    let cfg = &chart.config;
    let palette = cfg.theme.palette();
    let area = chart.plot_area();
    let mut scene = Scene::new(cfg.width, cfg.height, palette.background);

    if cfg.show_grid {
        draw_grid(&mut scene, &area, cfg, palette.grid);
    }
    draw_axes(&mut scene, &area, cfg, &palette);

    for (idx, series) in chart.series.iter().enumerate() {
        draw_series(&mut scene, &area, cfg, idx, series);
    }
    scene
}

fn draw_grid(scene: &mut Scene, area: &PlotArea, cfg: &ChartConfig, color: Rgba) {
    for i in 0..=GRID_COLUMNS {
        let x = area.left + (i as f64 * area.width) / GRID_COLUMNS as f64;
        scene.push(
            Layer::Grid,
            Shape::Line {
                from: Point::new(x, area.top),
                to: Point::new(x, area.bottom()),
                color,
                width: GRID_WIDTH,
            },
        );
    }

    let (min, max) = cfg.value_range();
    for i in 0..=GRID_ROWS {
        let y = area.y_for_value(row_value(i, min, max), min, max);
        scene.push(
            Layer::Grid,
            Shape::Line {
                from: Point::new(area.left, y),
                to: Point::new(area.right(), y),
                color,
                width: GRID_WIDTH,
            },
        );
    }
}

/// Value at horizontal guide `i`, counting down from `max`.
fn row_value(i: usize, min: f64, max: f64) -> f64 {
    max - (i as f64 * (max - min)) / GRID_ROWS as f64
}

fn draw_axes(scene: &mut Scene, area: &PlotArea, cfg: &ChartConfig, palette: &Palette) {
    let origin = Point::new(area.left, area.bottom());
    scene.push(
        Layer::Axis,
        Shape::Line {
            from: origin,
            to: Point::new(area.right(), area.bottom()),
            color: palette.axis,
            width: AXIS_WIDTH,
        },
    );
    scene.push(
        Layer::Axis,
        Shape::Line {
            from: Point::new(area.left, area.top),
            to: origin,
            color: palette.axis,
            width: AXIS_WIDTH,
        },
    );

    for i in 0..=GRID_COLUMNS {
        let x = area.left + (i as f64 * area.width) / GRID_COLUMNS as f64;
        let label = ((i * cfg.capacity) as f64 / GRID_COLUMNS as f64).round();
        scene.push(
            Layer::Label,
            Shape::Text {
                at: Point::new(x, area.bottom() + X_LABEL_OFFSET),
                text: format!("{label}"),
                color: palette.text,
                align: Align::Center,
            },
        );
    }

    let (min, max) = cfg.value_range();
    for i in 0..=GRID_ROWS {
        let y = area.top + (i as f64 * area.height) / GRID_ROWS as f64;
        scene.push(
            Layer::Label,
            Shape::Text {
                at: Point::new(area.left - Y_LABEL_OFFSET, y + Y_LABEL_BASELINE),
                text: format!("{:.0}", row_value(i, min, max)),
                color: palette.text,
                align: Align::Right,
            },
        );
    }
}

fn draw_series(scene: &mut Scene, area: &PlotArea, cfg: &ChartConfig, idx: usize, series: &Series) {
    if series.len() < 2 {
        return;
    }
    let (min, max) = cfg.value_range();
    let points = area.project(series.samples().iter().copied(), cfg.capacity, min, max);
    let layer = Layer::Series(idx);

    match cfg.chart_type {
        ChartType::Line => draw_line(scene, layer, &points, series.color, cfg.smoothing),
        ChartType::Bar => draw_bars(scene, layer, area, &points, cfg.capacity, series.color),
        ChartType::Area => draw_area(scene, layer, area, &points, series.color, cfg.smoothing),
        ChartType::Scatter => draw_scatter(scene, layer, &points, series.color),
    }
}

/// Polyline through `points`, or quadratic segments through consecutive
/// midpoints when smoothing. The first and last points stay sharp.
pub fn line_path(points: &[Point], smooth: bool) -> Path {
    let mut path = Path::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);

    if smooth && points.len() > 2 {
        for pair in points[1..].windows(2) {
            path.quad_to(pair[0], pair[0].midpoint(pair[1]));
        }
        path.line_to(points[points.len() - 1]);
    } else {
        for &p in rest {
            path.line_to(p);
        }
    }
    path
}

fn draw_line(scene: &mut Scene, layer: Layer, points: &[Point], color: Rgba, smooth: bool) {
    scene.push(
        layer,
        Shape::Stroke {
            path: line_path(points, smooth),
            color,
            width: LINE_WIDTH,
        },
    );
}

fn draw_bars(
    scene: &mut Scene,
    layer: Layer,
    area: &PlotArea,
    points: &[Point],
    capacity: usize,
    color: Rgba,
) {
    let bar_width = area.width / capacity.max(1) as f64 * BAR_FILL;
    for p in points {
        scene.push(
            layer,
            Shape::Rect {
                origin: Point::new(p.x - bar_width / 2.0, p.y),
                width: bar_width,
                height: area.bottom() - p.y,
                color,
            },
        );
    }
}

fn draw_area(
    scene: &mut Scene,
    layer: Layer,
    area: &PlotArea,
    points: &[Point],
    color: Rgba,
    smooth: bool,
) {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return;
    };
    let mut outline = Vec::with_capacity(points.len() + 2);
    outline.push(Point::new(first.x, area.bottom()));
    outline.extend_from_slice(points);
    outline.push(Point::new(last.x, area.bottom()));

    scene.push(
        layer,
        Shape::Polygon {
            points: outline,
            color: color.with_alpha(AREA_OPACITY),
        },
    );
    draw_line(scene, layer, points, color, smooth);
}

fn draw_scatter(scene: &mut Scene, layer: Layer, points: &[Point], color: Rgba) {
    for &center in points {
        scene.push(
            layer,
            Shape::Circle {
                center,
                radius: POINT_RADIUS,
                color,
            },
        );
    }
}
