//! src/render/export.rs
//!
//! PNG export of a rendered scene through the plotters bitmap backend.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

use super::geometry::Point;
use super::scene::{Align, Rgba, Scene, Shape};

/// Tick label size in pixels.
const LABEL_FONT_SIZE: f64 = 12.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot create {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Rasterize `scene` at its own size and write it as PNG to `path`.
///
/// Missing parent directories are created.
pub fn write_png(scene: &Scene, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let size = pixel_size(scene);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    paint(&root, scene)?;
    root.present().map_err(draw_error)?;
    tracing::info!(path = %path.display(), width = size.0, height = size.1, "exported png");
    Ok(())
}

/// Surface size in whole pixels.
fn pixel_size(scene: &Scene) -> (u32, u32) {
    (
        scene.width.round().max(1.0) as u32,
        scene.height.round().max(1.0) as u32,
    )
}

/// Fill the background and draw every item in order onto `root`.
fn paint<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
) -> Result<(), ExportError> {
    root.fill(&rgb(scene.background)).map_err(draw_error)?;

    for item in &scene.items {
        let drawn = match &item.shape {
            Shape::Line {
                from,
                to,
                color,
                width,
            } => root.draw(&PathElement::new(
                vec![px(*from), px(*to)],
                rgb(*color).stroke_width(stroke(*width)),
            )),
            Shape::Rect {
                origin,
                width,
                height,
                color,
            } => {
                let corner = Point::new(origin.x + width, origin.y + height);
                root.draw(&Rectangle::new([px(*origin), px(corner)], fill(*color)))
            }
            Shape::Stroke { path, color, width } => root.draw(&PathElement::new(
                path.flatten().into_iter().map(px).collect::<Vec<_>>(),
                rgb(*color).stroke_width(stroke(*width)),
            )),
            Shape::Polygon { points, color } => root.draw(&Polygon::new(
                points.iter().copied().map(px).collect::<Vec<_>>(),
                fill(*color),
            )),
            Shape::Circle {
                center,
                radius,
                color,
            } => root.draw(&Circle::new(
                px(*center),
                radius.round().max(1.0) as i32,
                fill(*color),
            )),
            Shape::Text {
                at,
                text,
                color,
                align,
            } => {
                let style = (FontFamily::SansSerif, LABEL_FONT_SIZE)
                    .into_font()
                    .color(&rgb(*color))
                    .pos(Pos::new(h_pos(*align), VPos::Center));
                root.draw(&Text::new(text.clone(), px(*at), style))
            }
        };
        drawn.map_err(draw_error)?;
    }
    Ok(())
}

fn draw_error<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn stroke(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

fn rgb(c: Rgba) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Filled style honoring the color's opacity.
fn fill(c: Rgba) -> ShapeStyle {
    RGBAColor(c.r, c.g, c.b, c.opacity()).filled()
}

fn h_pos(align: Align) -> HPos {
    match align {
        Align::Center => HPos::Center,
        Align::Right => HPos::Right,
    }
}
