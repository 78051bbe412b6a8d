//! src/render/scene.rs
//!
//! Retained display list produced by one frame of rendering.
//!
//! A `Scene` is backend-agnostic: the terminal canvas and the PNG exporter
//! both walk the same list of shapes, in order, painting later items on top.

use super::geometry::Point;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Same color with opacity `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Composite this color over an opaque `background`.
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.opacity();
        let mix = |fg: u8, bg: u8| (f64::from(fg) * a + f64::from(bg) * (1.0 - a)).round() as u8;
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bezier from the current point through control `ctrl` to `to`.
    QuadTo { ctrl: Point, to: Point },
}

/// Open stroked path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

/// Line segments used to approximate one quadratic segment.
pub const QUAD_STEPS: usize = 8;

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) -> &mut Self {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
        self
    }

    /// Approximate the path by a polyline, splitting quadratics into `QUAD_STEPS` pieces.
    pub fn flatten(&self) -> Vec<Point> {
        let mut out: Vec<Point> = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => out.push(p),
                PathSegment::QuadTo { ctrl, to } => {
                    let from = out.last().copied().unwrap_or(ctrl);
                    for step in 1..=QUAD_STEPS {
                        let t = step as f64 / QUAD_STEPS as f64;
                        let u = 1.0 - t;
                        out.push(Point::new(
                            u * u * from.x + 2.0 * u * t * ctrl.x + t * t * to.x,
                            u * u * from.y + 2.0 * u * t * ctrl.y + t * t * to.y,
                        ));
                    }
                }
            }
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    /// Filled axis-aligned rectangle with `origin` as its top-left corner.
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        color: Rgba,
    },
    Stroke {
        path: Path,
        color: Rgba,
        width: f64,
    },
    /// Filled closed polygon; the color's alpha is the fill opacity.
    Polygon { points: Vec<Point>, color: Rgba },
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    /// Text anchored at `at` by its center or its right edge.
    Text {
        at: Point,
        text: String,
        color: Rgba,
        align: Align,
    },
}

impl Shape {
    pub fn color(&self) -> Rgba {
        match self {
            Shape::Line { color, .. }
            | Shape::Rect { color, .. }
            | Shape::Stroke { color, .. }
            | Shape::Polygon { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Text { color, .. } => *color,
        }
    }
}

/// What part of the chart an item belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Grid,
    Axis,
    Label,
    /// Data of the series at this index.
    Series(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub layer: Layer,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Rgba,
    pub items: Vec<Item>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Rgba) -> Self {
        Self {
            width,
            height,
            background,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, layer: Layer, shape: Shape) {
        self.items.push(Item { layer, shape });
    }
}

#[cfg(test)]
impl Path {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

#[cfg(test)]
impl Scene {
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &Shape> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_compositing() {
        let red = Rgba::rgb(0xff, 0, 0).with_alpha(0.5);
        assert_eq!(red.a, 128);
        let mixed = red.over(Rgba::WHITE);
        assert_eq!(mixed, Rgba::rgb(0xff, 127, 127));
        assert_eq!(Rgba::BLACK.over(Rgba::WHITE), Rgba::BLACK);
    }

    #[test]
    fn flatten_keeps_endpoints() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0))
            .quad_to(Point::new(10.0, 10.0), Point::new(20.0, 0.0))
            .line_to(Point::new(30.0, 5.0));
        let pts = path.flatten();
        assert_eq!(pts.len(), 1 + QUAD_STEPS + 1);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[QUAD_STEPS], Point::new(20.0, 0.0));
        assert_eq!(*pts.last().unwrap(), Point::new(30.0, 5.0));
        // halfway along the curve sits between endpoints and control
        assert_eq!(pts[QUAD_STEPS / 2], Point::new(10.0, 5.0));
    }
}
