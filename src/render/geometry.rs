//! src/render/geometry.rs
//!
//! Surface coordinates and the plot rectangle.
//!
//! Surface space has its origin at the top-left corner with y growing
//! downwards. The plot rectangle is the surface minus the configured margins;
//! sample index maps linearly onto its width and sample value maps linearly
//! (inverted) onto its height.

use crate::chart::config::ChartConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// The region inside the margins where data is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Plot rectangle for the configured surface size and margins.
    pub fn from_config(cfg: &ChartConfig) -> Self {
        let m = cfg.margins;
        Self::new(
            m.left,
            m.top,
            cfg.width - m.left - m.right,
            cfg.height - m.top - m.bottom,
        )
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Inclusive hit test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    /// Horizontal position of sample `index` in a window of `len` samples.
    pub fn x_for_index(&self, index: usize, len: usize) -> f64 {
        if len < 2 {
            return self.left;
        }
        self.left + (index as f64 * self.width) / (len - 1) as f64
    }

    /// Vertical position of `value` for the range `[min, max]`, clamped to the plot.
    pub fn y_for_value(&self, value: f64, min: f64, max: f64) -> f64 {
        let span = max - min;
        if span <= 0.0 || !value.is_finite() {
            return self.bottom();
        }
        let y = self.top + ((max - value) * self.height) / span;
        y.clamp(self.top, self.bottom())
    }

    /// Nearest sample index under `p`, or `None` outside the plot rectangle.
    pub fn index_at(&self, p: Point, len: usize) -> Option<usize> {
        if len == 0 || !self.contains(p) {
            return None;
        }
        if self.width <= 0.0 || len == 1 {
            return Some(0);
        }
        let idx = (((p.x - self.left) / self.width) * (len - 1) as f64).round();
        if idx >= 0.0 && (idx as usize) < len {
            Some(idx as usize)
        } else {
            None
        }
    }

    /// Map a window of samples to surface points.
    pub fn project<I>(&self, samples: I, len: usize, min: f64, max: f64) -> Vec<Point>
    where
        I: IntoIterator<Item = f64>,
    {
        samples
            .into_iter()
            .enumerate()
            .map(|(i, v)| Point::new(self.x_for_index(i, len), self.y_for_value(v, min, max)))
            .collect()
    }
}
