//! src/ui.rs
//!
//! Top-level UI module: node helpers plus popup placement.

pub mod node;

pub use node::{Panel, group, leaf};

use ratatui::layout::Rect;

/// Cells the popup sits right of the pointer.
pub const POPUP_OFFSET_X: u16 = 2;
/// Cells the popup sits above the pointer.
pub const POPUP_OFFSET_Y: u16 = 1;

/// Place a `width` x `height` popup next to `anchor`, kept inside `bounds`.
///
/// Prefers right of and slightly above the anchor; flips to the left when
/// there is no room on the right.
pub fn popup_at(anchor: (u16, u16), width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);
    let (ax, ay) = anchor;

    let mut x = ax.saturating_add(POPUP_OFFSET_X);
    if x.saturating_add(width) > bounds.right() {
        x = ax.saturating_sub(POPUP_OFFSET_X.saturating_add(width));
    }
    let x = x.clamp(bounds.x, bounds.right().saturating_sub(width));

    let y = ay
        .saturating_sub(POPUP_OFFSET_Y)
        .clamp(bounds.y, bounds.bottom().saturating_sub(height));

    Rect::new(x, y, width, height)
}
