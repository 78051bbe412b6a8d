//! src/render.rs
//!
//! Top-level `render` module: surface geometry, the scene display list, frame
//! composition and PNG export.

pub mod export;
pub mod geometry;
pub mod renderer;
pub mod scene;

/// Re-exports
pub use renderer::render;
pub use scene::Scene;
