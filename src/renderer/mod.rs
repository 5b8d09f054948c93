//! Rendering
//!
//! The game only ever asks for one thing: draw a cloud of colored points
//! at an offset. [`Renderer`] is that contract; [`PointRenderState`] is the
//! WebGPU implementation and [`QuadBatch`] the CPU-side geometry it uploads.

pub mod pipeline;
pub mod scene;
pub mod vertex;

use glam::Vec2;

pub use pipeline::{PointRenderState, QuadBatch};
pub use scene::draw_scene;
pub use vertex::PointVertex;

/// Point-cloud drawing contract
pub trait Renderer {
    /// Draw one point per entry of `positions`, translated by `offset`.
    ///
    /// `colors` is aligned with `positions`; surplus entries in either are
    /// ignored. Empty input draws nothing.
    fn draw_points(&mut self, positions: &[[f32; 2]], colors: &[[f32; 3]], offset: Vec2);
}
