//! GPU backend: wgpu device/surface setup and the ball renderer.

mod ball_renderer;
mod render_context;

pub use ball_renderer::{BallRenderer, BallUniform};
pub use render_context::{RenderContext, RenderContextError};
