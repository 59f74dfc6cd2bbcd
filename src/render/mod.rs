//! Boundary between the animation core and whatever paints it.
//!
//! The core emits a [`FrameDescriptor`] per frame: two filled circles and
//! the region they share, each with its own color. A backend implements
//! [`RenderAdapter`] to report its surface size and paint that descriptor.
//! Two backends ship with the crate: the wgpu
//! [`BallRenderer`](crate::gpu::BallRenderer) and the CPU [`Canvas`].

mod canvas;

use glam::Vec2;

pub use canvas::Canvas;

use crate::geometry::Frame;
use crate::view::LoadingView;

/// Declarative description of one frame.
///
/// Paint `ltr`, then `rtl`, then `overlap` in `mix_color` on top.
pub type FrameDescriptor = Frame;

/// A surface that can paint frame descriptors.
pub trait RenderAdapter {
    /// Error raised while painting.
    type Error;

    /// Current drawable size in pixels.
    fn surface_size(&self) -> Vec2;

    /// Paint one frame, replacing the previous one.
    fn draw_frame(&mut self, frame: &FrameDescriptor)
        -> Result<(), Self::Error>;
}

/// Paint the view's current frame on `adapter`, sized to its surface.
pub fn paint<A: RenderAdapter>(
    view: &LoadingView,
    adapter: &mut A,
) -> Result<(), A::Error> {
    let frame = view.frame(adapter.surface_size());
    adapter.draw_frame(&frame)
}
