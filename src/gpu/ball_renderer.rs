//! wgpu backend for frame descriptors.
//!
//! One full-screen triangle; the fragment shader evaluates both discs
//! analytically with a one-pixel anti-aliased edge and paints the shared
//! region in the mix color on top. No vertex buffers, a single uniform.

use bytemuck::Zeroable;
use glam::Vec2;
use wgpu::util::DeviceExt;

use super::render_context::RenderContext;
use crate::color::Color;
use crate::geometry::Circle;
use crate::render::{FrameDescriptor, RenderAdapter};

/// Per-frame shader input. Every field is a `vec4<f32>` to satisfy
/// uniform alignment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BallUniform {
    /// Left-to-right ball: center xy, radius, unused.
    pub ltr: [f32; 4],
    /// Right-to-left ball: center xy, radius, unused.
    pub rtl: [f32; 4],
    /// Left-to-right ball color.
    pub ltr_color: [f32; 4],
    /// Right-to-left ball color.
    pub rtl_color: [f32; 4],
    /// Overlap color.
    pub mix_color: [f32; 4],
    /// Clear color behind the balls.
    pub background: [f32; 4],
}

impl BallUniform {
    /// Pack a frame. `linear` selects linear-light colors for `*Srgb`
    /// targets.
    #[must_use]
    pub fn from_frame(
        frame: &FrameDescriptor,
        background: Color,
        linear: bool,
    ) -> Self {
        let color = |c: Color| {
            if linear {
                c.to_linear_rgba()
            } else {
                c.to_rgba_f32()
            }
        };
        Self {
            ltr: disc(frame.ltr.circle),
            rtl: disc(frame.rtl.circle),
            ltr_color: color(frame.ltr.color),
            rtl_color: color(frame.rtl.color),
            mix_color: color(frame.mix_color),
            background: color(background),
        }
    }
}

fn disc(circle: Circle) -> [f32; 4] {
    [circle.center.x, circle.center.y, circle.radius, 0.0]
}

/// Paints frame descriptors into a window surface.
pub struct BallRenderer {
    context: RenderContext,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    background: Color,
}

impl BallRenderer {
    /// Build the pipeline for `context`'s target format.
    #[must_use]
    pub fn new(context: RenderContext, background: Color) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/balls.wgsl"
        ));

        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Ball Uniform Buffer"),
                contents: bytemuck::bytes_of(&BallUniform::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Ball Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Ball Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Ball Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Ball Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Self {
            context,
            pipeline,
            uniform_buffer,
            bind_group,
            background,
        }
    }

    /// The GPU context this renderer draws with.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Resize the target. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    /// Clear color behind the balls.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// Change the clear color.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Upload `frame` and record its pass into `encoder`, drawing to
    /// `target`.
    fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: &FrameDescriptor,
    ) {
        let linear = self.context.format().is_srgb();
        let uniform = BallUniform::from_frame(frame, self.background, linear);
        self.context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        let [r, g, b, a] = uniform.background;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Ball Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(r),
                        g: f64::from(g),
                        b: f64::from(b),
                        a: f64::from(a),
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

impl RenderAdapter for BallRenderer {
    type Error = wgpu::SurfaceError;

    fn surface_size(&self) -> Vec2 {
        let (width, height) = self.context.size();
        Vec2::new(width as f32, height as f32)
    }

    fn draw_frame(
        &mut self,
        frame: &FrameDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.context.get_next_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        self.encode(&mut encoder, &view, frame);
        self.context.submit(encoder);
        output.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute_frame, Direction};
    use crate::options::{BallConfig, TimingConfig};

    fn frame() -> FrameDescriptor {
        compute_frame(
            0.5,
            Direction::Ltr,
            &BallConfig::default(),
            &TimingConfig::default(),
            Vec2::new(40.0, 20.0),
        )
    }

    #[test]
    fn uniform_is_vec4_aligned() {
        assert_eq!(size_of::<BallUniform>(), 6 * 16);
    }

    #[test]
    fn uniform_packs_circles() {
        let f = frame();
        let u = BallUniform::from_frame(&f, Color::WHITE, false);
        assert_eq!(u.ltr[0], f.ltr.circle.center.x);
        assert_eq!(u.ltr[1], f.ltr.circle.center.y);
        assert_eq!(u.ltr[2], f.ltr.circle.radius);
        assert_eq!(u.rtl[2], f.rtl.circle.radius);
        assert_eq!(u.mix_color, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(u.background, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn linear_targets_get_decoded_colors() {
        let f = frame();
        let srgb = BallUniform::from_frame(&f, Color::WHITE, false);
        let linear = BallUniform::from_frame(&f, Color::WHITE, true);
        // Mid-tone channel of color1 (0x40) darkens in linear light
        assert!(linear.ltr_color[1] < srgb.ltr_color[1]);
        assert_eq!(linear.ltr_color[3], srgb.ltr_color[3]);
        assert_eq!(linear.background, srgb.background);
    }
}
