use std::convert::Infallible;

use glam::Vec2;

use super::{FrameDescriptor, RenderAdapter};
use crate::color::Color;

/// CPU pixel buffer that paints frames by point sampling.
///
/// Each pixel is tested at its center, with no anti-aliasing. Useful for
/// headless hosts, snapshots and tests.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: Color,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Canvas of `width` x `height` pixels cleared to `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row-major pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Resize, clearing to the background.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(width as usize * height as usize, self.background);
    }
}

impl RenderAdapter for Canvas {
    type Error = Infallible;

    fn surface_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn draw_frame(&mut self, frame: &FrameDescriptor) -> Result<(), Infallible> {
        let width = self.width as usize;
        for (i, pixel) in self.pixels.iter_mut().enumerate() {
            let p = Vec2::new((i % width) as f32 + 0.5, (i / width) as f32 + 0.5);
            let mut color = self.background;
            if frame.ltr.circle.contains(p) {
                color = blend_over(frame.ltr.color, color);
            }
            if frame.rtl.circle.contains(p) {
                color = blend_over(frame.rtl.color, color);
            }
            if frame.overlap.contains(p) {
                color = blend_over(frame.mix_color, color);
            }
            *pixel = color;
        }
        Ok(())
    }
}

/// Source-over compositing of straight-alpha colors.
fn blend_over(src: Color, dst: Color) -> Color {
    match src.alpha() {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    let sa = f32::from(src.alpha()) / 255.0;
    let da = f32::from(dst.alpha()) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let s = f32::from(s) / 255.0;
        let d = f32::from(d) / 255.0;
        let c = (s * sa + d * da * (1.0 - sa)) / out_a;
        (c * 255.0).round() as u8
    };
    Color::from_argb(
        (out_a * 255.0).round() as u8,
        channel(src.red(), dst.red()),
        channel(src.green(), dst.green()),
        channel(src.blue(), dst.blue()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute_frame, Direction};
    use crate::options::{BallConfig, TimingConfig};
    use crate::render::paint;
    use crate::view::LoadingView;

    const BG: Color = Color::WHITE;

    fn balls() -> BallConfig {
        BallConfig {
            radius1: 10.0,
            radius2: 10.0,
            gap: 4.0,
            ..BallConfig::default()
        }
    }

    #[test]
    fn rest_frame_paints_two_separate_balls() {
        let mut canvas = Canvas::new(60, 40, BG);
        let view = LoadingView::new(balls(), TimingConfig::default());
        paint(&view, &mut canvas).unwrap();

        // Centers at 30 ∓ 12, y = 20; ball one on the left
        assert_eq!(canvas.pixel(18, 20), Some(view.color1()));
        assert_eq!(canvas.pixel(42, 20), Some(view.color2()));
        assert_eq!(canvas.pixel(30, 20), Some(BG));
        assert_eq!(canvas.pixel(0, 0), Some(BG));
        assert_eq!(canvas.pixel(60, 0), None);
    }

    #[test]
    fn overlap_is_painted_in_mix_color() {
        let mut canvas = Canvas::new(60, 40, BG);
        let cfg = balls();
        let frame = compute_frame(
            0.4,
            Direction::Ltr,
            &cfg,
            &TimingConfig::default(),
            canvas.surface_size(),
        );
        canvas.draw_frame(&frame).unwrap();

        let covered = canvas
            .pixels()
            .iter()
            .filter(|&&c| c == cfg.mix_color)
            .count();
        assert!(covered > 0);
        // Sample the middle of the overlap
        let (min, max) = frame.overlap.bounds().unwrap();
        let mid = (min + max) * 0.5;
        assert_eq!(
            canvas.pixel(mid.x as u32, mid.y as u32),
            Some(cfg.mix_color)
        );
    }

    #[test]
    fn translucent_fill_blends_with_background() {
        let half_black = Color::from_argb(128, 0, 0, 0);
        let out = blend_over(half_black, Color::WHITE);
        assert_eq!(out.alpha(), 255);
        assert!((i32::from(out.red()) - 127).abs() <= 1);
        assert_eq!(blend_over(Color::TRANSPARENT, Color::WHITE), Color::WHITE);
        assert_eq!(blend_over(Color::BLACK, Color::WHITE), Color::BLACK);
    }

    #[test]
    fn resize_clears() {
        let mut canvas = Canvas::new(2, 2, BG);
        canvas.resize(3, 1);
        assert_eq!(canvas.pixels().len(), 3);
        assert_eq!(canvas.surface_size(), Vec2::new(3.0, 1.0));
    }
}
