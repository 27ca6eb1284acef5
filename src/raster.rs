//! Drawing surfaces.
//!
//! [`Surface`] is the small set of drawing primitives the compositor needs.
//! [`Raster`] implements it on the CPU: a premultiplied RGBA float buffer,
//! painted per pixel center, with either source-over or additive blending.
//!
//! Hosts that own a real drawing context implement [`Surface`] themselves;
//! tests use recording doubles.

use crate::color::Rgba;
use crate::gradient::{LinearGradient, RadialGradient};
use glam::{Vec2, Vec4};

/// How a fill combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard source-over alpha compositing (default).
    #[default]
    Alpha,
    /// Colors are added and saturate, for glows.
    Additive,
}

/// A 2D drawing target the compositor paints into.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Change the surface size. Contents are discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Paint a vertical gradient over the whole surface.
    fn fill_linear(&mut self, gradient: &LinearGradient);

    /// Paint a radial gradient over its extent.
    fn fill_radial(&mut self, gradient: &RadialGradient, blend: BlendMode);

    /// Paint a solid anti-aliased disc.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, blend: BlendMode);
}

/// CPU raster of premultiplied RGBA pixels.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    /// Premultiplied pixel rows, top to bottom.
    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    /// Premultiplied pixel at (x, y), or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Vec4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Straight-alpha color at (x, y).
    pub fn color(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixel(x, y).map(unpremultiply)
    }

    /// Straight-alpha 8-bit RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|&p| {
                let c = unpremultiply(p);
                [to_u8(c.r), to_u8(c.g), to_u8(c.b), to_u8(c.a)]
            })
            .collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel range covering `min..max`, clipped to the raster.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    #[inline]
    fn blend_at(&mut self, x: u32, y: u32, src: Vec4, blend: BlendMode) {
        if src.w <= 0.0 && blend == BlendMode::Alpha {
            return;
        }
        let index = self.index(x, y);
        let dst = self.pixels[index];
        self.pixels[index] = match blend {
            BlendMode::Alpha => src + dst * (1.0 - src.w),
            BlendMode::Additive => (src + dst).min(Vec4::ONE),
        };
    }
}

impl Surface for Raster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Vec4::ZERO);
    }

    fn clear(&mut self) {
        self.pixels.fill(Vec4::ZERO);
    }

    fn fill_linear(&mut self, gradient: &LinearGradient) {
        for y in 0..self.height {
            let src = gradient.color_at(y as f32 + 0.5).premultiplied();
            for x in 0..self.width {
                self.blend_at(x, y, src, BlendMode::Alpha);
            }
        }
    }

    fn fill_radial(&mut self, gradient: &RadialGradient, blend: BlendMode) {
        let (min, max) = gradient.extent();
        let Some((x0, y0, x1, y1)) = self.clip(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let point = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let src = gradient.color_at(point).premultiplied();
                self.blend_at(x, y, src, blend);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, blend: BlendMode) {
        if radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - reach, center + reach) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let point = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                // One-pixel soft edge.
                let coverage = (radius + 0.5 - point.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_at(x, y, color.fade(coverage).premultiplied(), blend);
                }
            }
        }
    }
}

#[inline]
fn unpremultiply(p: Vec4) -> Rgba {
    if p.w <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    Rgba::new(
        (p.x / p.w).clamp(0.0, 1.0),
        (p.y / p.w).clamp(0.0, 1.0),
        (p.z / p.w).clamp(0.0, 1.0),
        p.w.clamp(0.0, 1.0),
    )
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
