//! Gradients with arithmetic color stops.
//!
//! A gradient maps a normalized parameter `t` in `0.0..=1.0` to a color by
//! linearly interpolating between its two neighbouring [`ColorStop`]s. Stops
//! are kept sorted by offset; before the first stop the first color applies,
//! after the last stop the last color applies.

use crate::color::{ColorStop, Rgba};
use glam::{Mat2, Vec2};

/// Sample a sorted stop list at `t`.
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

fn insert_sorted(stops: &mut Vec<ColorStop>, stop: ColorStop) {
    let index = stops.partition_point(|s| s.offset <= stop.offset);
    stops.insert(index, stop);
}

/// Radial gradient, optionally squashed into a rotated ellipse.
///
/// `t` is the distance from `center` divided by `radius`, measured in the
/// gradient's local frame (rotated by `rotation`, axes scaled by `scale`).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    /// Axis scale of the ellipse; `Vec2::ONE` is a circle.
    pub scale: Vec2,
    pub rotation: f32,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            scale: Vec2::ONE,
            rotation: 0.0,
            stops: Vec::new(),
        }
    }

    /// Add a color stop. Stops may be added in any order.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        insert_sorted(&mut self.stops, ColorStop::new(offset, color));
        self
    }

    /// Turn the circle into an ellipse with the given axis scale and rotation.
    pub fn with_ellipse(mut self, scale: Vec2, rotation: f32) -> Self {
        self.scale = scale;
        self.rotation = rotation;
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Normalized distance of `point` from the center.
    pub fn param_at(&self, point: Vec2) -> f32 {
        if self.radius <= 0.0 {
            return f32::INFINITY;
        }
        let local = Mat2::from_angle(-self.rotation) * (point - self.center);
        let scale = self.scale.max(Vec2::splat(f32::EPSILON));
        (local / scale).length() / self.radius
    }

    /// Color at `point`; transparent outside the gradient's extent.
    pub fn color_at(&self, point: Vec2) -> Rgba {
        let t = self.param_at(point);
        if t > 1.0 {
            return Rgba::TRANSPARENT;
        }
        sample_stops(&self.stops, t)
    }

    /// Axis-aligned box enclosing the painted area, as (min, max).
    pub fn extent(&self) -> (Vec2, Vec2) {
        let reach = self.radius * self.scale.max_element().max(0.0);
        (self.center - Vec2::splat(reach), self.center + Vec2::splat(reach))
    }
}

/// Vertical gradient running from `top` to `bottom` (y coordinates).
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub top: f32,
    pub bottom: f32,
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn vertical(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        insert_sorted(&mut self.stops, ColorStop::new(offset, color));
        self
    }

    pub fn with_stops(mut self, stops: &[ColorStop]) -> Self {
        for stop in stops {
            insert_sorted(&mut self.stops, *stop);
        }
        self
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color on row `y`.
    pub fn color_at(&self, y: f32) -> Rgba {
        let span = self.bottom - self.top;
        let t = if span.abs() <= f32::EPSILON {
            0.0
        } else {
            (y - self.top) / span
        };
        sample_stops(&self.stops, t.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);

    #[test]
    fn test_sample_midpoint() {
        let stops = [ColorStop::new(0.0, RED), ColorStop::new(1.0, BLUE)];
        let mid = sample_stops(&stops, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_clamps_outside_stops() {
        let stops = [ColorStop::new(0.25, RED), ColorStop::new(0.75, BLUE)];
        assert_eq!(sample_stops(&stops, 0.0), RED);
        assert_eq!(sample_stops(&stops, 1.0), BLUE);
        assert_eq!(sample_stops(&[], 0.5), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_stops_sorted_on_insert() {
        let g = RadialGradient::new(Vec2::ZERO, 10.0)
            .with_stop(1.0, BLUE)
            .with_stop(0.0, RED);
        assert_eq!(g.stops()[0].color, RED);
        assert_eq!(g.stops()[1].color, BLUE);
    }

    #[test]
    fn test_radial_alpha_falloff() {
        let g = RadialGradient::new(Vec2::new(10.0, 10.0), 10.0)
            .with_stop(0.0, RED)
            .with_stop(1.0, RED.with_alpha(0.0));
        assert_eq!(g.color_at(Vec2::new(10.0, 10.0)).a, 1.0);
        assert!((g.color_at(Vec2::new(15.0, 10.0)).a - 0.5).abs() < 1e-5);
        assert_eq!(g.color_at(Vec2::new(25.0, 10.0)), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_rotated_ellipse() {
        // Wide along local x; rotated 90 degrees it becomes tall.
        let g = RadialGradient::new(Vec2::ZERO, 10.0)
            .with_ellipse(Vec2::new(2.0, 1.0), FRAC_PI_2)
            .with_stop(0.0, RED)
            .with_stop(1.0, RED);
        assert!((g.param_at(Vec2::new(0.0, 20.0)) - 1.0).abs() < 1e-4);
        assert!((g.param_at(Vec2::new(10.0, 0.0)) - 1.0).abs() < 1e-4);
        let (min, max) = g.extent();
        assert_eq!(min, Vec2::splat(-20.0));
        assert_eq!(max, Vec2::splat(20.0));
    }

    #[test]
    fn test_linear_vertical() {
        let g = LinearGradient::vertical(0.0, 100.0)
            .with_stop(0.0, RED)
            .with_stop(1.0, BLUE);
        assert_eq!(g.color_at(-10.0), RED);
        assert!((g.color_at(50.0).r - 0.5).abs() < 1e-6);
        assert_eq!(g.color_at(200.0), BLUE);
    }
}
