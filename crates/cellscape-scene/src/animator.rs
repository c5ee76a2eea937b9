//! Per-point animation (stateless, computed from time only).

use cellscape_core::{Palette, Rgb};
use glam::Vec3;
use rand::Rng;

/// Per-axis time multipliers for position jitter, chosen so axes drift apart.
const AXIS_RATES: Vec3 = Vec3::new(0.2, 0.25, 0.3);

/// Sinusoidal oscillator with constants fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
}

impl Oscillator {
    pub fn new(frequency: f32, amplitude: f32, phase: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase,
        }
    }

    /// Draw frequency and amplitude from the given ranges and a random phase.
    pub fn random(
        rng: &mut impl Rng,
        frequency: std::ops::Range<f32>,
        amplitude: std::ops::Range<f32>,
    ) -> Self {
        Self {
            frequency: rng.random_range(frequency),
            amplitude: rng.random_range(amplitude),
            phase: random_phase(rng),
        }
    }

    /// `sin(t * frequency + phase)`.
    pub fn wave(&self, t: f32) -> f32 {
        (t * self.frequency + self.phase).sin()
    }

    /// Scale pulse in `[1 - amplitude, 1 + amplitude]`.
    pub fn scale(&self, t: f32) -> f32 {
        1.0 + self.wave(t) * self.amplitude
    }

    /// Small positional jitter; each axis uses its own rate.
    pub fn offset(&self, t: f32, magnitude: f32) -> Vec3 {
        Vec3::new(
            (t * AXIS_RATES.x + self.phase).sin(),
            (t * AXIS_RATES.y + self.phase).sin(),
            (t * AXIS_RATES.z + self.phase).sin(),
        ) * magnitude
    }
}

/// Oscillating blend between a palette entry and the one after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorShift {
    pub color_index: usize,
    pub shift_speed: f32,
    pub phase: f32,
}

impl ColorShift {
    pub fn new(color_index: usize, shift_speed: f32, phase: f32) -> Self {
        Self {
            color_index,
            shift_speed,
            phase,
        }
    }

    /// Blend factor in `[0, 1]`; oscillates rather than progressing.
    pub fn blend(&self, t: f32) -> f32 {
        ((t * self.shift_speed + self.phase).sin() + 1.0) / 2.0
    }

    pub fn color(&self, palette: &Palette, t: f32) -> Rgb {
        let base = palette.get(self.color_index);
        let next = palette.get(palette.next_index(self.color_index));
        base.lerp(next, self.blend(t))
    }
}

/// Which point family a transform belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Core,
    Satellite,
    Floating,
}

/// Transient per-frame values handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointTransform {
    pub kind: PointKind,
    /// World-space position.
    pub position: Vec3,
    /// Base radius of the sphere.
    pub radius: f32,
    pub scale: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub visible: bool,
}

impl PointTransform {
    /// Replace non-finite values so a bad point cannot poison the frame.
    pub fn sanitized(mut self, anchor: Vec3) -> Self {
        if !self.position.is_finite() {
            self.position = anchor;
        }
        if !self.scale.is_finite() {
            self.scale = 1.0;
        }
        if !self.opacity.is_finite() {
            self.visible = false;
            self.opacity = 0.0;
        }
        self
    }
}

pub(crate) fn random_phase(rng: &mut impl Rng) -> f32 {
    rng.random_range(0.0..std::f32::consts::TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_is_deterministic() {
        let osc = Oscillator::new(0.2, 0.02, 1.3);
        assert_eq!(osc.scale(12.5), osc.scale(12.5));
        assert!((osc.scale(0.0) - (1.0 + 1.3f32.sin() * 0.02)).abs() < 1e-6);
    }

    #[test]
    fn test_offset_axes_desynchronize() {
        let osc = Oscillator::new(0.2, 0.02, 0.0);
        let offset = osc.offset(10.0, 0.01);
        assert!(offset.x != offset.y && offset.y != offset.z);
        assert!(offset.abs().max_element() <= 0.01);
    }

    #[test]
    fn test_color_blend_oscillates() {
        let palette = Palette::default();
        let shift = ColorShift::new(4, 1.0, 0.0);
        // sin(π/2) = 1 -> fully next color, which wraps to index 0
        let t = std::f32::consts::FRAC_PI_2;
        assert!((shift.blend(t) - 1.0).abs() < 1e-6);
        let c = shift.color(&palette, t);
        let expected = palette.get(0);
        assert!((c.r - expected.r).abs() < 1e-5);
        // and back towards the base color later
        assert!(shift.blend(3.0 * t) < 1e-6);
    }

    #[test]
    fn test_sanitized_restores_anchor() {
        let anchor = Vec3::new(1.0, 2.0, 3.0);
        let t = PointTransform {
            kind: PointKind::Core,
            position: Vec3::new(f32::NAN, 0.0, 0.0),
            radius: 0.3,
            scale: f32::INFINITY,
            color: Rgb::WHITE,
            opacity: 1.0,
            visible: true,
        }
        .sanitized(anchor);
        assert_eq!(t.position, anchor);
        assert_eq!(t.scale, 1.0);
        assert!(t.visible);
    }
}
