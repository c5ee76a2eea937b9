//! Free-floating spheres shown above and below the structure on reduced tiers.

use std::f32::consts::TAU;

use cellscape_core::Palette;
use glam::Vec3;
use rand::Rng;

use crate::animator::{ColorShift, PointKind, PointTransform, random_phase};

/// Relative drift rate per axis.
const AXIS_RATES: Vec3 = Vec3::new(1.0, 0.7, 0.5);

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingSphere {
    pub anchor: Vec3,
    pub size: f32,
    pub speed: f32,
    pub amplitude: f32,
    /// Independent phase per axis.
    pub phases: Vec3,
    pub color: ColorShift,
}

impl FloatingSphere {
    pub fn new(anchor: Vec3, palette_len: usize, rng: &mut impl Rng) -> Self {
        Self {
            anchor,
            speed: rng.random_range(0.3..0.5),
            amplitude: rng.random_range(0.15..0.25),
            phases: Vec3::new(random_phase(rng), random_phase(rng), random_phase(rng)),
            size: rng.random_range(0.15..0.3),
            color: ColorShift::new(
                rng.random_range(0..palette_len.max(1)),
                rng.random_range(0.1..0.15),
                random_phase(rng),
            ),
        }
    }

    pub fn position(&self, t: f32) -> Vec3 {
        let arg = AXIS_RATES * (t * self.speed) + self.phases;
        self.anchor + Vec3::new(arg.x.sin(), arg.y.sin(), arg.z.sin()) * self.amplitude
    }

    pub fn transform(&self, t: f32, palette: &Palette, opacity: f32) -> PointTransform {
        PointTransform {
            kind: PointKind::Floating,
            position: self.position(t),
            radius: self.size,
            scale: 1.0,
            color: self.color.color(palette, t),
            opacity,
            visible: true,
        }
        .sanitized(self.anchor)
    }
}

/// Spread `count` spheres over two rings, half above and half below the
/// structure.
pub fn floating_spheres(count: usize, palette_len: usize, rng: &mut impl Rng) -> Vec<FloatingSphere> {
    let per_ring = count.div_ceil(2).max(1);
    (0..count)
        .map(|i| {
            let above = i < per_ring;
            let slot = i % per_ring;
            let angle = slot as f32 / per_ring as f32 * TAU;
            let radius = rng.random_range(1.0..1.5);
            let lift = rng.random_range(3.0..3.5);
            let y = if above { lift } else { -lift };
            let anchor = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);
            FloatingSphere::new(anchor, palette_len, rng)
        })
        .collect()
}
