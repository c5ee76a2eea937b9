//! Satellites orbiting the core structure.

use cellscape_core::{Palette, PerformanceTier};
use glam::Vec3;
use rand::Rng;

use crate::animator::{ColorShift, Oscillator, PointKind, PointTransform};
use crate::orbit::{Orbit, OrbitParams, OrbitStep};

/// Satellite radii from largest to smallest.
const SIZES: [f32; 6] = [0.4, 0.3, 0.25, 0.2, 0.15, 0.1];
const SIZES_REDUCED: [f32; 6] = [0.35, 0.25, 0.2, 0.15, 0.12, 0.08];

/// Cumulative percentage buckets for [`SIZES`], weighted towards small ones.
const SIZE_BUCKETS: [u32; 5] = [5, 15, 30, 50, 75];

/// Speed of the palette color drift.
const COLOR_SHIFT_SPEED: f32 = 0.1;

/// Share of satellites that pulse while orbiting.
const PULSE_CHANCE: f64 = 0.33;

pub fn size_table(tier: PerformanceTier) -> &'static [f32; 6] {
    if tier.is_reduced() {
        &SIZES_REDUCED
    } else {
        &SIZES
    }
}

/// Pick a size from the anchor so equal anchors always get equal sizes.
pub fn size_for_anchor(anchor: Vec3, tier: PerformanceTier) -> f32 {
    let key = ((anchor.x * anchor.y * 100.0).round().abs() as u32) % 100;
    let bucket = SIZE_BUCKETS
        .iter()
        .position(|&limit| key < limit)
        .unwrap_or(SIZE_BUCKETS.len());
    size_table(tier)[bucket]
}

/// Palette index derived from the anchor position.
pub fn color_index_for_anchor(anchor: Vec3, palette_len: usize) -> usize {
    ((anchor.x * 100.0 + anchor.y * 50.0).round().abs() as usize) % palette_len.max(1)
}

/// A satellite: fixed anchor and constants plus its orbit state.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    pub anchor: Vec3,
    pub size: f32,
    pub color: ColorShift,
    pub pulse: Option<Oscillator>,
    orbit: Orbit,
}

impl Satellite {
    pub fn new(anchor: Vec3, tier: PerformanceTier, palette_len: usize, rng: &mut impl Rng) -> Self {
        let orbit = Orbit::new(OrbitParams::from_anchor(anchor, tier, rng));
        let should_pulse = rng.random_bool(PULSE_CHANCE);
        let pulse = Oscillator::random(rng, 0.2..0.5, 0.15..0.25);
        Self {
            anchor,
            size: size_for_anchor(anchor, tier),
            // shares the pulse phase
            color: ColorShift::new(
                color_index_for_anchor(anchor, palette_len),
                COLOR_SHIFT_SPEED,
                pulse.phase,
            ),
            pulse: should_pulse.then_some(pulse),
            orbit,
        }
    }

    /// Build a satellite around explicit orbit parameters.
    pub fn with_orbit(anchor: Vec3, size: f32, color: ColorShift, params: OrbitParams) -> Self {
        Self {
            anchor,
            size,
            color,
            pulse: None,
            orbit: Orbit::new(params),
        }
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn is_absorbed(&self) -> bool {
        self.orbit.is_absorbed()
    }

    /// Advance to time `t`. The flag is true only on the step that absorbed
    /// the satellite.
    pub fn step(&mut self, t: f32, palette: &Palette, opacity: f32) -> (PointTransform, bool) {
        let color = self.color.color(palette, t);
        let hidden = PointTransform {
            kind: PointKind::Satellite,
            position: self.anchor,
            radius: self.size,
            scale: 0.0,
            color,
            opacity: 0.0,
            visible: false,
        };

        match self.orbit.advance(t) {
            OrbitStep::Moved { position, scale } => {
                let scale = if self.orbit.params().is_decaying(t) {
                    scale
                } else {
                    self.pulse.map_or(1.0, |pulse| pulse.scale(t))
                };
                let transform = PointTransform {
                    position,
                    scale,
                    opacity,
                    visible: true,
                    ..hidden
                };
                (transform.sanitized(self.anchor), false)
            }
            OrbitStep::Absorbed => (hidden, true),
            OrbitStep::Hidden => (hidden, false),
        }
    }
}
