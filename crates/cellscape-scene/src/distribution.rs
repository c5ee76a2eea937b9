//! Point distribution for the core structure and the satellite field.
//!
//! The core structure is a golden-angle (Fibonacci) sphere: point `i` of `n`
//! sits at polar angle `acos(1 - 2i/n)` and azimuth `2π i φ⁻¹`, which spreads
//! points near-uniformly without clustering at the poles. Satellites are drawn
//! from weighted regions around the structure and then pushed out of it.

use std::f32::consts::TAU;

use cellscape_core::PerformanceTier;
use glam::Vec3;
use rand::Rng;

use crate::animator::{ColorShift, Oscillator, random_phase};

/// Golden ratio conjugate, `(√5 - 1) / 2`.
pub const GOLDEN_RATIO_CONJUGATE: f32 = 0.618_034;

/// Subsurface layer depth as a fraction of the structure radius.
pub const SUBSURFACE_DEPTH: f32 = 0.85;

/// Satellites never start closer than this to the origin.
pub const MIN_SATELLITE_DISTANCE: f32 = 3.5;

/// Which shell of the core structure a point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Surface,
    Subsurface,
}

/// A point of the core structure. Everything here is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CorePoint {
    pub anchor: Vec3,
    pub radius: f32,
    pub layer: Layer,
    pub motion: Oscillator,
    pub color: ColorShift,
}

/// Multiplicative per-axis jitter applied to surface points.
pub fn surface_jitter(tier: PerformanceTier) -> f32 {
    if tier.is_reduced() { 0.015 } else { 0.02 }
}

/// Unit-sphere position of point `index` out of `count`.
pub fn fibonacci_point(index: usize, count: usize) -> Vec3 {
    let n = count.max(1) as f32;
    let i = index as f32;
    let phi = (1.0 - 2.0 * i / n).clamp(-1.0, 1.0).acos();
    let theta = TAU * ((i * GOLDEN_RATIO_CONJUGATE).fract());
    Vec3::new(theta.cos() * phi.sin(), theta.sin() * phi.sin(), phi.cos())
}

/// Generate one shell of the core structure.
///
/// `color_offset` continues palette indexing across layers so the subsurface
/// layer does not restart at the first color.
pub fn sphere_layer(
    count: usize,
    radius: f32,
    layer: Layer,
    tier: PerformanceTier,
    palette_len: usize,
    color_offset: usize,
    rng: &mut impl Rng,
) -> Vec<CorePoint> {
    let jitter = surface_jitter(tier);
    let (size_min, size_span) = if tier.is_reduced() {
        (0.10, 0.12)
    } else {
        (0.12, 0.15)
    };
    let amplitude = if tier.is_reduced() { 0.015 } else { 0.02 };
    let palette_len = palette_len.max(1);

    (0..count)
        .map(|i| {
            let unit = fibonacci_point(i, count);
            let anchor = match layer {
                Layer::Surface => {
                    let mut axis_jitter = || 1.0 - jitter + rng.random::<f32>() * jitter * 2.0;
                    let k = Vec3::new(axis_jitter(), axis_jitter(), axis_jitter());
                    unit * radius * k
                }
                Layer::Subsurface => unit * radius * SUBSURFACE_DEPTH,
            };
            let size = (size_min + rng.random::<f32>() * size_span) * radius;
            let phase = random_phase(rng);
            let frequency = rng.random_range(0.15..0.25);
            CorePoint {
                anchor,
                radius: size,
                layer,
                motion: Oscillator::new(frequency, amplitude, phase),
                color: ColorShift::new(
                    (color_offset + i) % palette_len,
                    rng.random_range(0.1..0.15),
                    phase,
                ),
            }
        })
        .collect()
}

/// Generate the surface and subsurface layers for `tier`.
pub fn core_structure(
    tier: PerformanceTier,
    palette_len: usize,
    rng: &mut impl Rng,
) -> Vec<CorePoint> {
    let budget = tier.budget();
    let radius = tier.structure_radius();
    let mut points = sphere_layer(
        budget.core_points,
        radius,
        Layer::Surface,
        tier,
        palette_len,
        0,
        rng,
    );
    points.extend(sphere_layer(
        budget.subsurface_points,
        radius,
        Layer::Subsurface,
        tier,
        palette_len,
        budget.core_points,
        rng,
    ));
    points
}

/// Sample `count` satellite anchors on the `z = 0` plane.
///
/// Regions: 30% left band, 30% right band, 15% bottom band, 25% ring around
/// the structure.
pub fn satellite_anchors(count: usize, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let region: f32 = rng.random();
            let (x, y) = if region < 0.3 {
                (rng.random_range(-12.0..-5.0), rng.random_range(-8.0..8.0))
            } else if region < 0.6 {
                (rng.random_range(5.0..12.0), rng.random_range(-8.0..8.0))
            } else if region < 0.75 {
                (rng.random_range(-5.0..5.0), rng.random_range(-8.0..-4.0))
            } else {
                let angle = rng.random_range(0.0..TAU);
                let distance = rng.random_range(MIN_SATELLITE_DISTANCE..5.0);
                (angle.cos() * distance, angle.sin() * distance)
            };
            repel_from_core(Vec3::new(x, y, 0.0))
        })
        .collect()
}

/// Push a point closer than [`MIN_SATELLITE_DISTANCE`] out to exactly that
/// distance along its own direction.
pub fn repel_from_core(point: Vec3) -> Vec3 {
    let distance = point.length();
    if distance >= MIN_SATELLITE_DISTANCE {
        point
    } else if distance <= f32::EPSILON {
        Vec3::X * MIN_SATELLITE_DISTANCE
    } else {
        point * (MIN_SATELLITE_DISTANCE / distance)
    }
}
