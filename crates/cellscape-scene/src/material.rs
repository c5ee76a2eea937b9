//! Soft "gooey" surface shading.
//!
//! Each sphere gets a color that drifts with position and time, a fresnel
//! rim towards white, and on richer tiers a key-light shadow and a rim
//! highlight. Surfaces also wobble along their normal.

use cellscape_core::{PerformanceTier, Rgb};
use glam::Vec3;

/// Direction towards the key light, before normalization.
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Shadowed regions fall to this fraction of the surface color.
const SHADOW_TINT: f32 = 0.45;
const SHADOW_POWER: f32 = 0.4;
const SHADOW_MIX: f32 = 0.6;
const HIGHLIGHT_STRENGTH: f32 = 0.15;

/// Shading parameters for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Spatial frequency of the color drift.
    pub gradient_frequency: f32,
    /// Per-channel amplitude of the color drift.
    pub gradient_amplitude: f32,
    /// Time rates of the color drift on r, g, b.
    pub gradient_rates: Vec3,
    pub fresnel_power: f32,
    /// How far the rim blends towards white.
    pub fresnel_mix: f32,
    pub displacement_frequency: f32,
    pub displacement_amplitude: f32,
    /// Wobble along all three axes instead of x and y only.
    pub full_displacement: bool,
    /// Key-light shadow term.
    pub shadows: bool,
    /// Rim highlight from the extra lights.
    pub highlights: bool,
}

impl Material {
    pub fn for_tier(tier: PerformanceTier) -> Self {
        let budget = tier.budget();
        let base = if tier.is_reduced() {
            Self {
                gradient_frequency: 1.5,
                gradient_amplitude: 0.1,
                gradient_rates: Vec3::new(0.4, 0.2, 0.3),
                fresnel_power: 1.6,
                fresnel_mix: 0.5,
                displacement_frequency: 4.0,
                displacement_amplitude: 0.008,
                full_displacement: false,
                shadows: false,
                highlights: false,
            }
        } else {
            Self {
                gradient_frequency: 2.0,
                gradient_amplitude: 0.12,
                gradient_rates: Vec3::new(0.5, 0.3, 0.4),
                fresnel_power: 1.8,
                fresnel_mix: 0.6,
                displacement_frequency: 5.0,
                displacement_amplitude: 0.01,
                full_displacement: true,
                shadows: false,
                highlights: false,
            }
        };
        Self {
            shadows: budget.shadows,
            highlights: budget.extra_lights,
            ..base
        }
    }

    /// Push `position` along `normal` by the surface wobble at time `t`.
    pub fn displace(&self, position: Vec3, normal: Vec3, t: f32, scale: f32) -> Vec3 {
        let f = self.displacement_frequency;
        let mut wave = (position.x * f + t).sin() * (position.y * f + t).sin();
        if self.full_displacement {
            wave *= (position.z * f + t).sin();
        }
        position + normal * (wave * self.displacement_amplitude * scale)
    }

    /// Shade `color` at `position`. `normal` and `view` (surface to eye)
    /// must be unit vectors.
    pub fn shade(&self, color: Rgb, position: Vec3, normal: Vec3, view: Vec3, t: f32) -> Rgb {
        let drift = (position * self.gradient_frequency + self.gradient_rates * t)
            .to_array()
            .map(|phase| phase.sin() * self.gradient_amplitude);
        let gradient = Rgb::new(color.r + drift[0], color.g + drift[1], color.b + drift[2]);

        let facing = view.dot(normal);
        let fresnel = (1.0 - facing.max(0.0)).powf(self.fresnel_power);
        let mut shaded = gradient.lerp(Rgb::WHITE, fresnel * self.fresnel_mix);

        if self.shadows {
            let lit = normal
                .dot(LIGHT_DIRECTION.normalize())
                .max(0.0)
                .powf(SHADOW_POWER);
            shaded = shaded.lerp(gradient.scaled(SHADOW_TINT), (1.0 - lit) * SHADOW_MIX);
        }

        if self.highlights {
            let rim = (1.0 - facing.abs()).powi(2) * HIGHLIGHT_STRENGTH;
            shaded = Rgb::new(shaded.r + rim, shaded.g + rim, shaded.b + rim);
        }

        shaded.clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINK: Rgb = Rgb::new(1.0, 0.82, 0.82);

    fn channels(c: Rgb) -> f32 {
        c.r + c.g + c.b
    }

    #[test]
    fn test_budget_gates_shadow_and_highlight() {
        let low = Material::for_tier(PerformanceTier::Low);
        let medium = Material::for_tier(PerformanceTier::Medium);
        let high = Material::for_tier(PerformanceTier::High);
        assert!(!low.shadows && !low.highlights);
        assert!(!medium.shadows && medium.highlights);
        assert!(high.shadows && high.highlights);
        assert_eq!(low.fresnel_mix, 0.5);
        assert_eq!(high.fresnel_mix, 0.6);
    }

    #[test]
    fn test_shadow_only_darkens_on_shadowed_tier() {
        // same view angle, one normal towards the light and one away from it
        let view = Vec3::Z;
        let towards = Vec3::new(1.0, 0.0, 0.0);
        let away = Vec3::new(-1.0, 0.0, 0.0);
        let p = Vec3::ZERO;

        let low = Material::for_tier(PerformanceTier::Low);
        assert_eq!(
            low.shade(PINK, p, towards, view, 0.0),
            low.shade(PINK, p, away, view, 0.0)
        );

        let high = Material::for_tier(PerformanceTier::High);
        let lit = high.shade(PINK, p, towards, view, 0.0);
        let dark = high.shade(PINK, p, away, view, 0.0);
        assert!(channels(dark) < channels(lit));
    }

    #[test]
    fn test_rim_is_lighter_than_center() {
        let m = Material::for_tier(PerformanceTier::Low);
        let dark = Rgb::new(0.3, 0.3, 0.5);
        let center = m.shade(dark, Vec3::ZERO, Vec3::Z, Vec3::Z, 0.0);
        let rim = m.shade(dark, Vec3::ZERO, Vec3::X, Vec3::Z, 0.0);
        assert!(channels(rim) > channels(center));
    }

    #[test]
    fn test_color_drifts_with_time() {
        let m = Material::for_tier(PerformanceTier::High);
        let p = Vec3::new(0.5, -0.3, 1.2);
        let dark = Rgb::new(0.4, 0.4, 0.4);
        assert_ne!(
            m.shade(dark, p, Vec3::Z, Vec3::Z, 0.0),
            m.shade(dark, p, Vec3::Z, Vec3::Z, 5.0)
        );
    }

    #[test]
    fn test_shade_stays_in_range() {
        for tier in PerformanceTier::ALL {
            let m = Material::for_tier(tier);
            for i in 0..50 {
                let t = i as f32 * 0.7;
                let n = Vec3::new(t.sin(), t.cos(), 0.3).normalize();
                let c = m.shade(Rgb::WHITE, n * 2.0, n, Vec3::Z, t);
                for channel in [c.r, c.g, c.b] {
                    assert!((0.0..=1.0).contains(&channel));
                }
            }
        }
    }

    #[test]
    fn test_displacement_is_small_and_along_normal() {
        let m = Material::for_tier(PerformanceTier::High);
        let p = Vec3::new(0.3, 0.7, -0.2);
        for i in 0..20 {
            let moved = m.displace(p, Vec3::Y, i as f32 * 0.4, 1.0);
            let delta = moved - p;
            assert!(delta.length() <= m.displacement_amplitude + 1e-6);
            assert_eq!(delta.x, 0.0);
            assert_eq!(delta.z, 0.0);
        }
    }
}
