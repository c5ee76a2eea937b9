//! Satellite orbits: stable ellipses and decaying spirals.
//!
//! A satellite is `Orbiting` until a decaying orbit brings it within
//! [`ABSORPTION_DISTANCE`] of the center, at which point it becomes
//! `Absorbed` for good and is no longer drawn.

use std::f32::consts::PI;

use cellscape_core::PerformanceTier;
use glam::Vec3;
use rand::Rng;

/// Orbital distance below which a decaying satellite is absorbed.
pub const ABSORPTION_DISTANCE: f32 = 0.3;

/// Vertical wobble as a fraction of the orbital distance.
const INCLINATION_WOBBLE: f32 = 0.2;

/// Exponential decay applied after `start` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    pub start: f32,
    pub rate: f32,
}

/// Orbit constants, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub initial_distance: f32,
    pub start_angle: f32,
    pub speed: f32,
    /// `1.0` or `-1.0`.
    pub direction: f32,
    pub eccentricity: f32,
    pub inclination: f32,
    pub plane_tilt_x: f32,
    pub plane_tilt_y: f32,
    pub z_plane_offset: f32,
    pub decay: Option<Decay>,
}

impl OrbitParams {
    /// Derive orbit constants for a satellite anchored at `anchor`.
    pub fn from_anchor(anchor: Vec3, tier: PerformanceTier, rng: &mut impl Rng) -> Self {
        let reduced = tier.is_reduced();
        let decay_chance = if reduced { 0.05 } else { 0.08 };
        let has_decay = rng.random_bool(decay_chance);
        let decay = Decay {
            start: rng.random_range(5.0..35.0),
            rate: rng.random_range(0.05..0.15),
        };

        let plane_key = ((anchor.x * 100.0 + anchor.y * 50.0).abs() % 20.0) - 10.0;
        let speed_factor = if reduced { 0.8 } else { 1.0 };
        let max_eccentricity = if reduced { 0.15 } else { 0.2 };
        let max_inclination = PI * if reduced { 0.08 } else { 0.1 };
        let max_tilt = if reduced { 0.25 } else { 0.3 };
        let z_scale = if reduced { 0.25 } else { 0.3 };

        Self {
            initial_distance: anchor.truncate().length(),
            start_angle: anchor.y.atan2(anchor.x),
            speed: rng.random_range(0.05..0.2) * speed_factor,
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            eccentricity: rng.random_range(0.0..max_eccentricity),
            inclination: rng.random_range(0.0..max_inclination),
            plane_tilt_x: rng.random_range(0.0..max_tilt),
            plane_tilt_y: rng.random_range(0.0..max_tilt),
            z_plane_offset: plane_key * z_scale,
            decay: has_decay.then_some(decay),
        }
    }

    /// Angle along the orbit at time `t`.
    pub fn angle(&self, t: f32) -> f32 {
        self.start_angle + t * self.speed * self.direction
    }

    /// Fraction of the initial distance remaining at time `t`.
    pub fn decay_factor(&self, t: f32) -> f32 {
        match self.decay {
            Some(decay) if t > decay.start => (-(t - decay.start) * decay.rate).exp(),
            _ => 1.0,
        }
    }

    /// Orbital distance at time `t`, before the eccentricity wobble.
    pub fn distance(&self, t: f32) -> f32 {
        self.initial_distance * self.decay_factor(t)
    }

    pub fn is_decaying(&self, t: f32) -> bool {
        self.decay.is_some_and(|decay| t > decay.start)
    }

    /// World position at time `t`.
    pub fn position(&self, t: f32) -> Vec3 {
        self.position_at(self.angle(t), self.distance(t))
    }

    fn position_at(&self, angle: f32, distance: f32) -> Vec3 {
        let (sin_a, cos_a) = angle.sin_cos();
        let base_x = cos_a * distance * (1.0 + self.eccentricity * sin_a);
        let base_y = sin_a * distance * (1.0 + self.eccentricity * cos_a);

        let (sin_tx, cos_tx) = self.plane_tilt_x.sin_cos();
        let (sin_ty, cos_ty) = self.plane_tilt_y.sin_cos();
        let x = base_x * cos_ty - base_y * sin_tx * sin_ty;
        let y = base_x * sin_ty * sin_tx + base_y * cos_tx;
        let z = self.z_plane_offset
            + (angle + self.inclination).sin() * INCLINATION_WOBBLE * distance;
        Vec3::new(x, y, z)
    }
}

/// Lifecycle of a satellite orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitState {
    #[default]
    Orbiting,
    Absorbed,
}

/// Result of advancing an orbit to a new time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitStep {
    /// Still orbiting; `scale` shrinks while decaying.
    Moved { position: Vec3, scale: f32 },
    /// Crossed the absorption threshold on this step.
    Absorbed,
    /// Already absorbed on an earlier step.
    Hidden,
}

/// Orbit parameters plus the single piece of mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    params: OrbitParams,
    state: OrbitState,
}

impl Orbit {
    pub fn new(params: OrbitParams) -> Self {
        Self {
            params,
            state: OrbitState::Orbiting,
        }
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    pub fn state(&self) -> OrbitState {
        self.state
    }

    pub fn is_absorbed(&self) -> bool {
        self.state == OrbitState::Absorbed
    }

    /// Evaluate the orbit at time `t`, absorbing the satellite the first time
    /// its distance falls below [`ABSORPTION_DISTANCE`].
    pub fn advance(&mut self, t: f32) -> OrbitStep {
        if self.is_absorbed() {
            return OrbitStep::Hidden;
        }

        let factor = self.params.decay_factor(t);
        let distance = self.params.initial_distance * factor;
        if self.params.is_decaying(t) && distance < ABSORPTION_DISTANCE {
            self.state = OrbitState::Absorbed;
            return OrbitStep::Absorbed;
        }

        OrbitStep::Moved {
            position: self.params.position_at(self.params.angle(t), distance),
            scale: factor.max(0.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circular(distance: f32, decay: Option<Decay>) -> OrbitParams {
        OrbitParams {
            initial_distance: distance,
            start_angle: 0.0,
            speed: 0.1,
            direction: 1.0,
            eccentricity: 0.0,
            inclination: 0.0,
            plane_tilt_x: 0.0,
            plane_tilt_y: 0.0,
            z_plane_offset: 0.0,
            decay,
        }
    }

    #[test]
    fn test_untilted_circle_stays_on_radius() {
        let params = circular(5.0, None);
        for step in 0..100 {
            let t = step as f32 * 0.7;
            let p = params.position(t);
            assert!((p.truncate().length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_direction_reverses_angle() {
        let mut params = circular(5.0, None);
        let forward = params.angle(10.0);
        params.direction = -1.0;
        assert!((params.angle(10.0) + forward).abs() < 1e-6);
    }

    #[test]
    fn test_decay_factor_before_start_is_one() {
        let params = circular(5.0, Some(Decay { start: 5.0, rate: 0.1 }));
        assert_eq!(params.decay_factor(0.0), 1.0);
        assert_eq!(params.decay_factor(5.0), 1.0);
        assert!(params.decay_factor(6.0) < 1.0);
    }

    #[test]
    fn test_absorption_is_terminal() {
        let mut orbit = Orbit::new(circular(1.0, Some(Decay { start: 0.0, rate: 1.0 })));
        assert!(matches!(orbit.advance(0.5), OrbitStep::Moved { .. }));
        assert_eq!(orbit.advance(2.0), OrbitStep::Absorbed);
        assert_eq!(orbit.advance(2.1), OrbitStep::Hidden);
        // Going back in time does not revive it
        assert_eq!(orbit.advance(0.0), OrbitStep::Hidden);
        assert_eq!(orbit.state(), OrbitState::Absorbed);
    }

    #[test]
    fn test_decaying_scale_floor() {
        let mut orbit = Orbit::new(circular(100.0, Some(Decay { start: 0.0, rate: 1.0 })));
        match orbit.advance(5.0) {
            OrbitStep::Moved { scale, .. } => assert_eq!(scale, 0.1),
            other => panic!("unexpected step {other:?}"),
        }
    }
}
