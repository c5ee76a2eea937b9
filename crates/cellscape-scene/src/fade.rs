//! Scene fade-in and background gradient rotation.

use cellscape_core::{FadeSchedule, GradientSchedule};

/// Shared scene opacity. Monotonic, clamped to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityRamp {
    value: f32,
    schedule: FadeSchedule,
}

impl OpacityRamp {
    pub fn new(schedule: FadeSchedule) -> Self {
        Self {
            value: 0.0,
            schedule,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.value >= 1.0
    }

    /// Jump to the initial opacity when the fade starts.
    pub fn begin(&mut self) {
        self.value = self.value.max(self.schedule.initial.clamp(0.0, 1.0));
    }

    /// Apply one increment; returns true once the ramp reached 1.0.
    pub fn step(&mut self) -> bool {
        let next = self.value + self.schedule.step.max(0.0);
        self.value = if next >= 1.0 { 1.0 } else { next };
        self.is_complete()
    }
}

/// Angle of the background gradient, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientRotation {
    angle: f32,
    step: f32,
}

impl GradientRotation {
    pub fn new(schedule: GradientSchedule) -> Self {
        Self {
            angle: schedule.start_deg.rem_euclid(360.0),
            step: schedule.step_deg,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self) {
        self.angle = (self.angle + self.step).rem_euclid(360.0);
    }
}
