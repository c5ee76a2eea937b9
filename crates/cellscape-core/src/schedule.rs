//! Fixed timing schedules for the scene fade-in and background gradient.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opacity fade-in schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeSchedule {
    /// Delay before the fade starts.
    pub delay_ms: u64,
    /// Interval between opacity steps.
    pub interval_ms: u64,
    /// Opacity set when the fade starts.
    pub initial: f32,
    /// Opacity added on every step.
    pub step: f32,
}

impl FadeSchedule {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    /// A schedule is usable when it starts in range and makes progress.
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.initial) && self.step > 0.0 && self.interval_ms > 0
    }
}

impl Default for FadeSchedule {
    fn default() -> Self {
        Self {
            delay_ms: 300,
            interval_ms: 50,
            initial: 0.01,
            step: 0.05,
        }
    }
}

/// Background gradient rotation schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientSchedule {
    /// Starting angle in degrees.
    pub start_deg: f32,
    /// Degrees added per step.
    pub step_deg: f32,
    pub interval_ms: u64,
}

impl GradientSchedule {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

impl Default for GradientSchedule {
    fn default() -> Self {
        Self {
            start_deg: 45.0,
            step_deg: 0.1,
            interval_ms: 100,
        }
    }
}
