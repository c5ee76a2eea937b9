//! Performance tiers and the workload budget attached to each one.

use serde::{Deserialize, Serialize};

/// Coarse device capability classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    #[default]
    High,
}

impl PerformanceTier {
    pub const ALL: [PerformanceTier; 3] = [Self::Low, Self::Medium, Self::High];

    /// Static budget for this tier.
    pub fn budget(self) -> TierBudget {
        match self {
            Self::Low => TierBudget {
                core_points: 150,
                subsurface_points: 50,
                satellites: 0,
                floating_spheres: 8,
                segments: 8,
                cadence: RenderCadence::Demand,
                shadows: false,
                extra_lights: false,
                max_dpr: 1.0,
                animation_stride: 3,
            },
            Self::Medium => TierBudget {
                core_points: 250,
                subsurface_points: 100,
                satellites: 60,
                floating_spheres: 8,
                segments: 12,
                cadence: RenderCadence::Always,
                shadows: false,
                extra_lights: true,
                max_dpr: 1.5,
                animation_stride: 2,
            },
            Self::High => TierBudget {
                core_points: 400,
                subsurface_points: 150,
                satellites: 225,
                floating_spheres: 0,
                segments: 32,
                cadence: RenderCadence::Always,
                shadows: true,
                extra_lights: true,
                max_dpr: 2.0,
                animation_stride: 1,
            },
        }
    }

    /// Low and medium tiers share the lighter "reduced" parameter set.
    pub fn is_reduced(self) -> bool {
        self != Self::High
    }

    /// Radius of the core structure.
    pub fn structure_radius(self) -> f32 {
        if self.is_reduced() { 1.8 } else { 2.2 }
    }

    /// Cycle to the next tier.
    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }

    /// Get the display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// When the host should redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCadence {
    /// Redraw only when a tracked input changed.
    Demand,
    /// Redraw on every animation frame.
    Always,
}

/// Fixed resource budget for a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierBudget {
    /// Points on the core structure surface.
    pub core_points: usize,
    /// Points on the inner layer at 85% of the radius.
    pub subsurface_points: usize,
    /// Orbiting satellites.
    pub satellites: usize,
    /// Free-floating spheres above and below the structure.
    pub floating_spheres: usize,
    /// Sphere geometry subdivision.
    pub segments: u32,
    pub cadence: RenderCadence,
    pub shadows: bool,
    pub extra_lights: bool,
    /// Device pixel ratio ceiling.
    pub max_dpr: f32,
    /// Per-point animation runs on every Nth tick.
    pub animation_stride: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budgets_scale_with_tier() {
        let [low, medium, high] = PerformanceTier::ALL.map(PerformanceTier::budget);
        assert!(low.core_points < medium.core_points);
        assert!(medium.core_points < high.core_points);
        assert_eq!(high.core_points, 400);
        assert_eq!(low.segments, 8);
        assert_eq!(medium.segments, 12);
        assert_eq!(high.segments, 32);
        assert_eq!(low.cadence, RenderCadence::Demand);
        assert_eq!(high.cadence, RenderCadence::Always);
        assert!(high.shadows && !medium.shadows && !low.shadows);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut tier = PerformanceTier::Low;
        for _ in 0..3 {
            tier = tier.next();
        }
        assert_eq!(tier, PerformanceTier::Low);
    }

    #[test]
    fn test_reduced_tiers() {
        assert!(PerformanceTier::Low.is_reduced());
        assert!(PerformanceTier::Medium.is_reduced());
        assert!(!PerformanceTier::High.is_reduced());
        assert_eq!(PerformanceTier::High.structure_radius(), 2.2);
    }
}
