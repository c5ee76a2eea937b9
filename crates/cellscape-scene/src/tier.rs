//! Device capability tier selection.

use cellscape_core::{EnvSignals, PerformanceTier};

/// Viewports wider than this always get the high tier.
pub const WIDE_VIEWPORT_PX: u32 = 768;

/// Strategy mapping environment signals to a performance tier.
pub trait TierStrategy: std::fmt::Debug {
    fn estimate_tier(&self, env: &EnvSignals) -> PerformanceTier;
}

/// Heuristic classification from viewport width, cores, pointer type and the
/// allocation benchmark. Runs once at start and again on resize; it never
/// looks at measured frame times.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicTierSelector {
    pub low_benchmark_ms: f64,
    pub medium_benchmark_ms: f64,
}

impl Default for HeuristicTierSelector {
    fn default() -> Self {
        Self {
            low_benchmark_ms: 5.0,
            medium_benchmark_ms: 2.0,
        }
    }
}

impl TierStrategy for HeuristicTierSelector {
    fn estimate_tier(&self, env: &EnvSignals) -> PerformanceTier {
        if env.viewport_width > WIDE_VIEWPORT_PX {
            return PerformanceTier::High;
        }

        let cores = env.cores;
        if cores <= 4
            || env.benchmark_ms > self.low_benchmark_ms
            || (env.coarse_pointer && cores <= 6)
        {
            PerformanceTier::Low
        } else if cores <= 6 || env.benchmark_ms > self.medium_benchmark_ms {
            PerformanceTier::Medium
        } else {
            PerformanceTier::High
        }
    }
}

/// Always returns the same tier; used when the tier is forced by the user.
#[derive(Debug, Clone, Copy)]
pub struct FixedTier(pub PerformanceTier);

impl TierStrategy for FixedTier {
    fn estimate_tier(&self, _env: &EnvSignals) -> PerformanceTier {
        self.0
    }
}
