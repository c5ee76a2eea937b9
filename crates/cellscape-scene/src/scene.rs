//! Generated point arena for one tier.

use cellscape_core::{PerformanceTier, TierBudget};
use rand::Rng;

use crate::distribution::{CorePoint, Layer, core_structure, satellite_anchors};
use crate::floating::{FloatingSphere, floating_spheres};
use crate::satellite::Satellite;

/// All points of a scene. Anchors and constants are fixed; only satellite
/// absorption state changes after generation.
#[derive(Debug, Clone)]
pub struct Scene {
    pub tier: PerformanceTier,
    pub budget: TierBudget,
    pub core: Vec<CorePoint>,
    pub satellites: Vec<Satellite>,
    pub floating: Vec<FloatingSphere>,
}

impl Scene {
    /// Generate every point for `tier` from `rng`.
    pub fn generate(tier: PerformanceTier, palette_len: usize, rng: &mut impl Rng) -> Self {
        let budget = tier.budget();
        let core = core_structure(tier, palette_len, rng);
        let satellites = satellite_anchors(budget.satellites, rng)
            .into_iter()
            .map(|anchor| Satellite::new(anchor, tier, palette_len, rng))
            .collect();
        let floating = floating_spheres(budget.floating_spheres, palette_len, rng);

        Self {
            tier,
            budget,
            core,
            satellites,
            floating,
        }
    }

    /// Surface points of the core structure.
    pub fn surface_count(&self) -> usize {
        self.core
            .iter()
            .filter(|point| point.layer == Layer::Surface)
            .count()
    }

    pub fn point_count(&self) -> usize {
        self.core.len() + self.satellites.len() + self.floating.len()
    }

    pub fn absorbed_count(&self) -> usize {
        self.satellites.iter().filter(|s| s.is_absorbed()).count()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_generate_matches_budget() {
        for tier in PerformanceTier::ALL {
            let mut rng = StdRng::seed_from_u64(21);
            let scene = Scene::generate(tier, 5, &mut rng);
            let budget = tier.budget();
            assert_eq!(scene.surface_count(), budget.core_points);
            assert_eq!(scene.satellites.len(), budget.satellites);
            assert_eq!(scene.floating.len(), budget.floating_spheres);
            assert_eq!(scene.absorbed_count(), 0);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = Scene::generate(PerformanceTier::High, 5, &mut StdRng::seed_from_u64(99));
        let b = Scene::generate(PerformanceTier::High, 5, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.core, b.core);
        assert_eq!(a.satellites, b.satellites);
    }
}
