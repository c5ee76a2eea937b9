//! Procedural cell scene generation and animation.
//!
//! This crate builds the decorative "cell" scene: a golden-angle sphere of
//! points, orbiting satellites that may spiral inwards and get absorbed, and
//! floating spheres on lighter tiers, shaded with a soft [`Material`]. All
//! randomness comes from a single seeded generator per scene, and every
//! per-point value is a pure function of elapsed time, so a seed and a time
//! fully determine a frame.
//!
//! [`SceneController`] drives it: tier selection, fade-in and gradient
//! timers, throttling, and the per-frame [`Frame`] handed to a renderer.

mod animator;
mod controller;
mod distribution;
mod fade;
mod floating;
mod material;
mod orbit;
mod probe;
mod satellite;
mod scene;
mod tier;
mod timers;

pub use animator::{ColorShift, Oscillator, PointKind, PointTransform};
pub use controller::{Frame, SceneConfig, SceneController};
pub use distribution::{
    CorePoint, GOLDEN_RATIO_CONJUGATE, Layer, MIN_SATELLITE_DISTANCE, SUBSURFACE_DEPTH,
    core_structure, fibonacci_point, repel_from_core, satellite_anchors, sphere_layer,
    surface_jitter,
};
pub use fade::{GradientRotation, OpacityRamp};
pub use floating::{FloatingSphere, floating_spheres};
pub use material::{LIGHT_DIRECTION, Material};
pub use orbit::{ABSORPTION_DISTANCE, Decay, Orbit, OrbitParams, OrbitState, OrbitStep};
pub use probe::{BENCHMARK_ITERATIONS, HostSignals, allocation_benchmark_ms, logical_cores, probe_environment};
pub use satellite::{Satellite, color_index_for_anchor, size_for_anchor, size_table};
pub use scene::Scene;
pub use tier::{FixedTier, HeuristicTierSelector, TierStrategy, WIDE_VIEWPORT_PX};
pub use timers::{Scheduler, TimerEvent, TimerId};
