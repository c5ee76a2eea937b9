//! Core types for the cellscape scene generator.
//!
//! Shared value types used by the scene, config and viewer crates:
//! performance tiers and their budgets, palette colors, environment
//! signals and the fixed fade/gradient schedules.

mod color;
mod env;
mod schedule;
mod tier;

pub use color::{Palette, Rgb};
pub use env::EnvSignals;
pub use schedule::{FadeSchedule, GradientSchedule};
pub use tier::{PerformanceTier, RenderCadence, TierBudget};
