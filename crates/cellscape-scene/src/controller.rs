//! Scene lifecycle and the per-frame driver.

use std::time::Duration;

use cellscape_core::{
    EnvSignals, FadeSchedule, GradientSchedule, Palette, PerformanceTier, RenderCadence,
    TierBudget,
};
use glam::{Mat3, Vec2, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animator::{PointKind, PointTransform};
use crate::fade::{GradientRotation, OpacityRamp};
use crate::scene::Scene;
use crate::tier::{HeuristicTierSelector, TierStrategy};
use crate::timers::{Scheduler, TimerEvent, TimerId};

/// Core structure spin rate around Y, radians per second.
const SPIN_RATE: f32 = 0.05;
/// Core structure nod around X: rate and amplitude.
const NOD_RATE: f32 = 0.03;
const NOD_AMPLITUDE: f32 = 0.1;
/// Position jitter of core points on the full tier.
const CORE_JITTER: f32 = 0.01;

/// Read-only configuration injected into a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub seed: u64,
    pub palette: Palette,
    pub fade: FadeSchedule,
    pub gradient: GradientSchedule,
}

impl SceneConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            palette: Palette::default(),
            fade: FadeSchedule::default(),
            gradient: GradientSchedule::default(),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Seconds since the scene started.
    pub elapsed: f32,
    pub tier: PerformanceTier,
    pub budget: TierBudget,
    pub opacity: f32,
    /// Background gradient angle in degrees.
    pub gradient_angle: f32,
    /// Core structure rotation (x, y) in radians.
    pub rotation: Vec2,
    /// Device pixel ratio clamped to the tier's ceiling.
    pub pixel_ratio: f32,
    /// Bumped whenever the point set is regenerated.
    pub generation: u64,
    /// Whether the host should redraw this frame.
    pub redraw: bool,
    /// Satellites absorbed during this tick.
    pub absorbed: usize,
    /// Core points, then satellites, then floating spheres.
    pub points: &'a [PointTransform],
}

/// Inputs whose change triggers a redraw under [`RenderCadence::Demand`].
/// The background gradient is painted on its own surface and is not tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tracked {
    opacity: f32,
    tier: PerformanceTier,
    viewport_width: u32,
    rotation: Vec2,
    absorbed: usize,
    generation: u64,
}

/// Owns the scene, its clock-driven timers and the tier decision.
///
/// Lifecycle is explicit: [`start`](Self::start) generates the scene and
/// registers timers, [`tick`](Self::tick) advances it, and
/// [`stop`](Self::stop) cancels every timer. Stopping twice is harmless.
#[derive(Debug)]
pub struct SceneController {
    config: SceneConfig,
    strategy: Box<dyn TierStrategy>,
    rng: StdRng,
    env: EnvSignals,
    tier: PerformanceTier,
    scene: Option<Scene>,
    scheduler: Scheduler,
    fade_timer: Option<TimerId>,
    opacity: OpacityRamp,
    gradient: GradientRotation,
    running: bool,
    started_at: Duration,
    ticks: u64,
    rotation: Vec2,
    transforms: Vec<PointTransform>,
    generation: u64,
    last_drawn: Option<Tracked>,
}

impl SceneController {
    pub fn new(config: SceneConfig, strategy: Box<dyn TierStrategy>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            opacity: OpacityRamp::new(config.fade),
            gradient: GradientRotation::new(config.gradient),
            config,
            strategy,
            env: EnvSignals::default(),
            tier: PerformanceTier::default(),
            scene: None,
            scheduler: Scheduler::new(),
            fade_timer: None,
            running: false,
            started_at: Duration::ZERO,
            ticks: 0,
            rotation: Vec2::ZERO,
            transforms: Vec::new(),
            generation: 0,
            last_drawn: None,
        }
    }

    /// Controller using the default heuristic tier selector.
    pub fn with_heuristics(config: SceneConfig) -> Self {
        Self::new(config, Box::new(HeuristicTierSelector::default()))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tier(&self) -> PerformanceTier {
        self.tier
    }

    pub fn env(&self) -> &EnvSignals {
        &self.env
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    pub fn gradient_angle(&self) -> f32 {
        self.gradient.angle()
    }

    /// Timers still registered; zero after `stop`.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Device pixel ratio clamped to the tier's ceiling.
    pub fn effective_dpr(&self) -> f32 {
        self.env.device_pixel_ratio.min(self.tier.budget().max_dpr)
    }

    /// Classify the environment, generate the scene and register timers.
    ///
    /// `now` is the host clock reading; scene time is measured from it.
    /// Does nothing if already running.
    pub fn start(&mut self, env: EnvSignals, now: Duration) {
        if self.running {
            return;
        }

        self.running = true;
        self.started_at = now;
        self.env = env;
        self.tier = self.strategy.estimate_tier(&env);
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.regenerate();

        self.opacity = OpacityRamp::new(self.config.fade);
        self.gradient = GradientRotation::new(self.config.gradient);
        self.ticks = 0;
        self.rotation = Vec2::ZERO;
        self.last_drawn = None;
        self.fade_timer = None;

        self.scheduler
            .set_timeout(Duration::ZERO, self.config.fade.delay(), TimerEvent::FadeStart);
        self.scheduler.set_interval(
            Duration::ZERO,
            self.config.gradient.interval(),
            TimerEvent::GradientStep,
        );

        tracing::info!(
            tier = self.tier.name(),
            seed = self.config.seed,
            points = self.scene.as_ref().map_or(0, Scene::point_count),
            "scene started"
        );
    }

    /// Cancel all timers and stop ticking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        let cancelled = self.scheduler.cancel_all();
        self.fade_timer = None;
        self.running = false;
        tracing::info!(cancelled, "scene stopped");
    }

    /// Re-run tier selection for a new environment. The scene is regenerated
    /// only when the tier changes. Ignored unless running.
    pub fn resize(&mut self, env: EnvSignals) -> bool {
        if !self.running {
            return false;
        }
        self.env = env;
        self.retier();
        true
    }

    /// Swap the tier strategy, re-classifying immediately when running.
    pub fn set_strategy(&mut self, strategy: Box<dyn TierStrategy>) {
        self.strategy = strategy;
        if self.running {
            self.retier();
        }
    }

    /// Replace the seed and, when running, regenerate with it.
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        if self.running {
            self.regenerate();
        }
    }

    fn retier(&mut self) {
        let tier = self.strategy.estimate_tier(&self.env);
        if tier != self.tier {
            tracing::debug!(from = self.tier.name(), to = tier.name(), "tier changed");
            self.tier = tier;
            self.regenerate();
        }
    }

    fn regenerate(&mut self) {
        let scene = Scene::generate(self.tier, self.config.palette.len(), &mut self.rng);
        tracing::debug!(
            tier = self.tier.name(),
            core = scene.core.len(),
            satellites = scene.satellites.len(),
            floating = scene.floating.len(),
            "generated scene"
        );
        self.scene = Some(scene);
        self.transforms.clear();
        self.generation += 1;
    }

    fn handle_timers(&mut self, elapsed: Duration) {
        loop {
            let fired = self.scheduler.poll(elapsed);
            if fired.is_empty() {
                break;
            }
            for (_, event) in fired {
                match event {
                    TimerEvent::FadeStart => {
                        self.opacity.begin();
                        tracing::debug!("fade-in started");
                        if self.fade_timer.is_none() && !self.opacity.is_complete() {
                            let due = self.config.fade.delay();
                            self.fade_timer = Some(self.scheduler.set_interval(
                                due,
                                self.config.fade.interval(),
                                TimerEvent::FadeStep,
                            ));
                        }
                    }
                    TimerEvent::FadeStep => {
                        if self.opacity.step()
                            && let Some(id) = self.fade_timer.take()
                        {
                            self.scheduler.cancel(id);
                            tracing::debug!("fade-in complete");
                        }
                    }
                    TimerEvent::GradientStep => self.gradient.advance(),
                }
            }
        }
    }

    /// Advance the scene to host clock reading `now`.
    ///
    /// Returns `None` when the controller is not running.
    pub fn tick(&mut self, now: Duration) -> Option<Frame<'_>> {
        if !self.running {
            return None;
        }

        let elapsed = now.saturating_sub(self.started_at);
        let t = elapsed.as_secs_f32();
        self.handle_timers(elapsed);

        let budget = self.tier.budget();
        let throttled = self.tier == PerformanceTier::Low && (t.floor() as u64) % 3 != 0;
        if !throttled {
            self.rotation = Vec2::new((t * NOD_RATE).sin() * NOD_AMPLITUDE, t * SPIN_RATE);
        }

        let stride = u64::from(budget.animation_stride.max(1));
        let animate = self.ticks % stride == 0;
        self.ticks += 1;

        let scene = self.scene.as_mut()?;
        let palette = &self.config.palette;
        let opacity = self.opacity.value();
        let refresh = animate || self.transforms.len() != scene.point_count();

        let mut absorbed = 0;
        if refresh {
            let rotate = Mat3::from_rotation_x(self.rotation.x) * Mat3::from_rotation_y(self.rotation.y);
            let jitter = !self.tier.is_reduced();
            self.transforms.clear();
            self.transforms.extend(scene.core.iter().map(|point| {
                let offset = if jitter {
                    point.motion.offset(t, CORE_JITTER)
                } else {
                    Vec3::ZERO
                };
                PointTransform {
                    kind: PointKind::Core,
                    position: rotate * (point.anchor + offset),
                    radius: point.radius,
                    scale: point.motion.scale(t),
                    color: point.color.color(palette, t),
                    opacity,
                    visible: true,
                }
                .sanitized(rotate * point.anchor)
            }));
            for satellite in &mut scene.satellites {
                let (transform, now_absorbed) = satellite.step(t, palette, opacity);
                absorbed += usize::from(now_absorbed);
                self.transforms.push(transform);
            }
            self.transforms.extend(
                scene
                    .floating
                    .iter()
                    .map(|sphere| sphere.transform(t, palette, opacity)),
            );
        } else {
            let core_len = scene.core.len();
            for (slot, satellite) in self.transforms[core_len..]
                .iter_mut()
                .zip(scene.satellites.iter_mut())
            {
                let (transform, now_absorbed) = satellite.step(t, palette, opacity);
                absorbed += usize::from(now_absorbed);
                *slot = transform;
            }
            for transform in self.transforms.iter_mut() {
                if transform.kind != PointKind::Satellite {
                    transform.opacity = opacity;
                }
            }
        }

        if absorbed > 0 {
            tracing::debug!(absorbed, total = scene.absorbed_count(), t, "satellites absorbed");
        }

        let tracked = Tracked {
            opacity,
            tier: self.tier,
            viewport_width: self.env.viewport_width,
            rotation: self.rotation,
            absorbed: scene.absorbed_count(),
            generation: self.generation,
        };
        let redraw = match budget.cadence {
            RenderCadence::Always => true,
            RenderCadence::Demand => self.last_drawn != Some(tracked),
        };
        if redraw {
            self.last_drawn = Some(tracked);
        }

        Some(Frame {
            elapsed: t,
            tier: self.tier,
            budget,
            opacity,
            gradient_angle: self.gradient.angle(),
            rotation: self.rotation,
            pixel_ratio: self.effective_dpr(),
            generation: self.generation,
            redraw,
            absorbed,
            points: &self.transforms,
        })
    }
}

impl Drop for SceneController {
    fn drop(&mut self) {
        self.stop();
    }
}
