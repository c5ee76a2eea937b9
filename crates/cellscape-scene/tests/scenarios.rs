use std::time::Duration;

use cellscape_core::{EnvSignals, Palette, PerformanceTier};
use cellscape_scene::{
    ColorShift, Decay, FixedTier, OrbitParams, PointKind, Satellite, SceneConfig,
    SceneController, Scheduler, TimerEvent,
};
use glam::Vec3;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn desktop() -> EnvSignals {
    EnvSignals {
        viewport_width: 1920,
        cores: 8,
        benchmark_ms: 0.5,
        coarse_pointer: false,
        device_pixel_ratio: 2.0,
    }
}

#[test]
fn desktop_start_picks_high_tier_and_fades_in() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(1));
    controller.start(desktop(), ms(0));

    assert_eq!(controller.tier(), PerformanceTier::High);
    let scene = controller.scene().unwrap();
    assert_eq!(scene.surface_count(), 400);
    assert_eq!(scene.satellites.len(), 225);

    let mut previous = 0.0;
    for frame in 0..=200 {
        let opacity = controller.tick(ms(frame * 16)).unwrap().opacity;
        assert!((0.0..=1.0).contains(&opacity), "opacity = {opacity}");
        assert!(opacity >= previous, "opacity decreased at frame {frame}");
        previous = opacity;
    }
    assert_eq!(previous, 1.0);
}

#[test]
fn frame_layout_matches_scene() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(2));
    controller.start(desktop(), ms(0));
    let frame = controller.tick(ms(2000)).unwrap();

    let cores = frame.points.iter().filter(|p| p.kind == PointKind::Core).count();
    let satellites = frame
        .points
        .iter()
        .filter(|p| p.kind == PointKind::Satellite)
        .count();
    assert_eq!(cores, 550);
    assert_eq!(satellites, 225);
    assert!(frame.points.iter().all(|p| p.position.is_finite()));
}

#[test]
fn narrow_touch_device_gets_low_tier() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(3));
    let env = EnvSignals {
        viewport_width: 390,
        cores: 6,
        benchmark_ms: 1.0,
        coarse_pointer: true,
        device_pixel_ratio: 3.0,
    };
    controller.start(env, ms(0));
    assert_eq!(controller.tier(), PerformanceTier::Low);
    assert_eq!(controller.effective_dpr(), 1.0);
    assert_eq!(controller.scene().unwrap().floating.len(), 8);
}

#[test]
fn resize_across_breakpoint_regenerates() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(4));
    controller.start(desktop(), ms(0));
    assert!(controller.resize(EnvSignals {
        viewport_width: 700,
        cores: 4,
        ..desktop()
    }));
    assert_eq!(controller.tier(), PerformanceTier::Low);
    assert_eq!(controller.scene().unwrap().surface_count(), 150);

    let frame = controller.tick(ms(100)).unwrap();
    assert_eq!(frame.tier, PerformanceTier::Low);
    assert_eq!(frame.points.len(), 150 + 50 + 8);
}

#[test]
fn forced_tier_overrides_heuristics() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(5));
    controller.start(desktop(), ms(0));
    controller.set_strategy(Box::new(FixedTier(PerformanceTier::Medium)));
    assert_eq!(controller.tier(), PerformanceTier::Medium);
    assert_eq!(controller.scene().unwrap().satellites.len(), 60);
}

#[test]
fn decaying_satellite_is_absorbed_after_crossing() {
    let anchor = Vec3::new(5.0, 0.0, 0.0);
    let params = OrbitParams {
        initial_distance: 5.0,
        start_angle: 0.0,
        speed: 0.1,
        direction: 1.0,
        eccentricity: 0.1,
        inclination: 0.05,
        plane_tilt_x: 0.1,
        plane_tilt_y: 0.1,
        z_plane_offset: 0.0,
        decay: Some(Decay {
            start: 5.0,
            rate: 0.1,
        }),
    };
    assert_eq!(params.distance(5.0), 5.0);
    assert!((params.distance(30.0) - 5.0 * (-2.5f32).exp()).abs() < 1e-5);
    assert!((params.distance(30.0) - 0.41).abs() < 0.01);

    let palette = Palette::default();
    let mut satellite = Satellite::with_orbit(anchor, 0.2, ColorShift::new(0, 0.1, 0.0), params);

    let (at_30, absorbed) = satellite.step(30.0, &palette, 1.0);
    assert!(at_30.visible && !absorbed);

    // 5 * e^(-0.1 (t - 5)) < 0.3  <=>  t > 5 + 10 ln(50 / 3) ≈ 33.13
    let mut absorbed_at = None;
    for frame in 0..(20 * 60) {
        let t = 30.0 + frame as f32 / 60.0;
        let (transform, now_absorbed) = satellite.step(t, &palette, 1.0);
        if now_absorbed {
            assert!(absorbed_at.is_none(), "absorbed twice");
            absorbed_at = Some(t);
        }
        if absorbed_at.is_some() {
            assert!(!transform.visible);
            assert_eq!(transform.opacity, 0.0);
        }
    }
    let t = absorbed_at.expect("satellite never absorbed");
    assert!((t - 33.13).abs() < 0.05, "absorbed at {t}");
    assert!(satellite.is_absorbed());
}

#[test]
fn stopping_twice_leaves_no_timers() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(6));
    controller.start(desktop(), ms(0));
    controller.tick(ms(400));
    assert!(controller.pending_timers() > 0);

    controller.stop();
    controller.stop();
    assert!(!controller.is_running());
    assert_eq!(controller.pending_timers(), 0);

    let opacity = controller.opacity();
    let angle = controller.gradient_angle();
    assert!(controller.tick(ms(10_000)).is_none());
    assert!(!controller.resize(desktop()));
    assert_eq!(controller.opacity(), opacity);
    assert_eq!(controller.gradient_angle(), angle);
}

#[test]
fn cancelled_scheduler_fires_nothing() {
    let mut scheduler = Scheduler::new();
    scheduler.set_timeout(ms(0), ms(300), TimerEvent::FadeStart);
    scheduler.set_interval(ms(0), ms(100), TimerEvent::GradientStep);
    scheduler.set_interval(ms(0), ms(50), TimerEvent::FadeStep);

    let mut fired = 0;
    for step in 0..10 {
        fired += scheduler.poll(ms(step * 10)).len();
    }
    assert_eq!(fired, 1);

    scheduler.cancel_all();
    scheduler.cancel_all();
    for step in 0..100 {
        assert!(scheduler.poll(ms(step * 100)).is_empty());
    }
}

#[test]
fn restart_after_stop_is_clean() {
    let mut controller = SceneController::with_heuristics(SceneConfig::new(8));
    controller.start(desktop(), ms(0));
    controller.tick(ms(5000));
    controller.stop();

    controller.start(desktop(), ms(20_000));
    assert_eq!(controller.opacity(), 0.0);
    assert_eq!(controller.tick(ms(20_100)).unwrap().opacity, 0.0);
    assert_eq!(controller.tick(ms(20_300)).unwrap().opacity, 0.01);
}
