use std::time::{Duration, Instant};

use cellscape_config::Config;
use cellscape_core::{EnvSignals, PerformanceTier, RenderCadence, Rgb};
use cellscape_scene::{
    FixedTier, HeuristicTierSelector, HostSignals, SceneConfig, SceneController, TierStrategy,
    probe_environment,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, style::Color};

mod logging;
mod render;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_path = logging::init()?;
    let config = Config::load()?;
    tracing::info!(?log_path, "starting cellscape");

    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The viewer: owns the scene controller and maps terminal events onto it.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    controller: SceneController,
    /// Tier pinned with `t`; `None` means heuristics decide.
    forced_tier: Option<PerformanceTier>,
    env: EnvSignals,
    cell_width_px: u32,
    coarse_pointer: bool,
    device_pixel_ratio: f32,
    background: Vec<Rgb>,
    accent: Color,
    clock: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
    force_draw: bool,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded configuration.
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let palette = config.palette()?;
        let background = config.background_stops()?;
        let accent: Color = palette.get(0).lerp(Rgb::new(0.0, 0.0, 0.0), 0.35).into();
        let seed = config.seed.unwrap_or_else(rand::random);

        let scene_config = SceneConfig {
            seed,
            palette,
            fade: config.fade,
            gradient: config.gradient,
        };
        let controller = SceneController::new(scene_config, strategy_for(config.tier));

        Ok(Self {
            running: false,
            controller,
            forced_tier: config.tier,
            env: EnvSignals::default(),
            cell_width_px: config.cell_width_px,
            coarse_pointer: config.coarse_pointer,
            device_pixel_ratio: config.device_pixel_ratio,
            background,
            accent,
            clock: Instant::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
            force_draw: true,
            config,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.env = probe_environment(HostSignals {
            viewport_width: self.viewport_width(size.width),
            coarse_pointer: self.coarse_pointer,
            device_pixel_ratio: self.device_pixel_ratio,
        });

        self.running = true;
        self.controller.start(self.env, self.scene_time());

        while self.running {
            let now = self.scene_time();
            let force = std::mem::take(&mut self.force_draw);
            let help = render::help_line(
                self.controller.tier().name(),
                self.forced_tier.is_some(),
                self.paused_at.is_some(),
                self.accent,
            );
            if let Some(frame) = self.controller.tick(now)
                && (frame.redraw || force)
            {
                terminal.draw(|f| render::draw(f, &frame, &self.background, help))?;
            }
            self.handle_crossterm_events()?;
        }

        self.controller.stop();
        tracing::info!("exiting cellscape");
        Ok(())
    }

    /// Time on the scene clock, which stands still while paused.
    fn scene_time(&self) -> Duration {
        let now = self.paused_at.unwrap_or_else(Instant::now);
        now.saturating_duration_since(self.clock)
            .saturating_sub(self.paused_total)
    }

    fn viewport_width(&self, columns: u16) -> u32 {
        u32::from(columns) * self.cell_width_px
    }

    fn poll_timeout(&self) -> Duration {
        match self.controller.tier().budget().cadence {
            RenderCadence::Always => Duration::from_millis(16),
            RenderCadence::Demand => Duration::from_millis(33),
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, _) => self.on_resize(columns),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('t')) => self.cycle_tier(),
            (_, KeyCode::Char('r')) => self.reseed(),
            (_, KeyCode::Char('s')) => self.save_settings(),
            _ => {}
        }
    }

    fn on_resize(&mut self, columns: u16) {
        self.env = EnvSignals {
            viewport_width: self.viewport_width(columns),
            ..self.env
        };
        self.controller.resize(self.env);
        self.force_draw = true;
    }

    fn toggle_pause(&mut self) {
        match self.paused_at.take() {
            Some(since) => self.paused_total += since.elapsed(),
            None => self.paused_at = Some(Instant::now()),
        }
        self.force_draw = true;
    }

    /// Auto, then each tier from lightest to heaviest, then back to auto.
    fn cycle_tier(&mut self) {
        self.forced_tier = match self.forced_tier {
            None => Some(PerformanceTier::Low),
            Some(PerformanceTier::Low) => Some(PerformanceTier::Medium),
            Some(PerformanceTier::Medium) => Some(PerformanceTier::High),
            Some(PerformanceTier::High) => None,
        };
        tracing::info!(forced = ?self.forced_tier, "tier override changed");
        self.controller.set_strategy(strategy_for(self.forced_tier));
        self.force_draw = true;
    }

    fn reseed(&mut self) {
        let seed: u64 = rand::random();
        tracing::info!(seed, "reseeding scene");
        self.controller.reseed(seed);
        self.force_draw = true;
    }

    /// Current configuration with the live seed and tier override.
    fn settings(&self) -> Config {
        Config {
            seed: Some(self.controller.config().seed),
            tier: self.forced_tier,
            ..self.config.clone()
        }
    }

    /// Persist the live seed and tier so the next run starts from them.
    fn save_settings(&mut self) {
        let settings = self.settings();
        match settings.save() {
            Ok(path) => {
                tracing::info!(path = %path.display(), "settings saved");
                self.config = settings;
            }
            Err(e) => tracing::warn!(error = %e, "could not save settings"),
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn strategy_for(forced: Option<PerformanceTier>) -> Box<dyn TierStrategy> {
    match forced {
        Some(tier) => Box::new(FixedTier(tier)),
        None => Box::new(HeuristicTierSelector::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config {
            seed: Some(7),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_cycle_tier_wraps_to_auto() {
        let mut app = app();
        app.controller.start(EnvSignals::default(), Duration::ZERO);
        let mut seen = Vec::new();
        for _ in 0..4 {
            app.cycle_tier();
            seen.push(app.forced_tier);
        }
        assert_eq!(
            seen,
            vec![
                Some(PerformanceTier::Low),
                Some(PerformanceTier::Medium),
                Some(PerformanceTier::High),
                None,
            ]
        );
        assert_eq!(app.controller.tier(), PerformanceTier::High);
    }

    #[test]
    fn test_settings_capture_seed_and_tier() {
        let mut app = app();
        app.controller.start(EnvSignals::default(), Duration::ZERO);
        app.controller.reseed(1234);
        app.cycle_tier();

        let settings = app.settings();
        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.tier, Some(PerformanceTier::Low));
        assert_eq!(settings.palette, app.config.palette);
    }

    #[test]
    fn test_viewport_width_uses_cell_width() {
        let app = app();
        assert_eq!(app.viewport_width(100), 800);
    }

    #[test]
    fn test_pause_freezes_scene_time() {
        let mut app = app();
        app.toggle_pause();
        let frozen = app.scene_time();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(app.scene_time(), frozen);
        app.toggle_pause();
        assert!(app.paused_at.is_none());
    }

    #[test]
    fn test_quit_key_stops_running() {
        let mut app = app();
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.running);
    }
}
