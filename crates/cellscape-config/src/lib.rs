//! Configuration file handling for cellscape.
//!
//! Settings live in `config.toml` inside the platform config directory
//! (for example `~/.config/cellscape/config.toml` on Linux). Every field is
//! optional; a missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use cellscape_core::{FadeSchedule, GradientSchedule, Palette, PerformanceTier, Rgb};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("{0} must contain at least one color")]
    EmptyColors(&'static str),

    #[error("fade schedule must start within 0..=1 and advance by a positive step")]
    InvalidFade,

    #[error("no platform config directory")]
    NoConfigDir,
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for the scene generator; random when absent.
    pub seed: Option<u64>,
    /// Force a performance tier instead of probing the environment.
    pub tier: Option<PerformanceTier>,
    /// Sphere palette as `#RRGGBB` strings.
    pub palette: Vec<String>,
    /// Background gradient stops, evenly spread, as `#RRGGBB` strings.
    pub background: Vec<String>,
    pub fade: FadeSchedule,
    pub gradient: GradientSchedule,
    /// Pixels per terminal column when deriving the viewport width.
    pub cell_width_px: u32,
    /// Treat the input device as a coarse (touch) pointer.
    pub coarse_pointer: bool,
    pub device_pixel_ratio: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            tier: None,
            palette: ["#FFD8C0", "#FFD0D0", "#E8D8FF", "#D8E5FF", "#FFD8D8"]
                .map(String::from)
                .to_vec(),
            background: ["#FDFCFB", "#F8F6F6", "#F2EDED", "#FAF6F6"]
                .map(String::from)
                .to_vec(),
            fade: FadeSchedule::default(),
            gradient: GradientSchedule::default(),
            cell_width_px: 8,
            coarse_pointer: false,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cellscape").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file or the platform config directory does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no platform config directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Write to the default location, returning the path written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        tracing::info!(path = %path.display(), "saved config");
        Ok(path)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)
    }

    /// Check colors and schedules without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.palette()?;
        self.background_stops()?;
        if !self.fade.is_valid() {
            return Err(ConfigError::InvalidFade);
        }
        Ok(())
    }

    /// Parsed sphere palette.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        let colors = parse_colors(&self.palette)?;
        Palette::new(colors).ok_or(ConfigError::EmptyColors("palette"))
    }

    /// Parsed background gradient stops.
    pub fn background_stops(&self) -> Result<Vec<Rgb>, ConfigError> {
        let colors = parse_colors(&self.background)?;
        if colors.is_empty() {
            return Err(ConfigError::EmptyColors("background"));
        }
        Ok(colors)
    }
}

fn parse_colors(hexes: &[String]) -> Result<Vec<Rgb>, ConfigError> {
    hexes
        .iter()
        .map(|hex| Rgb::from_hex(hex).ok_or_else(|| ConfigError::InvalidColor(hex.clone())))
        .collect()
}
