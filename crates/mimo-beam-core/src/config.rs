//! # Configuration System
//!
//! YAML configuration for beam pattern runs:
//!
//! - Array sizes and window taper
//! - Reference array drawn alongside the user array
//! - Observation sweep
//! - Link SNR used for capacity estimates
//! - Base station and optional user positions
//! - Plot floor and logging
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first file found:
//! 1. Path specified via `MIMO_BEAM_CONFIG` environment variable
//! 2. `./mimo-beam.yaml` (current directory)
//! 3. `~/.config/mimo-beam/config.yaml` (user config)
//! 4. `/etc/mimo-beam/config.yaml` (system config)
//!
//! ## Example Configuration
//!
//! ```yaml
//! array:
//!   nt: 16
//!   nr: 8
//!   window: blackman
//!
//! link:
//!   snr_db: 20.0
//!
//! site:
//!   user:
//!     lat_deg: 28.61
//!     lon_deg: 77.21
//! ```

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::ArrayGeometry;
use crate::geo::{GeoPoint, DEFAULT_BASE_STATION};
use crate::observe::LogConfig;
use crate::sweep::{linspace, DEFAULT_POINTS, DEFAULT_START_DEG, DEFAULT_STOP_DEG};
use crate::window::WindowKind;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MIMO_BEAM_CONFIG";

/// Transmit antenna counts exposed to users.
pub const NT_RANGE: RangeInclusive<usize> = 2..=32;
/// Receive antenna counts exposed to users.
pub const NR_RANGE: RangeInclusive<usize> = 1..=16;
/// Input SNR range in dB exposed to users.
pub const SNR_RANGE_DB: RangeInclusive<f64> = 0.0..=30.0;

/// Error type for configuration operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration file not found
    NotFound(String),
    /// Failed to read or write configuration file
    ReadError(String),
    /// Failed to parse configuration
    ParseError(String),
    /// Invalid configuration value
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(msg) => write!(f, "config not found: {}", msg),
            ConfigError::ReadError(msg) => write!(f, "failed to read config: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "failed to parse config: {}", msg),
            ConfigError::ValidationError(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// User array configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Number of transmit antennas
    pub nt: usize,
    /// Number of receive antennas
    pub nr: usize,
    /// Taper applied to both arrays
    pub window: WindowKind,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            nt: 8,
            nr: 4,
            window: WindowKind::Hamming,
        }
    }
}

impl ArrayConfig {
    pub fn geometry(&self) -> ArrayGeometry {
        ArrayGeometry {
            nt: self.nt,
            nr: self.nr,
        }
    }
}

/// Fixed comparison array, drawn with the same window as the user array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Draw the reference pattern
    pub enable: bool,
    pub nt: usize,
    pub nr: usize,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            enable: true,
            nt: 8,
            nr: 4,
        }
    }
}

impl ReferenceConfig {
    pub fn geometry(&self) -> ArrayGeometry {
        ArrayGeometry {
            nt: self.nt,
            nr: self.nr,
        }
    }
}

/// Observation sweep configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First observation angle in degrees
    pub start_deg: f64,
    /// Last observation angle in degrees
    pub stop_deg: f64,
    /// Number of linearly spaced angles
    pub points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_deg: DEFAULT_START_DEG,
            stop_deg: DEFAULT_STOP_DEG,
            points: DEFAULT_POINTS,
        }
    }
}

impl SweepConfig {
    pub fn angles(&self) -> Vec<f64> {
        linspace(self.start_deg, self.stop_deg, self.points)
    }
}

/// Link budget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Per-antenna input SNR in dB
    pub snr_db: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { snr_db: 10.0 }
    }
}

/// Site geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base station position
    pub base_station: GeoPoint,
    /// User position, if known
    pub user: Option<GeoPoint>,
    /// Explicit steering angle in degrees; takes precedence over `user`
    pub steering_deg: Option<f64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_station: DEFAULT_BASE_STATION,
            user: None,
            steering_deg: None,
        }
    }
}

/// Pattern display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Lowest gain drawn, in dB
    pub floor_db: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self { floor_db: -40.0 }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Configuration version
    pub version: String,
    pub array: ArrayConfig,
    pub reference: ReferenceConfig,
    pub sweep: SweepConfig,
    pub link: LinkConfig,
    pub site: SiteConfig,
    pub plot: PlotConfig,
    pub logging: LogConfig,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            array: ArrayConfig::default(),
            reference: ReferenceConfig::default(),
            sweep: SweepConfig::default(),
            link: LinkConfig::default(),
            site: SiteConfig::default(),
            plot: PlotConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl BeamConfig {
    /// Load configuration from the default search path.
    ///
    /// Search order:
    /// 1. `MIMO_BEAM_CONFIG` environment variable
    /// 2. `./mimo-beam.yaml`
    /// 3. `~/.config/mimo-beam/config.yaml`
    /// 4. `/etc/mimo-beam/config.yaml`
    ///
    /// Returns default config if no file is found. A path named by the
    /// environment variable must exist.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = Path::new(&path);
            if !path.exists() {
                return Err(ConfigError::NotFound(format!(
                    "{} points to {}",
                    CONFIG_ENV_VAR,
                    path.display()
                )));
            }
            return Self::load_from(path);
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Loaded configuration");
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_yaml()?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Get configuration search paths.
    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./mimo-beam.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "mimo-beam") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/mimo-beam/config.yaml"));
        paths
    }

    /// Validate the configuration against the ranges offered to users.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !NT_RANGE.contains(&self.array.nt) {
            return Err(ConfigError::ValidationError(format!(
                "array.nt must be {}-{}, got {}",
                NT_RANGE.start(),
                NT_RANGE.end(),
                self.array.nt
            )));
        }
        if !NR_RANGE.contains(&self.array.nr) {
            return Err(ConfigError::ValidationError(format!(
                "array.nr must be {}-{}, got {}",
                NR_RANGE.start(),
                NR_RANGE.end(),
                self.array.nr
            )));
        }
        if self.reference.enable {
            self.reference
                .geometry()
                .validate()
                .map_err(|e| ConfigError::ValidationError(format!("reference: {}", e)))?;
        }

        if !SNR_RANGE_DB.contains(&self.link.snr_db) {
            return Err(ConfigError::ValidationError(format!(
                "link.snr_db must be {}-{} dB, got {}",
                SNR_RANGE_DB.start(),
                SNR_RANGE_DB.end(),
                self.link.snr_db
            )));
        }

        if self.sweep.points == 0 {
            return Err(ConfigError::ValidationError(
                "sweep.points must be > 0".to_string(),
            ));
        }
        if !self.sweep.start_deg.is_finite() || !self.sweep.stop_deg.is_finite() {
            return Err(ConfigError::ValidationError(
                "sweep bounds must be finite".to_string(),
            ));
        }

        let mut positions = vec![("site.base_station", &self.site.base_station)];
        if let Some(ref user) = self.site.user {
            positions.push(("site.user", user));
        }
        for (name, p) in positions {
            if !(-90.0..=90.0).contains(&p.lat_deg) || !(-180.0..=180.0).contains(&p.lon_deg) {
                return Err(ConfigError::ValidationError(format!(
                    "{} is not a valid position: ({}, {})",
                    name, p.lat_deg, p.lon_deg
                )));
            }
        }
        if let Some(steer) = self.site.steering_deg {
            if !steer.is_finite() {
                return Err(ConfigError::ValidationError(
                    "site.steering_deg must be finite".to_string(),
                ));
            }
        }

        if self.plot.floor_db.is_nan() || self.plot.floor_db >= 0.0 {
            return Err(ConfigError::ValidationError(
                "plot.floor_db must be negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            site: SiteConfig {
                user: Some(GeoPoint::new(28.6139, 77.2090)),
                ..Default::default()
            },
            ..Default::default()
        };

        serde_yaml::to_string(&config).unwrap_or_default()
    }
}
