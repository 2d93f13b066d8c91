//! Configuration for the visualizer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/sortscope/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::scheduler::SchedulerConfig;
use crate::sorting::engines::{BOGO_MAX_LEN_CEILING, DEFAULT_BOGO_MAX_LEN};
use crate::sorting::{Algorithm, Limits};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard floor for the sample size; a run needs something to sort
const SIZE_FLOOR: usize = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Sample & Animation Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Sample array settings
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// Number of bars in a fresh array
    pub size: usize,
    /// Smallest size reachable with the size keys
    pub min_size: usize,
    /// Largest size reachable with the size keys
    pub max_size: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            size: 10,
            min_size: 2,
            max_size: 100,
        }
    }
}

impl SampleConfig {
    /// Clamp a requested size into `[min_size, max_size]`
    pub fn clamp(&self, size: usize) -> usize {
        size.clamp(self.min_size, self.max_size)
    }

    /// Bounds are repaired so that `min_size <= max_size` and the size fits
    fn normalized(mut self) -> Self {
        self.min_size = self.min_size.max(SIZE_FLOOR);
        if self.max_size < self.min_size {
            self.max_size = self.min_size;
        }
        self.size = self.clamp(self.size);
        self
    }
}

/// Sample settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileSample {
    pub size: Option<usize>,
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
}

/// Animation pacing settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Time budget per full-array sweep; frame delay is this divided by N
    pub base_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            base_duration_ms: 500,
        }
    }
}

/// Animation settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileAnimation {
    pub base_duration_ms: Option<u64>,
}

/// Limits settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLimits {
    pub bogo_max_len: Option<usize>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Algorithm preselected on startup (None = nothing selected)
    pub algorithm: Option<Algorithm>,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    pub sample: SampleConfig,

    pub animation: AnimationConfig,

    /// Engine guards (bogo permutation bound)
    pub limits: Limits,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: None,
            enable_tui: true,
            sample: SampleConfig::default(),
            animation: AnimationConfig::default(),
            limits: Limits::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub algorithm: Option<String>,

    /// Optional [sample] section
    pub sample: Option<FileSample>,

    /// Optional [animation] section
    pub animation: Option<FileAnimation>,

    /// Optional [limits] section
    pub limits: Option<FileLimits>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/sortscope/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("sortscope").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        // Config is optional, a failed write just means defaults next time
        if let Err(e) = Self::default().write_to(&path) {
            tracing::debug!(path = %path.display(), error = %e, "Could not write config template");
        }
    }

    /// Write this config to the config path, replacing any existing file
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("Could not determine home directory")?;
        self.write_to(&path)?;
        Ok(path)
    }

    fn write_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but does not parse is an error rather than a
    /// silent fallback to defaults.
    fn load_file_config() -> Result<FileConfig> {
        let Some(path) = Self::config_path() else {
            return Ok(FileConfig::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse {} (delete it or run `sortscope config --reset`)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Result<Self> {
        let file = Self::load_file_config()?;
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge file values with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Algorithm: env > file > none
        let algorithm = env("SORTSCOPE_ALGORITHM")
            .or(file.algorithm)
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Algorithm>())
            .transpose()
            .map_err(anyhow::Error::msg)
            .context("Invalid algorithm in configuration")?;

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("SORTSCOPE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Sample size: env > file > default, then clamped
        let sample_file = file.sample.unwrap_or_default();
        let defaults = SampleConfig::default();
        let sample = SampleConfig {
            size: env("SORTSCOPE_SAMPLE_SIZE")
                .and_then(|v| v.parse().ok())
                .or(sample_file.size)
                .unwrap_or(defaults.size),
            min_size: sample_file.min_size.unwrap_or(defaults.min_size),
            max_size: sample_file.max_size.unwrap_or(defaults.max_size),
        }
        .normalized();

        // Base duration: env > file > default
        let animation = AnimationConfig {
            base_duration_ms: env("SORTSCOPE_BASE_DURATION_MS")
                .and_then(|v| v.parse().ok())
                .or(file.animation.and_then(|a| a.base_duration_ms))
                .unwrap_or(AnimationConfig::default().base_duration_ms),
        };

        // Clamped: the factorial search is unusable past the ceiling
        let limits = Limits {
            bogo_max_len: file
                .limits
                .and_then(|l| l.bogo_max_len)
                .unwrap_or(DEFAULT_BOGO_MAX_LEN)
                .clamp(1, BOGO_MAX_LEN_CEILING),
        };

        let logging = LoggingConfig::from_file(file.logging);

        Ok(Self {
            algorithm,
            enable_tui,
            sample,
            animation,
            limits,
            logging,
        })
    }

    /// Scheduler settings derived from this config
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            base_duration: Duration::from_millis(self.animation.base_duration_ms),
            limits: self.limits,
        }
    }
}
