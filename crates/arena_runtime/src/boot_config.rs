//! Run Configuration
//!
//! Decides what the runner simulates and for how long.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Command line flags: `--ticks=600`, `--seed=7`, `--level=yard`
//! 2. Environment variables: `ARENA_TICKS`, `ARENA_SEED`, `ARENA_LEVEL`, `ARENA_LEVEL_DIR`
//! 3. Config file: first positional argument, else `ARENA_CONFIG`
//! 4. Built-in defaults (demo arena, one minute at 60 Hz)
//!
//! # Example Config File
//!
//! ```toml
//! [run]
//! ticks = 3600
//! dt = 0.016666
//! level = "yard"
//! level_dir = "levels"
//! format = "grid"      # grid, json
//! report_every = 5.0
//!
//! seed = 7
//!
//! [player]
//! speed = 350.0
//! ```
//!
//! The `[run]` table configures the runner; every other key is session
//! configuration.

use std::path::{Path, PathBuf};

use arena_game::{GameError, SimConfig};
use serde::{Deserialize, Serialize};

/// Errors while assembling the run configuration
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid run config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Result type for run configuration
pub type Result<T> = std::result::Result<T, RunError>;

/// Level file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelFormat {
    /// Text grid (`<name>.txt`)
    #[default]
    Grid,
    /// Level data (`<name>.json`)
    Json,
}

impl std::fmt::Display for LevelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid => write!(f, "grid"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LevelFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" | "txt" | "text" => Ok(Self::Grid),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown level format: {}", s)),
        }
    }
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Ticks to simulate
    pub ticks: u32,
    /// Seconds per tick
    pub dt: f32,
    /// Level name; the demo arena when absent
    pub level: Option<String>,
    /// Directory holding level files
    pub level_dir: Option<PathBuf>,
    /// Level file format
    pub format: LevelFormat,
    /// Seconds of simulation between progress reports
    pub report_every: f32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            ticks: 3600,
            dt: 1.0 / 60.0,
            level: None,
            level_dir: None,
            format: LevelFormat::Grid,
            report_every: 5.0,
        }
    }
}

#[derive(Deserialize)]
struct RunTable {
    #[serde(default)]
    run: RunSettings,
}

/// Complete run configuration
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Runner settings
    pub run: RunSettings,
    /// Session configuration
    pub sim: SimConfig,
    /// Config file the values came from
    pub config_path: Option<PathBuf>,
}

impl RunConfig {
    /// Load from the process arguments and environment
    pub fn load() -> Result<Self> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    /// Load from explicit arguments and an environment lookup
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let file = args
            .iter()
            .find(|arg| !arg.starts_with("--"))
            .cloned()
            .or_else(|| env("ARENA_CONFIG").filter(|path| !path.is_empty()));

        let mut config = match file {
            Some(path) => {
                let loaded = Self::load_from_file(Path::new(&path))?;
                log::info!("Loaded run config from {}", path);
                loaded
            }
            None => Self::default(),
        };

        for key in ["ticks", "seed", "level", "level_dir", "format"] {
            if let Some(value) = env(&format!("ARENA_{}", key.to_uppercase())) {
                config.apply(key, &value)?;
            }
        }

        for arg in args {
            if let Some((key, value)) = arg.strip_prefix("--").and_then(|flag| flag.split_once('=')) {
                config.apply(key, value)?;
            }
        }

        Ok(config)
    }

    /// Load from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RunError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse a `[run]` table plus session configuration
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: RunTable = toml::from_str(text)?;
        Ok(Self {
            run: table.run,
            sim: SimConfig::from_toml_str(text)?,
            config_path: None,
        })
    }

    /// Override one setting by name
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || RunError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "ticks" => self.run.ticks = value.parse().map_err(|_| invalid())?,
            "dt" => self.run.dt = value.parse().map_err(|_| invalid())?,
            "seed" => self.sim.seed = value.parse().map_err(|_| invalid())?,
            "level" => self.run.level = Some(value.to_string()).filter(|v| !v.is_empty()),
            "level_dir" => self.run.level_dir = Some(PathBuf::from(value)),
            "format" => self.run.format = value.parse().map_err(|_| invalid())?,
            _ => log::warn!("Ignoring unknown setting '{}'", key),
        }
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Run Configuration:");
        log::info!("  Ticks: {} at {:.4}s", self.run.ticks, self.run.dt);
        match (&self.run.level, &self.run.level_dir) {
            (Some(level), Some(dir)) => {
                log::info!("  Level: {} ({} from {})", level, self.run.format, dir.display())
            }
            (Some(level), None) => log::info!("  Level: {} (no level dir, demo arena)", level),
            (None, _) => log::info!("  Level: demo arena"),
        }
        log::info!("  Seed: {}", self.sim.seed);
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("grid".parse::<LevelFormat>().unwrap(), LevelFormat::Grid);
        assert_eq!("JSON".parse::<LevelFormat>().unwrap(), LevelFormat::Json);
        assert!("xml".parse::<LevelFormat>().is_err());
        assert_eq!(LevelFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::from_sources(&[], no_env).unwrap();
        assert_eq!(config.run.ticks, 3600);
        assert!(config.run.level.is_none());
        assert!(config.config_path.is_none());
        assert_eq!(config.sim, SimConfig::default());
    }

    #[test]
    fn test_toml_run_table_and_session() {
        let text = r#"
            seed = 9

            [run]
            ticks = 120
            level = "yard"
            format = "json"

            [player]
            speed = 350.0
        "#;
        let config = RunConfig::from_toml_str(text).unwrap();
        assert_eq!(config.run.ticks, 120);
        assert_eq!(config.run.level.as_deref(), Some("yard"));
        assert_eq!(config.run.format, LevelFormat::Json);
        assert_eq!(config.run.report_every, 5.0);
        assert_eq!(config.sim.seed, 9);
        assert_eq!(config.sim.player.speed, 350.0);
    }

    #[test]
    fn test_flags_override_env() {
        let args = vec!["--ticks=10".to_string(), "--seed=3".to_string()];
        let env = |key: &str| match key {
            "ARENA_TICKS" => Some("99".to_string()),
            "ARENA_LEVEL" => Some("yard".to_string()),
            _ => None,
        };
        let config = RunConfig::from_sources(&args, env).unwrap();
        assert_eq!(config.run.ticks, 10);
        assert_eq!(config.sim.seed, 3);
        assert_eq!(config.run.level.as_deref(), Some("yard"));
    }

    #[test]
    fn test_invalid_value() {
        let args = vec!["--ticks=lots".to_string()];
        let result = RunConfig::from_sources(&args, no_env);
        assert!(matches!(result, Err(RunError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_file() {
        let args = vec!["/nonexistent/arena.toml".to_string()];
        assert!(matches!(RunConfig::from_sources(&args, no_env), Err(RunError::Io { .. })));
    }
}
