//! Application paths and persisted settings.
//!
//! Directory priority:
//! 1. CLI `--config-dir`
//! 2. `SCENERY_CONFIG_DIR` environment variable
//! 3. Current folder IF it already holds scenery files (scenery.json, scenery.log)
//! 4. Platform directory from dirs-next
//!
//! Platform paths:
//! - Linux: ~/.config/scenery/{name} (config), ~/.local/share/scenery/{name} (data)
//! - macOS: ~/Library/Application Support/scenery/{name}
//! - Windows: %APPDATA%\scenery\{name}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::entities::CompositionMode;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "scenery.json";
/// Default log file name inside the data directory
pub const LOG_FILE: &str = "scenery.log";

const APP_DIR: &str = "scenery";
const ENV_CONFIG_DIR: &str = "SCENERY_CONFIG_DIR";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args -> ENV var -> None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(ENV_CONFIG_DIR).ok().map(PathBuf::from));
        Self { config_dir }
    }
}

pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir).join(name)
}

pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir).join(name)
}

/// Create config and data directories if missing.
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = resolve_dir(config, dirs_next::config_dir);
    let data_dir = resolve_dir(config, dirs_next::data_dir);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }
    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }
    Ok(())
}

fn has_local_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform: fn() -> Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Ok(current) = std::env::current_dir() {
        if has_local_files(&current) {
            return current;
        }
    }
    platform()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Persisted user settings. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playback ticks per second for `play`
    pub frame_rate: f32,
    /// Mode used for newly created compositions
    pub default_mode: CompositionMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            default_mode: CompositionMode::Layered,
        }
    }
}

impl Settings {
    /// Load from `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Read settings error: {}", path.display()))?;
        let mut settings: Settings = serde_json::from_str(&json)
            .with_context(|| format!("Parse settings error: {}", path.display()))?;
        if !(settings.frame_rate.is_finite() && settings.frame_rate > 0.0) {
            log::warn!("Invalid frame_rate {} in settings, using 30", settings.frame_rate);
            settings.frame_rate = 30.0;
        }
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Serialize settings error")?;
        std::fs::write(path, json).with_context(|| format!("Write settings error: {}", path.display()))
    }

    /// Seconds per playback tick.
    pub fn frame_step(&self) -> f32 {
        1.0 / self.frame_rate
    }
}
