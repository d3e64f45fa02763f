use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::Machine;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tape: TapeConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct TapeConfig {
    /// Explicit CPU clock in Hz; wins over `machine`.
    #[serde(default)]
    pub cpu_freq: Option<f64>,
    #[serde(default)]
    pub machine: Option<Machine>,
}

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}

/// `wav2tap.toml` in the working directory, then the user config locations.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("wav2tap.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("wav2tap").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("wav2tap").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
