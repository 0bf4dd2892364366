//! Settings file handling. Settings live in `settings.toml` under the
//! platform config directory and every field has a default, so a missing
//! file (or a missing key) is never an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::api::DEFAULT_BASE_URL;
use crate::core::location::{ConfiguredLocation, PermissionStatus};
use crate::core::map::{CollectionPoint, DEFAULT_DELTA, MapRegion};
use crate::core::model::Coordinate;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ecoleta";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub location: LocationConfig,
    pub map: MapConfig,
    pub collection_point: CollectionPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Simulated device location. Desktop builds have no geolocation prompt, so
/// the permission answer and the position come from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub permission: PermissionStatus,
    pub position: Option<Coordinate>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Some(CollectionPoint::default().coordinate),
        }
    }
}

impl LocationConfig {
    pub fn service(&self) -> ConfiguredLocation {
        ConfiguredLocation {
            permission: self.permission,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }
}

impl MapConfig {
    pub fn region(&self) -> MapRegion {
        MapRegion::default().with_deltas(self.latitude_delta, self.longitude_delta)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the settings file from the platform config directory, falling back
/// to defaults when there is none.
pub fn load() -> anyhow::Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid settings file {}", path.display()))
}

pub fn save_to_path(config: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize settings")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    Ok(())
}
