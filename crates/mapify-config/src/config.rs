/// Application configuration: load, save, and sanitize.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::style::ToolStyles;

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapDefaults {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        // New York City
        Self {
            center_lat: 40.7128,
            center_lng: -74.006,
            zoom: 12,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub styles: ToolStyles,
    pub map: MapDefaults,
    /// Max undo/redo snapshots retained (minimum 2).
    pub history_depth: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            styles: ToolStyles::default(),
            map: MapDefaults::default(),
            history_depth: 1_000,
        }
    }
}

impl AppConfig {
    /// Returns the config file path: `<config dir>/mapify/mapify.json`.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("mapify").join("mapify.json"))
            .unwrap_or_else(|| PathBuf::from("mapify.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &std::path::Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        use anyhow::Context;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing config to {}", path.display()))
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.styles.sanitize();
        self.map.center_lat = self.map.center_lat.clamp(-90.0, 90.0);
        self.map.center_lng = self.map.center_lng.clamp(-180.0, 180.0);
        self.map.zoom = self.map.zoom.min(21);
        self.history_depth = self.history_depth.max(2);
    }
}
