//! Startup settings, read once from a RON file.

use std::fs;
use std::path::Path;

use ron::Options;
use serde::{Deserialize, Serialize};

use crate::detector::DetectorConfig;
use crate::engine::camera::FollowCamera;
use crate::engine::level::LevelConfig;
use crate::error::{ProbeError, Result};

pub const DEFAULT_SETTINGS_PATH: &str = "assets/wall_probe.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Wall Probe".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub window: WindowSettings,
    pub camera: FollowCamera,
    pub detector: DetectorConfig,
    pub level: LevelConfig,
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

impl AppSettings {
    pub fn from_ron(path: &Path, contents: &str) -> Result<Self> {
        ron_options()
            .from_str(contents)
            .map_err(|source| ProbeError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Read settings from `path`. A missing file falls back to defaults;
    /// any other I/O or parse failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                log::info!("settings: loaded {}", path.display());
                Self::from_ron(path, &contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("settings: {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ProbeError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
