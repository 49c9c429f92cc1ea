//! Per-product configuration: scenes, tile pyramids, hotspots and UI
//! settings, parsed from `data/<key>.json` and validated at the boundary.

use crate::view::ViewParameters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration has no scenes")]
    NoScenes,
    #[error("duplicate scene id {0:?}")]
    DuplicateSceneId(String),
    #[error("scene {scene:?} has no tile levels")]
    NoLevels { scene: String },
    #[error("scene {scene:?} tile levels are not strictly ascending by size")]
    LevelsNotAscending { scene: String },
    #[error("scene {scene:?} has a zero face or tile size")]
    ZeroSize { scene: String },
    #[error("scene {scene:?} initial fov {fov} outside (0, pi]")]
    InvalidFov { scene: String, fov: f64 },
    #[error("scene {scene:?} has a non-finite angle")]
    NonFiniteAngle { scene: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseViewMode {
    #[default]
    Drag,
    Qtvr,
}

impl MouseViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MouseViewMode::Drag => "drag",
            MouseViewMode::Qtvr => "qtvr",
        }
    }
}

fn yes() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub mouse_view_mode: MouseViewMode,
    #[serde(default = "yes")]
    pub autorotate_enabled: bool,
    #[serde(default = "yes")]
    pub fullscreen_button: bool,
    #[serde(default = "yes")]
    pub view_control_buttons: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_view_mode: MouseViewMode::Drag,
            autorotate_enabled: true,
            fullscreen_button: true,
            view_control_buttons: true,
        }
    }
}

/// One resolution tier of a cube-map tile pyramid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLevel {
    pub tile_size: u32,
    pub size: u32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback_only: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkHotspot {
    pub yaw: f64,
    pub pitch: f64,
    #[serde(default)]
    pub rotation: f64,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfoHotspot {
    pub yaw: f64,
    pub pitch: f64,
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub name: String,
    pub levels: Vec<TileLevel>,
    pub face_size: u32,
    pub initial_view_parameters: ViewParameters,
    #[serde(default)]
    pub link_hotspots: Vec<LinkHotspot>,
    #[serde(default)]
    pub info_hotspots: Vec<InfoHotspot>,
}

impl Scene {
    fn validate(&self) -> Result<(), ConfigError> {
        let scene = || self.id.clone();
        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels { scene: scene() });
        }
        if self.face_size == 0 || self.levels.iter().any(|l| l.size == 0 || l.tile_size == 0) {
            return Err(ConfigError::ZeroSize { scene: scene() });
        }
        if self.levels.windows(2).any(|w| w[0].size >= w[1].size) {
            return Err(ConfigError::LevelsNotAscending { scene: scene() });
        }
        let v = &self.initial_view_parameters;
        if !v.yaw.is_finite() || !v.pitch.is_finite() {
            return Err(ConfigError::NonFiniteAngle { scene: scene() });
        }
        if !(v.fov > 0.0 && v.fov <= PI) {
            return Err(ConfigError::InvalidFov {
                scene: scene(),
                fov: v.fov,
            });
        }
        let hotspot_angles = self
            .link_hotspots
            .iter()
            .flat_map(|h| [h.yaw, h.pitch, h.rotation])
            .chain(self.info_hotspots.iter().flat_map(|h| [h.yaw, h.pitch]));
        for a in hotspot_angles {
            if !a.is_finite() {
                return Err(ConfigError::NonFiniteAngle { scene: scene() });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub settings: Settings,
}

impl ProductConfig {
    /// Parse and validate a configuration payload.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: ProductConfig = serde_json::from_str(text)?;
        config.validate()?;
        for (scene, target) in config.dangling_links() {
            log::warn!("[config] scene {scene:?} links to unknown scene {target:?}");
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenes.is_empty() {
            return Err(ConfigError::NoScenes);
        }
        let mut seen = HashSet::with_capacity(self.scenes.len());
        for s in &self.scenes {
            if !seen.insert(s.id.as_str()) {
                return Err(ConfigError::DuplicateSceneId(s.id.clone()));
            }
            s.validate()?;
        }
        Ok(())
    }

    pub fn find_scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// `(scene id, target)` for every link hotspot whose target is not a
    /// scene of this product. Such links stay in place but do nothing.
    pub fn dangling_links(&self) -> Vec<(&str, &str)> {
        self.scenes
            .iter()
            .flat_map(|s| s.link_hotspots.iter().map(move |h| (s, h)))
            .filter(|(_, h)| self.find_scene(&h.target).is_none())
            .map(|(s, h)| (s.id.as_str(), h.target.as_str()))
            .collect()
    }
}
