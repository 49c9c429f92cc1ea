//! Seam to the external cube-map rendering engine. The engine owns tile
//! loading, projection, view limiting and motion easing; the controller
//! only drives it through these traits.

use crate::config::{MouseViewMode, Scene, TileLevel};
use crate::route::{preview_url, tile_url_template};
use crate::view::{Autorotate, IdleMovement, PressControl, ViewLimits, ViewParameters};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("rendering engine error: {0}")]
pub struct EngineError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerOptions {
    pub mouse_view_mode: MouseViewMode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HotspotPosition {
    pub yaw: f64,
    pub pitch: f64,
}

/// Everything the engine needs to build one cube-map scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescriptor<'a> {
    pub tile_url: String,
    pub preview_url: String,
    pub levels: &'a [TileLevel],
    pub limits: ViewLimits,
    pub initial_view: ViewParameters,
    pub pin_first_level: bool,
}

impl<'a> SceneDescriptor<'a> {
    pub fn for_scene(product_key: &str, scene: &'a Scene) -> Self {
        Self {
            tile_url: tile_url_template(product_key),
            preview_url: preview_url(product_key),
            levels: &scene.levels,
            limits: ViewLimits::traditional(scene.face_size),
            initial_view: scene.initial_view_parameters,
            pin_first_level: true,
        }
    }
}

pub trait Engine {
    type Viewer: Viewer;

    fn create_viewer(&mut self, options: &ViewerOptions) -> Result<Self::Viewer, EngineError>;
}

pub trait Viewer {
    /// Presentation element a hotspot is rendered with.
    type Element;
    type Scene: EngineScene<Element = Self::Element>;

    fn create_scene(&mut self, desc: &SceneDescriptor<'_>) -> Result<Self::Scene, EngineError>;
    fn start_movement(&mut self, motion: &Autorotate);
    fn stop_movement(&mut self);
    fn set_idle_movement(&mut self, idle: IdleMovement);
    /// Move the view continuously while `element` is pressed.
    fn register_press_control(&mut self, id: &str, element: Self::Element, control: PressControl);
}

pub trait EngineScene {
    type Element;

    fn switch_to(&mut self);
    /// Engine-reported flag: this scene is the one being displayed.
    fn is_active(&self) -> bool;
    fn view_parameters(&self) -> ViewParameters;
    fn set_view_parameters(&mut self, params: ViewParameters);
    fn create_hotspot(&mut self, element: Self::Element, position: HotspotPosition);
    fn destroy_hotspots(&mut self);
    fn destroy(self);
}

pub type ElementOf<E> = <<E as Engine>::Viewer as Viewer>::Element;
pub type SceneOf<E> = <<E as Engine>::Viewer as Viewer>::Scene;
