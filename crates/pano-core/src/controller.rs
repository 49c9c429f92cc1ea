use crate::config::{ProductConfig, Scene, Settings};
use crate::constants::DEFAULT_DOCUMENT_TITLE;
use crate::engine::{
    ElementOf, Engine, EngineError, EngineScene, HotspotPosition, SceneDescriptor, SceneOf,
    Viewer, ViewerOptions,
};
use crate::loader::LoadedProduct;
use crate::ui::{
    escape_html, Command, InfoHotspotId, InfoHotspotView, LinkHotspotView, SceneListEntry, Ui,
};
use crate::view::{IdleMovement, Nudge, AUTOROTATE};
use fnv::FnvHashMap;

/// A configured scene paired with the engine scene built from it.
pub struct RuntimeScene<S> {
    pub data: Scene,
    pub scene: S,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    ViewerReady,
    ScenesBuilt,
    Displaying(usize),
}

/// Owns the single viewer and the runtime scenes of the loaded product, and
/// applies user commands to them.
pub struct Controller<E: Engine, U> {
    engine: E,
    ui: U,
    viewer: Option<E::Viewer>,
    scenes: Vec<RuntimeScene<SceneOf<E>>>,
    active: Option<usize>,
    product: Option<String>,
    autorotate_enabled: bool,
    scene_list_open: bool,
    info_visible: FnvHashMap<InfoHotspotId, bool>,
}

fn release<S: EngineScene>(mut scene: S) {
    scene.destroy_hotspots();
    scene.destroy();
}

impl<E, U> Controller<E, U>
where
    E: Engine,
    U: Ui<Element = ElementOf<E>>,
{
    pub fn new(engine: E, mut ui: U) -> Self {
        // The scene list starts open on desktop.
        let scene_list_open = !ui.is_compact();
        ui.set_scene_list_open(scene_list_open);
        Self {
            engine,
            ui,
            viewer: None,
            scenes: Vec::new(),
            active: None,
            product: None,
            autorotate_enabled: true,
            scene_list_open,
            info_visible: FnvHashMap::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.viewer, self.active) {
            (None, _) => Phase::Uninitialized,
            (Some(_), Some(i)) => Phase::Displaying(i),
            (Some(_), None) if !self.scenes.is_empty() => Phase::ScenesBuilt,
            (Some(_), None) => Phase::ViewerReady,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn viewer(&self) -> Option<&E::Viewer> {
        self.viewer.as_ref()
    }

    pub fn scenes(&self) -> &[RuntimeScene<SceneOf<E>>] {
        &self.scenes
    }

    pub fn active_scene(&self) -> Option<&RuntimeScene<SceneOf<E>>> {
        self.active.and_then(|i| self.scenes.get(i))
    }

    pub fn product(&self) -> Option<&str> {
        self.product.as_deref()
    }

    pub fn autorotate_enabled(&self) -> bool {
        self.autorotate_enabled
    }

    pub fn scene_list_open(&self) -> bool {
        self.scene_list_open
    }

    pub fn is_info_visible(&self, id: InfoHotspotId) -> Option<bool> {
        self.info_visible.get(&id).copied()
    }

    /// Rebuild everything for a freshly loaded product and display its first
    /// scene. The viewer is created on the first call and reused afterwards.
    pub fn on_configuration_loaded(&mut self, loaded: &LoadedProduct) -> Result<(), EngineError> {
        let config = &loaded.config;
        self.ensure_viewer(&config.settings)?;
        self.apply_settings(&config.settings);
        self.build_scenes(&loaded.key, config)?;

        let title = match config.name.trim() {
            "" => DEFAULT_DOCUMENT_TITLE,
            name => name,
        };
        self.ui.set_document_title(title);

        if let Some(first) = self.scenes.first().map(|s| s.data.id.clone()) {
            self.switch_scene(&first);
        }
        Ok(())
    }

    fn ensure_viewer(&mut self, settings: &Settings) -> Result<(), EngineError> {
        if self.viewer.is_some() {
            return Ok(());
        }
        let options = ViewerOptions {
            mouse_view_mode: settings.mouse_view_mode,
        };
        let mut viewer = self.engine.create_viewer(&options)?;
        let mut registered = 0;
        for dir in Nudge::ALL {
            if let Some(element) = self.ui.view_control(dir) {
                let control = dir.press_control();
                viewer.register_press_control(dir.control_method_id(), element, control);
                registered += 1;
            }
        }
        self.viewer = Some(viewer);
        log::info!(
            "[controller] viewer ready (mouse mode {}, {registered} press control(s))",
            options.mouse_view_mode.as_str()
        );
        Ok(())
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.autorotate_enabled = settings.autorotate_enabled;
        self.ui.set_autorotate_enabled(self.autorotate_enabled);
        if !self.autorotate_enabled {
            self.stop_autorotate();
        }
        let fullscreen = settings.fullscreen_button && self.ui.fullscreen_supported();
        self.ui.set_fullscreen_button(fullscreen);
        self.ui.set_view_controls(settings.view_control_buttons);
    }

    /// Replace the runtime scenes with ones built from `config`. Old scenes
    /// and their hotspots are destroyed first; the new list is swapped in only
    /// once every scene has been built.
    pub fn build_scenes(&mut self, key: &str, config: &ProductConfig) -> Result<(), EngineError> {
        self.teardown();

        let Some(viewer) = self.viewer.as_mut() else {
            return Err(EngineError("viewer not initialized".into()));
        };

        let mut built = Vec::with_capacity(config.scenes.len());
        for (scene_index, data) in config.scenes.iter().enumerate() {
            let desc = SceneDescriptor::for_scene(key, data);
            let mut scene = match viewer.create_scene(&desc) {
                Ok(s) => s,
                Err(e) => {
                    log::error!("[controller] could not build scene {:?}: {e}", data.id);
                    for rs in built {
                        let RuntimeScene { scene, .. } = rs;
                        release(scene);
                    }
                    self.ui.clear_hotspots();
                    self.info_visible.clear();
                    return Err(e);
                }
            };

            for link in &data.link_hotspots {
                let tooltip_html = config.find_scene(&link.target).map(|t| escape_html(&t.name));
                let view = LinkHotspotView {
                    target: &link.target,
                    rotation: link.rotation,
                    tooltip_html,
                };
                if let Some(element) = self.ui.link_hotspot(&view) {
                    let position = HotspotPosition {
                        yaw: link.yaw,
                        pitch: link.pitch,
                    };
                    scene.create_hotspot(element, position);
                }
            }

            for (index, info) in data.info_hotspots.iter().enumerate() {
                let id = InfoHotspotId {
                    scene: scene_index,
                    index,
                };
                let view = InfoHotspotView {
                    id,
                    title_html: escape_html(&info.title),
                    text_html: escape_html(&info.text),
                };
                if let Some(element) = self.ui.info_hotspot(&view) {
                    let position = HotspotPosition {
                        yaw: info.yaw,
                        pitch: info.pitch,
                    };
                    scene.create_hotspot(element, position);
                    self.info_visible.insert(id, false);
                }
            }

            built.push(RuntimeScene {
                data: data.clone(),
                scene,
            });
        }

        self.scenes = built;
        self.product = Some(key.to_string());

        let entries: Vec<SceneListEntry<'_>> = self
            .scenes
            .iter()
            .map(|s| SceneListEntry {
                id: &s.data.id,
                name: &s.data.name,
            })
            .collect();
        self.ui.render_scene_list(&entries);
        log::info!("[controller] built {} scene(s) for {key}", self.scenes.len());
        Ok(())
    }

    fn teardown(&mut self) {
        if !self.scenes.is_empty() {
            log::debug!("[controller] tearing down {} scene(s)", self.scenes.len());
        }
        for rs in self.scenes.drain(..) {
            release(rs.scene);
        }
        self.ui.clear_hotspots();
        self.ui.render_scene_list(&[]);
        self.ui.set_scene_title("");
        self.info_visible.clear();
        self.active = None;
    }

    pub fn find_scene_by_id(&self, id: &str) -> Option<&RuntimeScene<SceneOf<E>>> {
        self.scenes.iter().find(|s| s.data.id == id)
    }

    /// Display the scene with this id, reset to its initial view. Returns
    /// `false` without touching anything when no such scene is loaded.
    pub fn switch_scene(&mut self, id: &str) -> bool {
        let Some(index) = self.scenes.iter().position(|s| s.data.id == id) else {
            log::debug!("[controller] no scene {id:?}, ignoring switch");
            return false;
        };

        self.stop_autorotate();
        let rs = &mut self.scenes[index];
        rs.scene.set_view_parameters(rs.data.initial_view_parameters);
        rs.scene.switch_to();
        self.active = Some(index);
        self.start_autorotate();

        let title = escape_html(&self.scenes[index].data.name);
        self.ui.set_scene_title(&title);
        self.ui.highlight_scene(id);
        true
    }

    /// Step the engine-active scene's view. Returns whether a view moved.
    pub fn nudge(&mut self, dir: Nudge) -> bool {
        if self.viewer.is_none() {
            return false;
        }
        let Some(rs) = self.scenes.iter_mut().find(|s| s.scene.is_active()) else {
            return false;
        };
        let next = rs.scene.view_parameters().nudged(dir);
        rs.scene.set_view_parameters(next);
        true
    }

    pub fn start_autorotate(&mut self) {
        if !self.autorotate_enabled {
            return;
        }
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.start_movement(&AUTOROTATE);
            viewer.set_idle_movement(IdleMovement::autorotate());
        }
    }

    pub fn stop_autorotate(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.stop_movement();
            viewer.set_idle_movement(IdleMovement::Never);
        }
    }

    pub fn toggle_autorotate(&mut self) -> bool {
        self.autorotate_enabled = !self.autorotate_enabled;
        self.ui.set_autorotate_enabled(self.autorotate_enabled);
        if self.autorotate_enabled {
            self.start_autorotate();
        } else {
            self.stop_autorotate();
        }
        self.autorotate_enabled
    }

    pub fn toggle_fullscreen(&mut self) {
        if self.ui.fullscreen_supported() {
            self.ui.toggle_fullscreen();
        }
    }

    pub fn show_scene_list(&mut self) {
        self.set_scene_list_open(true);
    }

    pub fn hide_scene_list(&mut self) {
        self.set_scene_list_open(false);
    }

    pub fn toggle_scene_list(&mut self) {
        self.set_scene_list_open(!self.scene_list_open);
    }

    fn set_scene_list_open(&mut self, open: bool) {
        self.scene_list_open = open;
        self.ui.set_scene_list_open(open);
    }

    /// Flip an info hotspot's panel and modal. Unknown ids are ignored.
    pub fn toggle_info(&mut self, id: InfoHotspotId) -> Option<bool> {
        let visible = self.info_visible.get_mut(&id)?;
        *visible = !*visible;
        let visible = *visible;
        self.ui.set_info_visible(id, visible);
        Some(visible)
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::SelectScene(id) => {
                if self.switch_scene(&id) {
                    self.hide_scene_list();
                }
            }
            Command::FollowLink(target) => {
                if !self.switch_scene(&target) {
                    log::debug!("[controller] link to unknown scene {target:?}");
                }
            }
            Command::Nudge(dir) => {
                self.nudge(dir);
            }
            Command::ToggleAutorotate => {
                self.toggle_autorotate();
            }
            Command::ToggleFullscreen => self.toggle_fullscreen(),
            Command::ToggleSceneList => self.toggle_scene_list(),
            Command::ToggleInfo(id) => {
                self.toggle_info(id);
            }
        }
    }
}

impl<E: Engine, U> Drop for Controller<E, U> {
    fn drop(&mut self) {
        for rs in self.scenes.drain(..) {
            release(rs.scene);
        }
    }
}
