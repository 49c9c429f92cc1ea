// In-memory stand-ins for the rendering engine, the page, and the
// configuration source, shared by the host-side tests.

#![allow(dead_code)]

use pano_core::{
    Autorotate, ConfigSource, Controller, Engine, EngineError, EngineScene, HotspotPosition,
    IdleMovement, InfoHotspotId, InfoHotspotView, LinkHotspotView, LoadError, LoadedProduct, Nudge,
    PressControl, ProductConfig, SceneDescriptor, SceneListEntry, TileLevel, Ui, ViewParameters,
    Viewer, ViewerOptions,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

pub const SINGLE_SCENE_KEY: &str = "000565a39fc5c236";
pub const SINGLE_SCENE_JSON: &str = include_str!("../../data/000565a39fc5c236.json");
pub const OTHER_JSON: &str = include_str!("../../data/0020ca9e6b6b5d9d.json");

/// Three scenes linked in a ring, plus info hotspots and a dangling link.
pub const TOUR_JSON: &str = r#"{
  "name": "Tour <demo>",
  "settings": { "mouseViewMode": "qtvr", "autorotateEnabled": true },
  "scenes": [
    {
      "id": "lobby", "name": "Lobby & Hall",
      "levels": [ { "tileSize": 256, "size": 256, "fallbackOnly": true }, { "tileSize": 512, "size": 512 } ],
      "faceSize": 512,
      "initialViewParameters": { "yaw": 0.5, "pitch": -0.1, "fov": 1.2 },
      "linkHotspots": [
        { "yaw": 1.0, "pitch": 0.0, "rotation": 0.7, "target": "kitchen" },
        { "yaw": 2.0, "pitch": 0.1, "rotation": 0.0, "target": "nonexistent" }
      ],
      "infoHotspots": [ { "yaw": 0.2, "pitch": 0.3, "title": "<b>Desk</b>", "text": "Reception" } ]
    },
    {
      "id": "kitchen", "name": "Kitchen",
      "levels": [ { "tileSize": 512, "size": 512 } ],
      "faceSize": 512,
      "initialViewParameters": { "yaw": -1.0, "pitch": 0.2, "fov": 1.0 },
      "linkHotspots": [ { "yaw": 3.0, "pitch": 0.0, "rotation": 0.0, "target": "garden" } ]
    },
    {
      "id": "garden", "name": "Garden",
      "levels": [ { "tileSize": 512, "size": 512 } ],
      "faceSize": 512,
      "initialViewParameters": { "yaw": 0.0, "pitch": 0.0, "fov": 1.5 },
      "linkHotspots": [ { "yaw": 0.0, "pitch": 0.0, "rotation": 0.0, "target": "lobby" } ],
      "infoHotspots": [
        { "yaw": 0.0, "pitch": 0.5, "title": "Pond", "text": "Koi" },
        { "yaw": 1.0, "pitch": 0.5, "title": "Tree", "text": "Oak" }
      ]
    }
  ]
}"#;

pub fn loaded(key: &str, json: &str) -> LoadedProduct {
    LoadedProduct {
        key: key.to_string(),
        config: ProductConfig::from_json(json).expect("fixture parses"),
    }
}

// ---------------- Engine ----------------

#[derive(Clone, Debug, PartialEq)]
pub enum Movement {
    Start(Autorotate),
    Stop,
    Idle(IdleMovement),
}

#[derive(Default)]
pub struct EngineState {
    pub viewer_options: Vec<ViewerOptions>,
    pub next_scene: usize,
    pub active: Option<usize>,
    pub live: Vec<usize>,
    pub destroyed: Vec<usize>,
    pub views: HashMap<usize, ViewParameters>,
    pub hotspots: HashMap<usize, Vec<(String, HotspotPosition)>>,
    pub descriptors: Vec<(String, String, Vec<TileLevel>, u32)>,
    pub movements: Vec<Movement>,
    pub press_controls: Vec<(String, String, PressControl)>,
    /// Scene creations allowed before `create_scene` starts failing.
    pub fail_after: Option<usize>,
}

pub type SharedEngine = Rc<RefCell<EngineState>>;

pub struct FakeEngine(pub SharedEngine);
pub struct FakeViewer(SharedEngine);
pub struct FakeScene {
    pub handle: usize,
    state: SharedEngine,
}

impl Engine for FakeEngine {
    type Viewer = FakeViewer;

    fn create_viewer(&mut self, options: &ViewerOptions) -> Result<FakeViewer, EngineError> {
        self.0.borrow_mut().viewer_options.push(*options);
        Ok(FakeViewer(self.0.clone()))
    }
}

impl Viewer for FakeViewer {
    type Element = String;
    type Scene = FakeScene;

    fn create_scene(&mut self, desc: &SceneDescriptor<'_>) -> Result<FakeScene, EngineError> {
        let mut st = self.0.borrow_mut();
        if let Some(n) = st.fail_after {
            if st.descriptors.len() >= n {
                return Err(EngineError("out of textures".into()));
            }
        }
        let handle = st.next_scene;
        st.next_scene += 1;
        st.live.push(handle);
        st.views.insert(handle, desc.initial_view);
        st.descriptors.push((
            desc.tile_url.clone(),
            desc.preview_url.clone(),
            desc.levels.to_vec(),
            desc.limits.max_resolution,
        ));
        Ok(FakeScene {
            handle,
            state: self.0.clone(),
        })
    }

    fn start_movement(&mut self, motion: &Autorotate) {
        self.0.borrow_mut().movements.push(Movement::Start(*motion));
    }

    fn stop_movement(&mut self) {
        self.0.borrow_mut().movements.push(Movement::Stop);
    }

    fn set_idle_movement(&mut self, idle: IdleMovement) {
        self.0.borrow_mut().movements.push(Movement::Idle(idle));
    }

    fn register_press_control(&mut self, id: &str, element: String, control: PressControl) {
        self.0
            .borrow_mut()
            .press_controls
            .push((id.to_string(), element, control));
    }
}

impl EngineScene for FakeScene {
    type Element = String;

    fn switch_to(&mut self) {
        self.state.borrow_mut().active = Some(self.handle);
    }

    fn is_active(&self) -> bool {
        self.state.borrow().active == Some(self.handle)
    }

    fn view_parameters(&self) -> ViewParameters {
        self.state.borrow().views[&self.handle]
    }

    fn set_view_parameters(&mut self, params: ViewParameters) {
        self.state.borrow_mut().views.insert(self.handle, params);
    }

    fn create_hotspot(&mut self, element: String, position: HotspotPosition) {
        self.state
            .borrow_mut()
            .hotspots
            .entry(self.handle)
            .or_default()
            .push((element, position));
    }

    fn destroy_hotspots(&mut self) {
        self.state.borrow_mut().hotspots.remove(&self.handle);
    }

    fn destroy(self) {
        let mut st = self.state.borrow_mut();
        st.live.retain(|h| *h != self.handle);
        st.destroyed.push(self.handle);
        if st.active == Some(self.handle) {
            st.active = None;
        }
    }
}

// ---------------- Page ----------------

#[derive(Default)]
pub struct UiState {
    pub compact: bool,
    pub fullscreen_supported: bool,
    pub document_title: Option<String>,
    pub scene_title: Option<String>,
    pub scene_list: Vec<(String, String)>,
    pub highlighted: Option<String>,
    pub list_open: Option<bool>,
    pub autorotate_enabled: Option<bool>,
    pub fullscreen_button: Option<bool>,
    pub fullscreen_toggles: usize,
    pub view_controls: Option<bool>,
    pub missing_controls: Vec<Nudge>,
    pub links: Vec<(String, f64, Option<String>)>,
    pub infos: Vec<InfoHotspotView>,
    pub info_visible: HashMap<InfoHotspotId, bool>,
    pub modals: usize,
    pub clears: usize,
}

pub type SharedUi = Rc<RefCell<UiState>>;

pub struct FakeUi(pub SharedUi);

impl Ui for FakeUi {
    type Element = String;

    fn is_compact(&self) -> bool {
        self.0.borrow().compact
    }

    fn set_document_title(&mut self, title: &str) {
        self.0.borrow_mut().document_title = Some(title.to_string());
    }

    fn set_scene_title(&mut self, html: &str) {
        self.0.borrow_mut().scene_title = Some(html.to_string());
    }

    fn render_scene_list(&mut self, entries: &[SceneListEntry<'_>]) {
        self.0.borrow_mut().scene_list = entries
            .iter()
            .map(|e| (e.id.to_string(), e.name.to_string()))
            .collect();
    }

    fn highlight_scene(&mut self, id: &str) {
        self.0.borrow_mut().highlighted = Some(id.to_string());
    }

    fn set_scene_list_open(&mut self, open: bool) {
        self.0.borrow_mut().list_open = Some(open);
    }

    fn set_autorotate_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().autorotate_enabled = Some(enabled);
    }

    fn fullscreen_supported(&self) -> bool {
        self.0.borrow().fullscreen_supported
    }

    fn set_fullscreen_button(&mut self, visible: bool) {
        self.0.borrow_mut().fullscreen_button = Some(visible);
    }

    fn toggle_fullscreen(&mut self) {
        self.0.borrow_mut().fullscreen_toggles += 1;
    }

    fn set_view_controls(&mut self, visible: bool) {
        self.0.borrow_mut().view_controls = Some(visible);
    }

    fn view_control(&self, dir: Nudge) -> Option<String> {
        if self.0.borrow().missing_controls.contains(&dir) {
            None
        } else {
            Some(format!("control:{dir:?}"))
        }
    }

    fn link_hotspot(&mut self, hotspot: &LinkHotspotView<'_>) -> Option<String> {
        self.0.borrow_mut().links.push((
            hotspot.target.to_string(),
            hotspot.rotation,
            hotspot.tooltip_html.clone(),
        ));
        Some(format!("link:{}", hotspot.target))
    }

    fn info_hotspot(&mut self, hotspot: &InfoHotspotView) -> Option<String> {
        let mut st = self.0.borrow_mut();
        st.infos.push(hotspot.clone());
        st.modals += 1;
        Some(format!("info:{}:{}", hotspot.id.scene, hotspot.id.index))
    }

    fn set_info_visible(&mut self, id: InfoHotspotId, visible: bool) {
        self.0.borrow_mut().info_visible.insert(id, visible);
    }

    fn clear_hotspots(&mut self) {
        let mut st = self.0.borrow_mut();
        st.modals = 0;
        st.info_visible.clear();
        st.clears += 1;
    }
}

pub type TestController = Controller<FakeEngine, FakeUi>;

pub fn controller_with(ui: UiState) -> (TestController, SharedEngine, SharedUi) {
    let engine = SharedEngine::default();
    let ui = Rc::new(RefCell::new(ui));
    let controller = Controller::new(FakeEngine(engine.clone()), FakeUi(ui.clone()));
    (controller, engine, ui)
}

pub fn controller() -> (TestController, SharedEngine, SharedUi) {
    controller_with(UiState {
        fullscreen_supported: true,
        ..UiState::default()
    })
}

// ---------------- Configuration source ----------------

/// Yields to the executor once before completing.
pub struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Serves configurations from memory; keys mapped to `Err(status)` fail with
/// that HTTP status, unknown keys fail as unreachable.
#[derive(Default)]
pub struct MapSource {
    pub entries: HashMap<String, Result<String, u16>>,
    pub calls: RefCell<Vec<String>>,
    pub yielding: bool,
}

impl MapSource {
    pub fn with(mut self, key: &str, entry: Result<&str, u16>) -> Self {
        self.entries.insert(key.to_string(), entry.map(str::to_string));
        self
    }
}

impl ConfigSource for MapSource {
    async fn fetch(&self, key: &str) -> Result<ProductConfig, LoadError> {
        self.calls.borrow_mut().push(key.to_string());
        if self.yielding {
            YieldOnce(false).await;
        }
        match self.entries.get(key) {
            Some(Ok(text)) => ProductConfig::from_json(text).map_err(|e| LoadError::invalid(key, e)),
            Some(Err(status)) => Err(LoadError::Status {
                key: key.to_string(),
                status: *status,
            }),
            None => Err(LoadError::Fetch {
                key: key.to_string(),
                reason: "unreachable".into(),
            }),
        }
    }
}

/// Poll a future once without an executor.
pub fn poll_once<F: Future>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}
