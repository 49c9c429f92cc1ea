//! Bindings to the Marzipano global and the engine traits implemented on
//! top of them.

use pano_core::{
    Autorotate, Engine, EngineError, EngineScene, HotspotPosition, IdleMovement, PressControl,
    SceneDescriptor, ViewParameters, Viewer, ViewerOptions,
};
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen(js_namespace = Marzipano)]
extern "C" {
    #[wasm_bindgen(js_name = Viewer)]
    #[derive(Clone)]
    type JsViewer;

    #[wasm_bindgen(constructor, js_class = "Viewer", catch)]
    fn new(element: &web::Element, opts: &JsValue) -> Result<JsViewer, JsValue>;

    #[wasm_bindgen(method, js_class = "Viewer", js_name = createScene, catch)]
    fn create_scene(this: &JsViewer, opts: &JsValue) -> Result<JsScene, JsValue>;

    #[wasm_bindgen(method, js_class = "Viewer")]
    fn scene(this: &JsViewer) -> JsValue;

    #[wasm_bindgen(method, js_class = "Viewer", js_name = startMovement)]
    fn start_movement(this: &JsViewer, movement: &js_sys::Function);

    #[wasm_bindgen(method, js_class = "Viewer", js_name = stopMovement)]
    fn stop_movement(this: &JsViewer);

    #[wasm_bindgen(method, js_class = "Viewer", js_name = setIdleMovement)]
    fn set_idle_movement(this: &JsViewer, timeout: f64, movement: &JsValue);

    #[wasm_bindgen(method, js_class = "Viewer")]
    fn controls(this: &JsViewer) -> JsControls;

    #[wasm_bindgen(js_name = Controls)]
    type JsControls;

    #[wasm_bindgen(method, js_class = "Controls", js_name = registerMethod)]
    fn register_method(this: &JsControls, id: &str, method: &JsElementPressControlMethod, enable: bool);

    #[wasm_bindgen(js_name = ElementPressControlMethod)]
    type JsElementPressControlMethod;

    #[wasm_bindgen(constructor, js_class = "ElementPressControlMethod")]
    fn new(
        element: &web::Element,
        parameter: &str,
        velocity: f64,
        friction: f64,
    ) -> JsElementPressControlMethod;

    #[wasm_bindgen(js_name = Scene)]
    #[derive(Clone)]
    type JsScene;

    #[wasm_bindgen(method, js_class = "Scene", js_name = switchTo)]
    fn switch_to(this: &JsScene);

    #[wasm_bindgen(method, js_class = "Scene", js_name = hotspotContainer)]
    fn hotspot_container(this: &JsScene) -> JsHotspotContainer;

    #[wasm_bindgen(method, js_class = "Scene")]
    fn destroy(this: &JsScene);

    #[wasm_bindgen(js_name = HotspotContainer)]
    type JsHotspotContainer;

    #[wasm_bindgen(method, js_class = "HotspotContainer", js_name = createHotspot)]
    fn create_hotspot(this: &JsHotspotContainer, element: &web::Element, position: &JsValue);

    #[wasm_bindgen(method, js_class = "HotspotContainer", js_name = destroyHotspots)]
    fn destroy_hotspots(this: &JsHotspotContainer);

    #[wasm_bindgen(js_name = ImageUrlSource)]
    type JsImageUrlSource;

    #[wasm_bindgen(static_method_of = JsImageUrlSource, js_class = "ImageUrlSource", js_name = fromString)]
    fn from_string(url: &str, opts: &JsValue) -> JsImageUrlSource;

    #[wasm_bindgen(js_name = CubeGeometry)]
    type JsCubeGeometry;

    #[wasm_bindgen(constructor, js_class = "CubeGeometry")]
    fn new(levels: &JsValue) -> JsCubeGeometry;

    #[wasm_bindgen(js_name = RectilinearView)]
    #[derive(Clone)]
    type JsRectilinearView;

    #[wasm_bindgen(constructor, js_class = "RectilinearView")]
    fn new(params: &JsValue, limiter: &JsValue) -> JsRectilinearView;

    #[wasm_bindgen(method, js_class = "RectilinearView")]
    fn yaw(this: &JsRectilinearView) -> f64;

    #[wasm_bindgen(method, js_class = "RectilinearView")]
    fn pitch(this: &JsRectilinearView) -> f64;

    #[wasm_bindgen(method, js_class = "RectilinearView")]
    fn fov(this: &JsRectilinearView) -> f64;

    #[wasm_bindgen(method, js_class = "RectilinearView", js_name = setParameters)]
    fn set_parameters(this: &JsRectilinearView, params: &JsValue);

    #[wasm_bindgen(js_name = autorotate)]
    fn js_autorotate(opts: &JsValue) -> js_sys::Function;
}

#[wasm_bindgen(js_namespace = ["Marzipano", "RectilinearView", "limit"])]
extern "C" {
    #[wasm_bindgen(js_name = traditional)]
    fn limit_traditional(max_resolution: f64, max_vfov: f64, max_hfov: f64) -> JsValue;
}

fn js_err(e: JsValue) -> EngineError {
    EngineError(format!("{:?}", e))
}

/// Plain JS object from key/value pairs.
fn object(pairs: &[(&str, JsValue)]) -> JsValue {
    let obj = js_sys::Object::new();
    for (k, v) in pairs {
        _ = js_sys::Reflect::set(&obj, &JsValue::from_str(k), v);
    }
    obj.into()
}

fn view_object(p: &ViewParameters) -> JsValue {
    object(&[
        ("yaw", p.yaw.into()),
        ("pitch", p.pitch.into()),
        ("fov", p.fov.into()),
    ])
}

fn motion_function(motion: &Autorotate) -> js_sys::Function {
    js_autorotate(&object(&[
        ("yawSpeed", motion.yaw_speed.into()),
        ("targetPitch", motion.target_pitch.into()),
        ("targetFov", motion.target_fov.into()),
    ]))
}

pub struct MarzipanoEngine {
    mount: web::Element,
}

impl MarzipanoEngine {
    pub fn new(mount: web::Element) -> Self {
        Self { mount }
    }
}

impl Engine for MarzipanoEngine {
    type Viewer = MarzipanoViewer;

    fn create_viewer(&mut self, options: &ViewerOptions) -> Result<MarzipanoViewer, EngineError> {
        let controls = object(&[("mouseViewMode", options.mouse_view_mode.as_str().into())]);
        let viewer = JsViewer::new(&self.mount, &object(&[("controls", controls)])).map_err(js_err)?;
        Ok(MarzipanoViewer {
            viewer,
            motion: None,
        })
    }
}

pub struct MarzipanoViewer {
    viewer: JsViewer,
    // Reused so start and idle movement hand the engine the same function.
    motion: Option<(Autorotate, js_sys::Function)>,
}

impl MarzipanoViewer {
    fn motion(&mut self, motion: &Autorotate) -> js_sys::Function {
        match &self.motion {
            Some((m, f)) if m == motion => f.clone(),
            _ => {
                let f = motion_function(motion);
                self.motion = Some((*motion, f.clone()));
                f
            }
        }
    }
}

impl Viewer for MarzipanoViewer {
    type Element = web::Element;
    type Scene = MarzipanoScene;

    fn create_scene(&mut self, desc: &SceneDescriptor<'_>) -> Result<MarzipanoScene, EngineError> {
        let source = JsImageUrlSource::from_string(
            &desc.tile_url,
            &object(&[("cubeMapPreviewUrl", desc.preview_url.as_str().into())]),
        );
        #[allow(deprecated)]
        let levels = JsValue::from_serde(desc.levels).map_err(|e| EngineError(e.to_string()))?;
        let geometry = JsCubeGeometry::new(&levels);
        let limiter = limit_traditional(
            desc.limits.max_resolution as f64,
            desc.limits.max_vfov,
            desc.limits.max_hfov,
        );
        let view = JsRectilinearView::new(&view_object(&desc.initial_view), &limiter);
        let scene = self
            .viewer
            .create_scene(&object(&[
                ("source", source.into()),
                ("geometry", geometry.into()),
                ("view", view.clone().into()),
                ("pinFirstLevel", desc.pin_first_level.into()),
            ]))
            .map_err(js_err)?;
        Ok(MarzipanoScene {
            viewer: self.viewer.clone(),
            scene,
            view,
        })
    }

    fn start_movement(&mut self, motion: &Autorotate) {
        let f = self.motion(motion);
        self.viewer.start_movement(&f);
    }

    fn stop_movement(&mut self) {
        self.viewer.stop_movement();
    }

    fn set_idle_movement(&mut self, idle: IdleMovement) {
        match idle {
            IdleMovement::Never => self
                .viewer
                .set_idle_movement(f64::INFINITY, &JsValue::UNDEFINED),
            IdleMovement::After { delay_ms, motion } => {
                let f = self.motion(&motion);
                self.viewer.set_idle_movement(delay_ms as f64, &f);
            }
        }
    }

    fn register_press_control(&mut self, id: &str, element: web::Element, control: PressControl) {
        let method = JsElementPressControlMethod::new(
            &element,
            control.axis.as_str(),
            control.velocity,
            control.friction,
        );
        self.viewer.controls().register_method(id, &method, true);
    }
}

pub struct MarzipanoScene {
    viewer: JsViewer,
    scene: JsScene,
    view: JsRectilinearView,
}

impl EngineScene for MarzipanoScene {
    type Element = web::Element;

    fn switch_to(&mut self) {
        self.scene.switch_to();
    }

    fn is_active(&self) -> bool {
        js_sys::Object::is(&self.viewer.scene(), &self.scene)
    }

    fn view_parameters(&self) -> ViewParameters {
        ViewParameters {
            yaw: self.view.yaw(),
            pitch: self.view.pitch(),
            fov: self.view.fov(),
        }
    }

    fn set_view_parameters(&mut self, params: ViewParameters) {
        self.view.set_parameters(&view_object(&params));
    }

    fn create_hotspot(&mut self, element: web::Element, position: HotspotPosition) {
        let pos = object(&[("yaw", position.yaw.into()), ("pitch", position.pitch.into())]);
        self.scene.hotspot_container().create_hotspot(&element, &pos);
    }

    fn destroy_hotspots(&mut self) {
        self.scene.hotspot_container().destroy_hotspots();
    }

    fn destroy(self) {
        self.scene.destroy();
    }
}
