use crate::constants::{
    AUTOROTATE_TOGGLE_ID, CURRENT_CLASS, ENABLED_CLASS, FULLSCREEN_TOGGLE_ID,
    HOTSPOT_SWALLOWED_EVENTS, SCENE_ENTRY_SELECTOR, SCENE_LIST_ID, SCENE_LIST_ITEMS_SELECTOR,
    SCENE_LIST_TOGGLE_ID, SCENE_NAME_SELECTOR, TRANSFORM_PROPERTIES, VISIBLE_CLASS,
};
use crate::dom;
use crate::events::view_control_id;
use fnv::FnvHashMap;
use pano_core::{
    rotate_transform, Command, InfoHotspotId, InfoHotspotView, LinkHotspotView, Nudge,
    SceneListEntry, Ui, CLOSE_ICON_URL, INFO_ICON_URL, LINK_ICON_URL,
};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Forwards page events to the controller.
pub type Dispatcher = Rc<dyn Fn(Command)>;

struct InfoElements {
    panel: web::Element,
    modal: web::Element,
}

/// The viewer page. Hotspot and scene-list listeners are owned here and
/// dropped with the elements they belong to.
pub struct WebUi {
    document: web::Document,
    dispatch: Dispatcher,
    compact: Option<web::MediaQueryList>,
    scene_name: Option<web::Element>,
    scene_list: Option<web::Element>,
    scene_list_toggle: Option<web::Element>,
    autorotate_toggle: Option<web::Element>,
    fullscreen_toggle: Option<web::Element>,
    info: FnvHashMap<InfoHotspotId, InfoElements>,
    hotspot_listeners: Vec<Closure<dyn FnMut()>>,
    list_listeners: Vec<Closure<dyn FnMut()>>,
    swallow: Closure<dyn FnMut(web::Event)>,
}

impl WebUi {
    pub fn new(
        document: web::Document,
        dispatch: Dispatcher,
        compact: Option<web::MediaQueryList>,
    ) -> Self {
        let scene_name = document.query_selector(SCENE_NAME_SELECTOR).ok().flatten();
        let scene_list = document.get_element_by_id(SCENE_LIST_ID);
        let scene_list_toggle = document.get_element_by_id(SCENE_LIST_TOGGLE_ID);
        let autorotate_toggle = document.get_element_by_id(AUTOROTATE_TOGGLE_ID);
        let fullscreen_toggle = document.get_element_by_id(FULLSCREEN_TOGGLE_ID);
        let swallow = Closure::wrap(Box::new(|ev: web::Event| ev.stop_propagation())
            as Box<dyn FnMut(web::Event)>);
        Self {
            document,
            dispatch,
            compact,
            scene_name,
            scene_list,
            scene_list_toggle,
            autorotate_toggle,
            fullscreen_toggle,
            info: FnvHashMap::default(),
            hotspot_listeners: Vec::new(),
            list_listeners: Vec::new(),
            swallow,
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatch.clone()
    }

    fn on_click(&self, target: &web::EventTarget, command: Command) -> Closure<dyn FnMut()> {
        let dispatch = self.dispatch.clone();
        let closure = Closure::wrap(Box::new(move || dispatch(command.clone())) as Box<dyn FnMut()>);
        _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure
    }

    fn swallow_touch_and_scroll(&self, el: &web::Element) {
        for ev in HOTSPOT_SWALLOWED_EVENTS {
            _ = el.add_event_listener_with_callback(ev, self.swallow.as_ref().unchecked_ref());
        }
    }

    fn create(&self, tag: &str, classes: &[&str]) -> Option<web::Element> {
        dom::create(&self.document, tag, classes)
    }

    fn icon(&self, src: &str, class: &str) -> Option<web::Element> {
        let img = self.create("img", &[class])?;
        _ = img.set_attribute("src", src);
        Some(img)
    }

    fn build_info_content(&self, hotspot: &InfoHotspotView) -> Option<web::Element> {
        let wrapper = self.create("div", &["hotspot", "info-hotspot"])?;
        let header = self.create("div", &["info-hotspot-header"])?;

        let icon_wrapper = self.create("div", &["info-hotspot-icon-wrapper"])?;
        _ = icon_wrapper.append_child(&self.icon(INFO_ICON_URL, "info-hotspot-icon")?);

        let title_wrapper = self.create("div", &["info-hotspot-title-wrapper"])?;
        let title = self.create("div", &["info-hotspot-title"])?;
        title.set_inner_html(&hotspot.title_html);
        _ = title_wrapper.append_child(&title);

        let close_wrapper = self.create("div", &["info-hotspot-close-wrapper"])?;
        _ = close_wrapper.append_child(&self.icon(CLOSE_ICON_URL, "info-hotspot-close-icon")?);

        _ = header.append_child(&icon_wrapper);
        _ = header.append_child(&title_wrapper);
        _ = header.append_child(&close_wrapper);

        let text = self.create("div", &["info-hotspot-text"])?;
        text.set_inner_html(&hotspot.text_html);

        _ = wrapper.append_child(&header);
        _ = wrapper.append_child(&text);
        Some(wrapper)
    }
}

impl Ui for WebUi {
    type Element = web::Element;

    fn is_compact(&self) -> bool {
        match &self.compact {
            Some(mql) => mql.matches(),
            None => false,
        }
    }

    fn set_document_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn set_scene_title(&mut self, html: &str) {
        if let Some(el) = &self.scene_name {
            el.set_inner_html(html);
        }
    }

    fn render_scene_list(&mut self, entries: &[SceneListEntry<'_>]) {
        let Ok(Some(list)) = self.document.query_selector(SCENE_LIST_ITEMS_SELECTOR) else {
            log::debug!("[ui] no scene list container");
            return;
        };
        while let Some(child) = list.first_child() {
            _ = list.remove_child(&child);
        }
        self.list_listeners.clear();

        for entry in entries {
            let Some(link) = self.create("a", &["scene"]) else {
                continue;
            };
            _ = link.set_attribute("data-id", entry.id);
            _ = link.set_attribute("href", "javascript:void(0)");
            if let Some(text) = self.create("li", &["text"]) {
                text.set_text_content(Some(entry.name));
                _ = link.append_child(&text);
            }
            let listener = self.on_click(&link, Command::SelectScene(entry.id.to_string()));
            self.list_listeners.push(listener);
            _ = list.append_child(&link);
        }
    }

    fn highlight_scene(&mut self, id: &str) {
        let Ok(nodes) = self.document.query_selector_all(SCENE_ENTRY_SELECTOR) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                let current = el.get_attribute("data-id").as_deref() == Some(id);
                dom::set_class(&el, CURRENT_CLASS, current);
            }
        }
    }

    fn set_scene_list_open(&mut self, open: bool) {
        for el in [&self.scene_list, &self.scene_list_toggle].into_iter().flatten() {
            dom::set_class(el, ENABLED_CLASS, open);
        }
    }

    fn set_autorotate_enabled(&mut self, enabled: bool) {
        if let Some(el) = &self.autorotate_toggle {
            dom::set_class(el, ENABLED_CLASS, enabled);
        }
    }

    fn fullscreen_supported(&self) -> bool {
        self.document.fullscreen_enabled()
    }

    fn set_fullscreen_button(&mut self, visible: bool) {
        dom::body_class(&self.document, "fullscreen-enabled", visible);
        dom::body_class(&self.document, "fullscreen-disabled", !visible);
        if let Some(el) = &self.fullscreen_toggle {
            let style = if visible { "display:block" } else { "display:none" };
            _ = el.set_attribute("style", style);
        }
    }

    fn toggle_fullscreen(&mut self) {
        if self.document.fullscreen_element().is_some() {
            self.document.exit_fullscreen();
        } else if let Some(root) = self.document.document_element() {
            if let Err(e) = root.request_fullscreen() {
                log::warn!("[ui] fullscreen request refused: {:?}", e);
            }
        }
    }

    fn set_view_controls(&mut self, visible: bool) {
        dom::body_class(&self.document, "view-control-buttons", visible);
    }

    fn view_control(&self, dir: Nudge) -> Option<web::Element> {
        self.document.get_element_by_id(view_control_id(dir))
    }

    fn link_hotspot(&mut self, hotspot: &LinkHotspotView<'_>) -> Option<web::Element> {
        let wrapper = self.create("div", &["hotspot", "link-hotspot"])?;

        let icon = self.icon(LINK_ICON_URL, "link-hotspot-icon")?;
        let transform = rotate_transform(hotspot.rotation);
        let style: String = TRANSFORM_PROPERTIES
            .iter()
            .map(|p| format!("{p}: {transform};"))
            .collect();
        _ = icon.set_attribute("style", &style);

        let listener = self.on_click(&wrapper, Command::FollowLink(hotspot.target.to_string()));
        self.hotspot_listeners.push(listener);
        self.swallow_touch_and_scroll(&wrapper);

        let tooltip = self.create("div", &["hotspot-tooltip", "link-hotspot-tooltip"])?;
        if let Some(html) = &hotspot.tooltip_html {
            tooltip.set_inner_html(html);
        }

        _ = wrapper.append_child(&icon);
        _ = wrapper.append_child(&tooltip);
        Some(wrapper)
    }

    fn info_hotspot(&mut self, hotspot: &InfoHotspotView) -> Option<web::Element> {
        let panel = self.build_info_content(hotspot)?;

        // Small viewports show the same content as a modal.
        let modal = self.create("div", &["info-hotspot-modal"])?;
        modal.set_inner_html(&panel.inner_html());
        if let Some(body) = self.document.body() {
            _ = body.append_child(&modal);
        }

        let toggle = Command::ToggleInfo(hotspot.id);
        if let Ok(Some(header)) = panel.query_selector(".info-hotspot-header") {
            let listener = self.on_click(&header, toggle.clone());
            self.hotspot_listeners.push(listener);
        }
        if let Ok(Some(close)) = modal.query_selector(".info-hotspot-close-wrapper") {
            let listener = self.on_click(&close, toggle);
            self.hotspot_listeners.push(listener);
        }

        self.swallow_touch_and_scroll(&panel);
        self.swallow_touch_and_scroll(&modal);

        self.info.insert(
            hotspot.id,
            InfoElements {
                panel: panel.clone(),
                modal,
            },
        );
        Some(panel)
    }

    fn set_info_visible(&mut self, id: InfoHotspotId, visible: bool) {
        if let Some(els) = self.info.get(&id) {
            dom::set_class(&els.panel, VISIBLE_CLASS, visible);
            dom::set_class(&els.modal, VISIBLE_CLASS, visible);
        }
    }

    fn clear_hotspots(&mut self) {
        for (_, els) in self.info.drain() {
            els.modal.remove();
        }
        self.hotspot_listeners.clear();
    }
}
