use crate::constants::{
    AUTOROTATE_TOGGLE_ID, ENABLED_CLASS, FULLSCREEN_TOGGLE_ID, PRODUCT_SELECTOR_ID,
    SCENE_LIST_TOGGLE_ID, VIEW_DOWN_ID, VIEW_IN_ID, VIEW_LEFT_ID, VIEW_OUT_ID, VIEW_RIGHT_ID,
    VIEW_UP_ID,
};
use crate::dom;
use crate::ui::Dispatcher;
use pano_core::{canonical_url, Command, Nudge, ProductCatalog};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn view_control_id(dir: Nudge) -> &'static str {
    match dir {
        Nudge::Up => VIEW_UP_ID,
        Nudge::Down => VIEW_DOWN_ID,
        Nudge::Left => VIEW_LEFT_ID,
        Nudge::Right => VIEW_RIGHT_ID,
        Nudge::In => VIEW_IN_ID,
        Nudge::Out => VIEW_OUT_ID,
    }
}

fn wire_command(document: &web::Document, element_id: &str, dispatch: &Dispatcher, command: Command) {
    let dispatch = dispatch.clone();
    dom::add_click_listener(document, element_id, move || dispatch(command.clone()));
}

/// Static page controls: toggles and the six directional buttons. Every
/// control is optional.
pub fn wire_controls(document: &web::Document, dispatch: &Dispatcher) {
    wire_command(document, AUTOROTATE_TOGGLE_ID, dispatch, Command::ToggleAutorotate);
    wire_command(document, SCENE_LIST_TOGGLE_ID, dispatch, Command::ToggleSceneList);
    wire_command(document, FULLSCREEN_TOGGLE_ID, dispatch, Command::ToggleFullscreen);
    wire_fullscreen_change(document);

    for dir in Nudge::ALL {
        wire_command(document, view_control_id(dir), dispatch, Command::Nudge(dir));
    }
}

/// Mirror the browser's fullscreen state on the toggle button.
fn wire_fullscreen_change(document: &web::Document) {
    if !document.fullscreen_enabled() {
        return;
    }
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(el) = doc.get_element_by_id(FULLSCREEN_TOGGLE_ID) {
            dom::set_class(&el, ENABLED_CLASS, doc.fullscreen_element().is_some());
        }
    }) as Box<dyn FnMut()>);
    _ = document.add_event_listener_with_callback("fullscreenchange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn product_selector(document: &web::Document) -> Option<web::HtmlSelectElement> {
    document
        .get_element_by_id(PRODUCT_SELECTOR_ID)?
        .dyn_into::<web::HtmlSelectElement>()
        .ok()
}

/// Fill the selector from the catalog if the page left it empty, and navigate
/// to the canonical URL of whatever product gets picked.
pub fn wire_product_selector(document: &web::Document, catalog: &ProductCatalog) {
    let Some(select) = product_selector(document) else {
        return;
    };
    if select.length() == 0 {
        for key in catalog.keys() {
            if let Ok(option) = web::HtmlOptionElement::new_with_text_and_value(key, key) {
                _ = select.append_child(&option);
            }
        }
    }

    let select_change = select.clone();
    let closure = Closure::wrap(Box::new(move || {
        let picked = select_change.value();
        if picked.is_empty() {
            return;
        }
        if let Some(window) = web::window() {
            _ = window.location().set_href(&canonical_url(&picked));
        }
    }) as Box<dyn FnMut()>);
    _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn set_selector_value(document: &web::Document, key: &str) {
    if let Some(select) = product_selector(document) {
        select.set_value(key);
    }
}
