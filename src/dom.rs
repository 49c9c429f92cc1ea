use crate::constants::COMPACT_MEDIA_QUERY;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire a click handler on the element with this id. Returns `false` when the
/// element is not on the page.
#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    handler: impl FnMut() + 'static,
) -> bool {
    match document.get_element_by_id(element_id) {
        Some(el) => {
            on_click_forever(&el, handler);
            true
        }
        None => {
            log::debug!("[dom] no #{element_id}, control disabled");
            false
        }
    }
}

#[inline]
pub fn on_click_forever(target: &web::EventTarget, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn create(document: &web::Document, tag: &str, classes: &[&str]) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    for class in classes {
        _ = el.class_list().add_1(class);
    }
    Some(el)
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    _ = el.class_list().toggle_with_force(class, on);
}

#[inline]
pub fn body_class(document: &web::Document, class: &str, on: bool) {
    if let Some(body) = document.body() {
        set_class(&body, class, on);
    }
}

fn apply_media_mode(document: &web::Document, compact: bool) {
    body_class(document, "mobile", compact);
    body_class(document, "desktop", !compact);
}

/// Keep the body's `desktop`/`mobile` class in step with the viewport size.
pub fn wire_media_mode(window: &web::Window, document: &web::Document) -> Option<web::MediaQueryList> {
    let mql = match window.match_media(COMPACT_MEDIA_QUERY) {
        Ok(Some(mql)) => mql,
        _ => {
            body_class(document, "desktop", true);
            return None;
        }
    };
    apply_media_mode(document, mql.matches());

    let doc = document.clone();
    let mql_change = mql.clone();
    let closure = Closure::wrap(Box::new(move || {
        apply_media_mode(&doc, mql_change.matches());
    }) as Box<dyn FnMut()>);
    _ = mql.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
    Some(mql)
}

/// `no-touch` until the first touch anywhere, then `touch`.
pub fn wire_touch_detection(window: &web::Window, document: &web::Document) {
    body_class(document, "no-touch", true);
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        body_class(&doc, "no-touch", false);
        body_class(&doc, "touch", true);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
    closure.forget();
}
