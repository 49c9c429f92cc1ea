#![cfg(target_arch = "wasm32")]
use pano_core::{Controller, Location, ProductCatalog, Route, Router, PRODUCT_PARAM};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod marzipano;
mod source;
mod storage;
mod ui;

use marzipano::MarzipanoEngine;
use source::HttpSource;
use storage::LocalStorageStore;
use ui::{Dispatcher, WebUi};

type App = Controller<MarzipanoEngine, WebUi>;
type WebRouter = Router<HttpSource, LocalStorageStore>;

// Page-lifetime owners; page listeners only hold weak handles.
thread_local! {
    static SESSION: RefCell<Option<(Rc<RefCell<App>>, Rc<WebRouter>)>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("pano-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn current_location(location: &web::Location) -> anyhow::Result<Location> {
    let path = location
        .pathname()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let search = location.search().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let params =
        web::UrlSearchParams::new_with_str(&search).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(Location {
        path,
        product_param: params.get(PRODUCT_PARAM),
    })
}

fn make_dispatcher(app: Weak<RefCell<App>>) -> Dispatcher {
    Rc::new(move |command| {
        let Some(app) = app.upgrade() else {
            return;
        };
        match app.try_borrow_mut() {
            Ok(mut controller) => controller.dispatch(command),
            Err(_) => log::warn!("[app] controller busy, dropping {:?}", command),
        };
    })
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let router = Rc::new(Router::new(
        ProductCatalog::builtin(),
        HttpSource::new(),
        LocalStorageStore::new(),
    ));

    let location = window.location();
    let key = match router.route(&current_location(&location)?) {
        Route::Redirect(url) => {
            log::info!("[app] legacy address, redirecting to {url}");
            location
                .set_href(&url)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            return Ok(());
        }
        Route::Load(key) => key,
    };

    dom::wire_touch_detection(&window, &document);
    let compact = dom::wire_media_mode(&window, &document);

    let mount = document
        .get_element_by_id(constants::PANO_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::PANO_ID))?;

    let app: Rc<RefCell<App>> = Rc::new_cyclic(|weak| {
        let ui = WebUi::new(document.clone(), make_dispatcher(weak.clone()), compact);
        RefCell::new(Controller::new(MarzipanoEngine::new(mount), ui))
    });

    let dispatch = app.borrow().ui().dispatcher();
    events::wire_controls(&document, &dispatch);
    events::wire_product_selector(&document, router.catalog());

    {
        let app = Rc::downgrade(&app);
        let doc = document.clone();
        router.on_loaded(move |loaded| {
            events::set_selector_value(&doc, &loaded.key);
            let Some(app) = app.upgrade() else {
                return;
            };
            if let Err(e) = app.borrow_mut().on_configuration_loaded(loaded) {
                log::error!("[app] could not display product {}: {e}", loaded.key);
            };
        });
    }

    SESSION.with(|s| *s.borrow_mut() = Some((app.clone(), router.clone())));

    if let Err(e) = router.load(&key).await {
        log::error!("[app] no product could be loaded: {e}");
    }
    Ok(())
}
