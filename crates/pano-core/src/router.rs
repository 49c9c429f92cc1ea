use crate::catalog::ProductCatalog;
use crate::loader::{ConfigSource, KeyStore, LoadError, LoadedProduct};
use crate::route::{resolve_product_key, resolve_route, Location, Route};
use instant::Instant;
use std::cell::{Cell, RefCell};

pub type LoadedListener = Box<dyn FnMut(&LoadedProduct)>;

/// Resolves the active product, loads its configuration with a single
/// fallback to the default product, and notifies listeners once per
/// successful load.
///
/// Starting a load supersedes any load still in flight: its result is
/// dropped without persisting or notifying.
pub struct Router<S, K> {
    catalog: ProductCatalog,
    source: S,
    store: K,
    generation: Cell<u64>,
    listeners: RefCell<Vec<LoadedListener>>,
}

impl<S: ConfigSource, K: KeyStore> Router<S, K> {
    pub fn new(catalog: ProductCatalog, source: S, store: K) -> Self {
        Self {
            catalog,
            source,
            store,
            generation: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn on_loaded(&self, listener: impl FnMut(&LoadedProduct) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    #[inline]
    pub fn current_product(&self, query_product: Option<&str>) -> &str {
        resolve_product_key(&self.catalog, query_product)
    }

    #[inline]
    pub fn route(&self, location: &Location) -> Route {
        resolve_route(&self.catalog, location)
    }

    /// Key recorded by the last successful load, possibly from an earlier page.
    pub fn last_loaded(&self) -> Option<String> {
        self.store.load()
    }

    pub async fn load(&self, key: &str) -> Result<LoadedProduct, LoadError> {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let default = self.catalog.default_key();
        let requested = match self.catalog.get(key) {
            Some(k) => k,
            None => {
                log::warn!("[router] unknown product {key:?}, loading default {default}");
                default
            }
        };

        match self.attempt(requested, generation).await {
            Ok(loaded) => Ok(loaded),
            Err(e @ LoadError::Superseded { .. }) => Err(e),
            Err(e) if requested == default => {
                log::error!("[router] default product {default} failed, giving up");
                Err(e)
            }
            Err(_) => {
                log::warn!("[router] falling back to default product {default}");
                self.attempt(default, generation).await
            }
        }
    }

    async fn attempt(&self, key: &str, generation: u64) -> Result<LoadedProduct, LoadError> {
        log::info!("[router] loading product {key}...");
        let started = Instant::now();
        let result = self.source.fetch(key).await;
        if self.generation.get() != generation {
            log::info!("[router] dropping superseded load of {key}");
            return Err(LoadError::Superseded {
                key: key.to_string(),
            });
        }
        let config = result.map_err(|e| {
            log::error!("[router] error loading product {key}: {e}");
            e
        })?;
        log::info!(
            "[router] loaded product {key}: {} scene(s) in {:.0} ms",
            config.scenes.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        if let Err(e) = self.store.save(key) {
            log::warn!("[router] {e}");
        }
        let loaded = LoadedProduct {
            key: key.to_string(),
            config,
        };
        self.notify(&loaded);
        Ok(loaded)
    }

    fn notify(&self, loaded: &LoadedProduct) {
        // Listeners may register further listeners while being called.
        let mut running = self.listeners.take();
        for listener in running.iter_mut() {
            listener(loaded);
        }
        let mut slot = self.listeners.borrow_mut();
        running.append(&mut slot);
        *slot = running;
    }
}
