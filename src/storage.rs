use pano_core::{KeyStore, StoreError, STORAGE_KEY};
use web_sys as web;

/// Last loaded product key in `localStorage`, readable by other page scripts.
#[derive(Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web::Storage, StoreError> {
        web::window()
            .ok_or_else(|| StoreError("no window".into()))?
            .local_storage()
            .map_err(|e| StoreError(format!("{:?}", e)))?
            .ok_or_else(|| StoreError("localStorage unavailable".into()))
    }
}

impl KeyStore for LocalStorageStore {
    fn save(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(STORAGE_KEY, key)
            .map_err(|e| StoreError(format!("{:?}", e)))
    }

    fn load(&self) -> Option<String> {
        Self::storage().ok()?.get_item(STORAGE_KEY).ok().flatten()
    }
}
