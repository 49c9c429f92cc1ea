//! Where product configurations come from and where the last loaded key is
//! remembered. The router drives both through these traits.

use crate::config::{ConfigError, ProductConfig};
use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not fetch product {key}: {reason}")]
    Fetch { key: String, reason: String },
    #[error("product {key} responded with status {status}")]
    Status { key: String, status: u16 },
    #[error("product {key} has an invalid configuration")]
    Invalid {
        key: String,
        #[source]
        source: ConfigError,
    },
    #[error("load of product {key} was superseded by a newer load")]
    Superseded { key: String },
}

impl LoadError {
    pub fn key(&self) -> &str {
        match self {
            LoadError::Fetch { key, .. }
            | LoadError::Status { key, .. }
            | LoadError::Invalid { key, .. }
            | LoadError::Superseded { key } => key,
        }
    }

    pub fn invalid(key: &str, source: ConfigError) -> Self {
        LoadError::Invalid {
            key: key.to_string(),
            source,
        }
    }
}

/// A successfully loaded product, handed to every loaded-listener.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedProduct {
    pub key: String,
    pub config: ProductConfig,
}

/// Fetches and parses one product's configuration.
#[allow(async_fn_in_trait)]
pub trait ConfigSource {
    async fn fetch(&self, key: &str) -> Result<ProductConfig, LoadError>;
}

#[derive(Debug, Error)]
#[error("could not persist product key: {0}")]
pub struct StoreError(pub String);

/// Durable record of the last successfully loaded product key.
pub trait KeyStore {
    fn save(&self, key: &str) -> Result<(), StoreError>;
    fn load(&self) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    current: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryStore {
    fn save(&self, key: &str) -> Result<(), StoreError> {
        *self.current.borrow_mut() = Some(key.to_string());
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.current.borrow().clone()
    }
}
