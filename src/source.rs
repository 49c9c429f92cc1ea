use gloo_net::http::Request;
use pano_core::{config_url, ConfigSource, LoadError, ProductConfig};

/// Fetches `data/<key>.json` relative to the page.
#[derive(Default)]
pub struct HttpSource;

impl HttpSource {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for HttpSource {
    async fn fetch(&self, key: &str) -> Result<ProductConfig, LoadError> {
        let fetch_err = |e: gloo_net::Error| LoadError::Fetch {
            key: key.to_string(),
            reason: e.to_string(),
        };
        let resp = Request::get(&config_url(key)).send().await.map_err(fetch_err)?;
        if !resp.ok() {
            return Err(LoadError::Status {
                key: key.to_string(),
                status: resp.status(),
            });
        }
        let text = resp.text().await.map_err(fetch_err)?;
        ProductConfig::from_json(&text).map_err(|e| LoadError::invalid(key, e))
    }
}
