//! Mapping the page address to a product key, and the deterministic URLs
//! derived from a key.

use crate::catalog::ProductCatalog;
use crate::constants::{CONFIG_DIR, PRODUCT_PARAM, TILE_ROOT};

/// The parts of the page address routing looks at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Value of the `product` query parameter, if present.
    pub product_param: Option<String>,
}

impl Location {
    pub fn new(path: impl Into<String>, product_param: Option<impl Into<String>>) -> Self {
        Self {
            path: path.into(),
            product_param: product_param.map(Into::into),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Load this product's configuration in place.
    Load(String),
    /// Navigate the browser to this URL instead of loading anything.
    Redirect(String),
}

/// The product key addressed by the query parameter, or the default one when
/// the parameter is absent or unknown.
pub fn resolve_product_key<'c>(catalog: &'c ProductCatalog, query_product: Option<&str>) -> &'c str {
    query_product
        .and_then(|q| catalog.get(q))
        .unwrap_or_else(|| catalog.default_key())
}

/// Precedence: a known `product` parameter wins, then a legacy path equal to
/// a known key (redirected to the canonical form), then the default product.
pub fn resolve_route(catalog: &ProductCatalog, location: &Location) -> Route {
    if let Some(key) = location.product_param.as_deref().and_then(|q| catalog.get(q)) {
        return Route::Load(key.to_string());
    }
    let path = location.path.as_str();
    let path = path.strip_prefix('/').unwrap_or(path);
    let clean = path.strip_suffix('/').unwrap_or(path);
    if let Some(key) = catalog.get(clean) {
        return Route::Redirect(canonical_url(key));
    }
    if let Some(q) = location.product_param.as_deref() {
        log::warn!("[route] unknown product {q:?}, using default");
    }
    Route::Load(catalog.default_key().to_string())
}

#[inline]
pub fn canonical_url(key: &str) -> String {
    format!("/?{PRODUCT_PARAM}={key}")
}

#[inline]
pub fn config_url(key: &str) -> String {
    format!("{CONFIG_DIR}/{key}.json")
}

#[inline]
pub fn tile_url_template(key: &str) -> String {
    format!("{TILE_ROOT}/{key}/tile/{{z}}/{{f}}/{{y}}/{{x}}.jpg")
}

#[inline]
pub fn preview_url(key: &str) -> String {
    format!("{TILE_ROOT}/{key}/preview.jpg")
}
