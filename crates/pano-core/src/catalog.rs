//! The fixed allow-list of product keys the viewer knows how to load.

use thiserror::Error;

/// Known product keys, grouped by tile pyramid layout. The first entry is the
/// default product.
pub const PRODUCT_KEYS: &[&str] = &[
    // l1_l1_1_1
    "1a5ab6424adfa1e1",
    // l1_l1_2_2
    "0907ced043a892f4",
    "116d8fe1d94b004f",
    // l1_l1_3_3
    "2d9dfc066215f1d0",
    "961fab550347f6fa",
    // l2_l1_2_2_l2_3_3
    "0013bf73ebe076f7",
    "00334ac8f21d1b5c",
    // l2_l1_2_2_l2_4_4
    "0006e253c720cf00",
    "000a87de36f83cca",
    // l2_l1_3_3_l2_5_5
    "04172c95a916ac66",
    "05d0fc5832284cff",
    // l3_l1_2_2_l2_3_3_l3_5_5
    "0016314bd22c88bf",
    "0020ca9e6b6b5d9d",
    // l3_l1_2_2_l2_3_3_l3_7_7
    "000565a39fc5c236",
    "0027992aa5064f2d",
    // l3_l1_2_2_l2_4_4_l3_8_8
    "12708b97708d4808",
    "19447476b3764967",
    // l4_l1_2_2_l2_3_3_l3_5_5_l4_10_10
    "091ac331c6f2238d",
    "1003664e21e92652",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product catalog must contain at least one key")]
    Empty,
    #[error("duplicate product key {0:?}")]
    Duplicate(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCatalog {
    keys: Vec<String>,
}

impl ProductCatalog {
    pub fn builtin() -> Self {
        Self {
            keys: PRODUCT_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn new<I, S>(keys: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for key in keys {
            let key = key.into();
            if out.contains(&key) {
                return Err(CatalogError::Duplicate(key));
            }
            out.push(key);
        }
        if out.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { keys: out })
    }

    #[inline]
    pub fn default_key(&self) -> &str {
        // non-empty by construction
        &self.keys[0]
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Returns the catalog's own copy of `key`, if known.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keys.iter().find(|k| *k == key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
