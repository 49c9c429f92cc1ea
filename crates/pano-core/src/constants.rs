use std::f64::consts::PI;

// Shared tuning constants used by both the web and native frontends.

// Directional controls
pub const NUDGE_STEP: f64 = PI / 10.0; // radians per click for pitch/yaw/fov
pub const FOV_MIN: f64 = PI / 10.0;
pub const FOV_MAX: f64 = PI;

// Press-and-hold on the directional controls
pub const PRESS_VELOCITY: f64 = 0.7;
pub const PRESS_FRICTION: f64 = 3.0;

// Autorotate idle motion
pub const AUTOROTATE_YAW_SPEED: f64 = 0.03; // rad/s
pub const AUTOROTATE_TARGET_PITCH: f64 = 0.0;
pub const AUTOROTATE_TARGET_FOV: f64 = PI / 2.0;
pub const IDLE_DELAY_MS: u32 = 3000;

// View limiter
pub const MAX_VFOV_DEG: f64 = 100.0;
pub const MAX_HFOV_DEG: f64 = 120.0;

// Storage and addressing
pub const STORAGE_KEY: &str = "currentProduct";
pub const PRODUCT_PARAM: &str = "product";
pub const CONFIG_DIR: &str = "data";
pub const TILE_ROOT: &str = "product-tiles";

pub const DEFAULT_DOCUMENT_TITLE: &str = "Panorama Viewer";

// Hotspot icons, relative to the page
pub const LINK_ICON_URL: &str = "img/link.png";
pub const INFO_ICON_URL: &str = "img/info.png";
pub const CLOSE_ICON_URL: &str = "img/close.png";
