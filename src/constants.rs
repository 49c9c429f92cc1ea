// DOM contract of the viewer page.
//
// Element ids and selectors the front-end looks up. Everything except the
// viewer mount point is optional: a missing control only disables its feature.

// Viewer mount point
pub const PANO_ID: &str = "pano";

// Title bar and scene list
pub const SCENE_NAME_SELECTOR: &str = "#titleBar .sceneName";
pub const SCENE_LIST_ID: &str = "sceneList";
pub const SCENE_LIST_ITEMS_SELECTOR: &str = "#sceneList .scenes";
pub const SCENE_ENTRY_SELECTOR: &str = "#sceneList .scene";
pub const SCENE_LIST_TOGGLE_ID: &str = "sceneListToggle";

// Toggles
pub const AUTOROTATE_TOGGLE_ID: &str = "autorotateToggle";
pub const FULLSCREEN_TOGGLE_ID: &str = "fullscreenToggle";
pub const PRODUCT_SELECTOR_ID: &str = "productSelector";

// Directional controls
pub const VIEW_UP_ID: &str = "viewUp";
pub const VIEW_DOWN_ID: &str = "viewDown";
pub const VIEW_LEFT_ID: &str = "viewLeft";
pub const VIEW_RIGHT_ID: &str = "viewRight";
pub const VIEW_IN_ID: &str = "viewIn";
pub const VIEW_OUT_ID: &str = "viewOut";

// Presentation modes
pub const COMPACT_MEDIA_QUERY: &str = "(max-width: 500px), (max-height: 500px)";

// Classes toggled on controls and body
pub const ENABLED_CLASS: &str = "enabled";
pub const CURRENT_CLASS: &str = "current";
pub const VISIBLE_CLASS: &str = "visible";

/// Events a hotspot must swallow so interacting with it never moves the camera.
pub const HOTSPOT_SWALLOWED_EVENTS: [&str; 6] = [
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
    "wheel",
    "mousewheel",
];

/// Vendor-prefixed transform properties set on rotated link icons.
pub const TRANSFORM_PROPERTIES: [&str; 3] = ["-ms-transform", "-webkit-transform", "transform"];
