//! Seam to the page: everything the controller shows, and the commands the
//! page sends back.

use crate::view::Nudge;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHotspotId {
    pub scene: usize,
    pub index: usize,
}

/// User intents forwarded from page controls to the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Scene list entry clicked.
    SelectScene(String),
    /// Link hotspot clicked.
    FollowLink(String),
    Nudge(Nudge),
    ToggleAutorotate,
    ToggleFullscreen,
    ToggleSceneList,
    ToggleInfo(InfoHotspotId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneListEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkHotspotView<'a> {
    pub target: &'a str,
    pub rotation: f64,
    /// Escaped name of the target scene, when it exists.
    pub tooltip_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfoHotspotView {
    pub id: InfoHotspotId,
    pub title_html: String,
    pub text_html: String,
}

pub trait Ui {
    type Element;

    /// Small-viewport presentation (modals instead of inline panels).
    fn is_compact(&self) -> bool;
    fn set_document_title(&mut self, title: &str);
    fn set_scene_title(&mut self, html: &str);
    fn render_scene_list(&mut self, entries: &[SceneListEntry<'_>]);
    fn highlight_scene(&mut self, id: &str);
    fn set_scene_list_open(&mut self, open: bool);
    fn set_autorotate_enabled(&mut self, enabled: bool);
    fn fullscreen_supported(&self) -> bool;
    fn set_fullscreen_button(&mut self, visible: bool);
    fn toggle_fullscreen(&mut self);
    fn set_view_controls(&mut self, visible: bool);
    /// The page control for this direction, if the page has one.
    fn view_control(&self, dir: Nudge) -> Option<Self::Element>;
    /// `None` when the page could not build the element; the hotspot is skipped.
    fn link_hotspot(&mut self, hotspot: &LinkHotspotView<'_>) -> Option<Self::Element>;
    fn info_hotspot(&mut self, hotspot: &InfoHotspotView) -> Option<Self::Element>;
    /// Shows or hides an info panel together with its modal twin.
    fn set_info_visible(&mut self, id: InfoHotspotId, visible: bool);
    /// Drops every page-side hotspot artifact (e.g. modals) of the old scenes.
    fn clear_hotspots(&mut self);
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[inline]
pub fn rotate_transform(rotation: f64) -> String {
    format!("rotate({rotation}rad)")
}
