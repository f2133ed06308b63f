//! Composition project: named set of scene layers plus a composition mode.
//!
//! The project is the unit of export/import: it serializes to the JSON shape
//! `{id, name, mode, layers, activeSceneId?, persistentUIScenes, mainSceneId?}`.
//!
//! Scene references (`active_scene_id`, `main_scene_id`,
//! `persistent_ui_scenes`) are weak: nothing checks that the scene has a
//! layer entry or exists in the registry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::layer::{SceneId, SceneLayer, clamp_alpha, sort_layers};

/// Project identifier (UUID v4).
pub type ProjectId = Uuid;

/// How layers combine into a render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompositionMode {
    /// All visible layers, stacked by layer index.
    #[default]
    Layered,
    /// Exactly one active scene at a time.
    Switch,
    /// One main scene plus persistent UI scenes drawn over it.
    Hybrid,
}

impl CompositionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionMode::Layered => "LAYERED",
            CompositionMode::Switch => "SWITCH",
            CompositionMode::Hybrid => "HYBRID",
        }
    }

    /// Case-insensitive parse ("layered", "SWITCH", ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LAYERED" => Some(CompositionMode::Layered),
            "SWITCH" => Some(CompositionMode::Switch),
            "HYBRID" => Some(CompositionMode::Hybrid),
            _ => None,
        }
    }
}

impl std::fmt::Display for CompositionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionProject {
    pub id: ProjectId,
    pub name: String,
    pub mode: CompositionMode,
    /// Sorted by `layer_index` ascending, unique by `scene_id`.
    #[serde(default)]
    pub layers: Vec<SceneLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_scene_id: Option<SceneId>,
    #[serde(rename = "persistentUIScenes", default)]
    pub persistent_ui_scenes: Vec<SceneId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_scene_id: Option<SceneId>,
}

impl CompositionProject {
    pub fn new(name: impl Into<String>, mode: CompositionMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mode,
            layers: Vec::new(),
            active_scene_id: None,
            persistent_ui_scenes: Vec::new(),
            main_scene_id: None,
        }
    }

    pub fn layer(&self, scene_id: &str) -> Option<&SceneLayer> {
        self.layers.iter().find(|l| l.scene_id == scene_id)
    }

    pub fn layer_mut(&mut self, scene_id: &str) -> Option<&mut SceneLayer> {
        self.layers.iter_mut().find(|l| l.scene_id == scene_id)
    }

    /// Insert or move a scene's layer, then re-sort.
    pub fn upsert_layer(&mut self, scene_id: &str, layer_index: i32) {
        match self.layer_mut(scene_id) {
            Some(layer) => layer.layer_index = layer_index,
            None => self.layers.push(SceneLayer::new(scene_id, layer_index)),
        }
        sort_layers(&mut self.layers);
    }

    /// Drop the scene's layer and every weak reference to it.
    ///
    /// Returns the removed layer, if the scene had one.
    pub fn remove_scene(&mut self, scene_id: &str) -> Option<SceneLayer> {
        let removed = self
            .layers
            .iter()
            .position(|l| l.scene_id == scene_id)
            .map(|pos| self.layers.remove(pos));

        self.persistent_ui_scenes.retain(|s| s != scene_id);
        if self.active_scene_id.as_deref() == Some(scene_id) {
            self.active_scene_id = None;
        }
        if self.main_scene_id.as_deref() == Some(scene_id) {
            self.main_scene_id = None;
        }
        removed
    }

    /// Scene ids to draw, back to front.
    pub fn render_order(&self) -> Vec<SceneId> {
        match self.mode {
            CompositionMode::Layered => self
                .layers
                .iter()
                .filter(|l| l.visible)
                .map(|l| l.scene_id.clone())
                .collect(),
            CompositionMode::Switch => self.active_scene_id.iter().cloned().collect(),
            CompositionMode::Hybrid => self
                .main_scene_id
                .iter()
                .chain(self.persistent_ui_scenes.iter())
                .cloned()
                .collect(),
        }
    }

    /// Scene ids for hit testing, front to back.
    ///
    /// Reverse render order; for layered projects only layers that
    /// [accept input](SceneLayer::accepts_input) are kept.
    pub fn interactive_order(&self) -> Vec<SceneId> {
        match self.mode {
            CompositionMode::Layered => self
                .layers
                .iter()
                .rev()
                .filter(|l| l.accepts_input())
                .map(|l| l.scene_id.clone())
                .collect(),
            _ => {
                let mut order = self.render_order();
                order.reverse();
                order
            }
        }
    }

    /// Restore layer invariants after deserialization (sort, dedupe, clamp).
    pub fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        // Keep the last entry per scene, matching update-in-place semantics
        let mut kept: Vec<SceneLayer> = Vec::with_capacity(self.layers.len());
        for layer in self.layers.drain(..).rev() {
            if seen.insert(layer.scene_id.clone()) {
                kept.push(layer);
            }
        }
        kept.reverse();
        for layer in &mut kept {
            layer.alpha = clamp_alpha(layer.alpha);
        }
        sort_layers(&mut kept);
        self.layers = kept;
    }
}

/// Exported project as read back by import.
///
/// No `id` field: exporters use arbitrary id strings (or none), and import
/// always assigns a fresh one, so any incoming `id` is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedProject {
    pub name: String,
    pub mode: CompositionMode,
    #[serde(default)]
    pub layers: Vec<SceneLayer>,
    #[serde(default)]
    pub active_scene_id: Option<SceneId>,
    #[serde(rename = "persistentUIScenes", default)]
    pub persistent_ui_scenes: Vec<SceneId>,
    #[serde(default)]
    pub main_scene_id: Option<SceneId>,
}

impl ImportedProject {
    /// Build a normalized project under a new UUID.
    pub fn into_project(self) -> CompositionProject {
        let mut project = CompositionProject {
            id: Uuid::new_v4(),
            name: self.name,
            mode: self.mode,
            layers: self.layers,
            active_scene_id: self.active_scene_id,
            persistent_ui_scenes: self.persistent_ui_scenes,
            main_scene_id: self.main_scene_id,
        };
        project.normalize();
        project
    }
}
