//! Scene layer: one scene's participation record in a composition.
//!
//! Layers are ordered by `layer_index` ascending (lowest drawn first).
//! Equal indices keep their relative order across re-sorts because every
//! re-sort uses a stable sort (see [`sort_layers`]).

use serde::{Deserialize, Serialize};

/// Identifier of a scene in the externally owned scene registry.
pub type SceneId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneLayer {
    pub scene_id: SceneId,
    pub layer_index: i32,
    pub visible: bool,
    /// Opacity in [0, 1]
    pub alpha: f32,
    pub interactive: bool,
}

impl SceneLayer {
    /// New layer with defaults: visible, fully opaque, interactive.
    pub fn new(scene_id: impl Into<SceneId>, layer_index: i32) -> Self {
        Self {
            scene_id: scene_id.into(),
            layer_index,
            visible: true,
            alpha: 1.0,
            interactive: true,
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }

    /// Receives pointer input: interactive, visible, not fully transparent.
    pub fn accepts_input(&self) -> bool {
        self.interactive && self.visible && self.alpha > 0.0
    }
}

/// Clamp to [0, 1]; NaN becomes 0.
pub fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) }
}

/// Stable sort by `layer_index` ascending.
pub fn sort_layers(layers: &mut [SceneLayer]) {
    layers.sort_by_key(|l| l.layer_index);
}
