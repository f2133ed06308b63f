//! Entities: animation data and composition data, no UI.
//!
//! - Animation side: `interp` (pure math), `curve`, `animation`
//! - Composition side: `layer`, `project`, `registry`
//!
//! Playback and the composition manager live in `crate::core`.

pub mod animation;
pub mod curve;
pub mod interp;
pub mod layer;
pub mod project;
pub mod registry;

pub use animation::Animation;
pub use curve::{AnimationCurve, Keyframe};
pub use interp::{Easing, PieceKey, bezier, lerp, piecewise_bezier};
pub use layer::{SceneId, SceneLayer, clamp_alpha, sort_layers};
pub use project::{CompositionMode, CompositionProject, ImportedProject, ProjectId};
pub use registry::{SceneInfo, SceneRegistry};
