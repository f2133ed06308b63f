//! SCENERY - keyframe animation and scene composition library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (playback, animator, composition manager)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod entities;
pub mod error;

// Re-export commonly used types from core
pub use crate::core::anim_state::AnimationState;
pub use crate::core::animator::{Animator, FrameSample};
pub use crate::core::composition::SceneCompositionManager;

// Re-export entities
pub use entities::{
    Animation, AnimationCurve, CompositionMode, CompositionProject, Easing, Keyframe, PieceKey,
    ProjectId, SceneLayer, SceneRegistry,
};
pub use error::{CompError, CompResult};
