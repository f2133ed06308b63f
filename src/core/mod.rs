//! Core engine modules - playback cursor, animator, composition manager
//!
//! These hold state on top of the plain data in `crate::entities`.

pub mod anim_state;
pub mod animator;
pub mod composition;

// Re-exports for convenience
pub use anim_state::AnimationState;
pub use animator::{Animator, FrameSample};
pub use composition::{RenderCallback, SceneCompositionManager};
