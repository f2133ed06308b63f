//! Per-frame driver for concurrent animation playbacks.
//!
//! Each playback is bound to a target entity id. The host calls
//! [`Animator::tick`] once per frame with the elapsed time and a liveness
//! check for entities:
//!
//! - entity gone: playback dropped without sampling (self-cancel)
//! - playback reaches its end: sampled at the end value once, then dropped
//! - paused playback: kept, not sampled
//!
//! Single-threaded: the host event loop owns the animator.

use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use super::anim_state::AnimationState;
use crate::entities::Animation;

/// Values produced for one entity during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    pub entity_id: String,
    pub time: f32,
    /// One value per animation curve, in curve order
    pub values: Vec<f32>,
    /// Last sample of this playback
    pub finished: bool,
}

/// Playbacks keyed by entity id, in start order.
#[derive(Debug, Default)]
pub struct Animator {
    playbacks: IndexMap<String, AnimationState>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start playing `animation` on `entity_id`, replacing any running playback.
    pub fn start(&mut self, entity_id: impl Into<String>, animation: Rc<Animation>) {
        let entity_id = entity_id.into();
        let mut state = AnimationState::new(animation);
        state.play();
        debug!(
            "Animator: start '{}' on {} (duration {}s)",
            state.animation().name,
            entity_id,
            state.duration()
        );
        // Restarted playback moves to the end of the order
        self.playbacks.shift_remove(&entity_id);
        self.playbacks.insert(entity_id, state);
    }

    pub fn pause(&mut self, entity_id: &str) -> bool {
        match self.playbacks.get_mut(entity_id) {
            Some(state) => {
                state.pause();
                true
            }
            None => false,
        }
    }

    pub fn resume(&mut self, entity_id: &str) -> bool {
        match self.playbacks.get_mut(entity_id) {
            Some(state) => {
                state.play();
                true
            }
            None => false,
        }
    }

    /// Cancel playback. Returns the cursor at its current position.
    pub fn stop(&mut self, entity_id: &str) -> Option<AnimationState> {
        self.playbacks.shift_remove(entity_id)
    }

    pub fn state(&self, entity_id: &str) -> Option<&AnimationState> {
        self.playbacks.get(entity_id)
    }

    pub fn is_running(&self, entity_id: &str) -> bool {
        self.playbacks
            .get(entity_id)
            .map(AnimationState::is_playing)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.playbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playbacks.is_empty()
    }

    /// Advance every playback by `dt` seconds.
    pub fn tick<F>(&mut self, dt: f32, is_alive: F) -> Vec<FrameSample>
    where
        F: Fn(&str) -> bool,
    {
        let mut samples = Vec::new();

        self.playbacks.retain(|entity_id, state| {
            if !is_alive(entity_id) {
                debug!("Animator: entity {} vanished, cancelling '{}'", entity_id, state.animation().name);
                return false;
            }
            if !state.is_playing() {
                // Paused: keep registered, skip sampling
                return true;
            }

            state.update(dt);
            let finished = state.is_complete();
            samples.push(FrameSample {
                entity_id: entity_id.clone(),
                time: state.current_time(),
                values: state.current_value(),
                finished,
            });
            if finished {
                debug!("Animator: '{}' finished on {}", state.animation().name, entity_id);
            }
            !finished
        });

        samples
    }
}
