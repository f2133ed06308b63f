//! Playback cursor over one [`Animation`].
//!
//! # States
//!
//! - **paused**: `is_playing == false`, time anywhere in `[0, duration]`
//! - **playing**: entered via [`AnimationState::play`]; `update(dt)` advances time
//! - **complete**: time reached `duration`; playing flag cleared
//!
//! `reset()` returns to time 0, paused. Time is advanced by the caller's
//! `dt` (seconds), not wall clock.

use std::rc::Rc;

use log::trace;

use crate::entities::Animation;

#[derive(Debug, Clone)]
pub struct AnimationState {
    animation: Rc<Animation>,
    current_time: f32,
    is_playing: bool,
}

impl AnimationState {
    /// New cursor at time 0, paused.
    pub fn new(animation: Rc<Animation>) -> Self {
        Self {
            animation,
            current_time: 0.0,
            is_playing: false,
        }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn duration(&self) -> f32 {
        self.animation.duration()
    }

    pub fn is_complete(&self) -> bool {
        self.current_time >= self.duration()
    }

    /// Start or resume. No-op on a complete cursor (call `reset()` first).
    pub fn play(&mut self) {
        if self.is_complete() {
            trace!("AnimationState::play() on complete '{}' ignored", self.animation.name);
            return;
        }
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.is_playing = false;
    }

    /// Advance by `dt` seconds while playing; clamps and stops at the end.
    pub fn update(&mut self, dt: f32) {
        if !self.is_playing {
            return;
        }
        self.current_time += dt;
        let duration = self.duration();
        if self.current_time >= duration {
            self.current_time = duration;
            self.is_playing = false;
            trace!("Animation '{}' complete at t={}", self.animation.name, duration);
        }
    }

    /// Sample every curve at the current time.
    pub fn current_value(&self) -> Vec<f32> {
        self.animation.evaluate(self.current_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AnimationCurve, Keyframe};
    use approx::assert_relative_eq;

    fn state() -> AnimationState {
        let anim = Animation::new("slide").with_curve(AnimationCurve::from_keys(
            "x",
            [Keyframe::new(0.0, 0.0), Keyframe::new(2.0, 20.0)],
        ));
        AnimationState::new(Rc::new(anim))
    }

    #[test]
    fn test_update_noop_when_paused() {
        let mut s = state();
        s.update(1.0);
        assert_eq!(s.current_time(), 0.0);
    }

    #[test]
    fn test_update_advances_and_samples() {
        let mut s = state();
        s.play();
        s.update(0.5);
        assert!(s.is_playing());
        assert_relative_eq!(s.current_time(), 0.5);
        assert_relative_eq!(s.current_value()[0], 5.0);
    }

    #[test]
    fn test_update_clamps_at_end() {
        let mut s = state();
        s.play();
        s.update(1.5);
        s.update(1.5);
        assert_eq!(s.current_time(), 2.0);
        assert!(!s.is_playing());
        assert!(s.is_complete());
        assert_eq!(s.current_value(), vec![20.0]);

        // Complete cursor stays put
        s.play();
        assert!(!s.is_playing());
    }

    #[test]
    fn test_pause_keeps_time_reset_rewinds() {
        let mut s = state();
        s.play();
        s.update(0.75);
        s.pause();
        s.update(1.0);
        assert_relative_eq!(s.current_time(), 0.75);

        s.reset();
        assert_eq!(s.current_time(), 0.0);
        assert!(!s.is_playing());
    }
}
