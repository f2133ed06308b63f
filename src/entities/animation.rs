//! Animation: ordered set of curves sharing one timeline.

use serde::{Deserialize, Serialize};

use super::curve::AnimationCurve;

/// Named group of curves. Curves are appended, never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    #[serde(default)]
    curves: Vec<AnimationCurve>,
}

impl Animation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curves: Vec::new(),
        }
    }

    pub fn add_curve(&mut self, curve: AnimationCurve) {
        self.curves.push(curve);
    }

    /// Builder form of [`Animation::add_curve`].
    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.add_curve(curve);
        self
    }

    pub fn curves(&self) -> &[AnimationCurve] {
        &self.curves
    }

    /// Longest curve end time (0 when no curves).
    pub fn duration(&self) -> f32 {
        self.curves
            .iter()
            .map(AnimationCurve::duration)
            .fold(0.0, f32::max)
    }

    /// One sample per curve, in curve order.
    pub fn evaluate(&self, time: f32) -> Vec<f32> {
        self.curves.iter().map(|c| c.evaluate(time)).collect()
    }

    /// Sample the first curve driving `property`.
    pub fn value(&self, property: &str, time: f32) -> Option<f32> {
        self.curves
            .iter()
            .find(|c| c.property == property)
            .map(|c| c.evaluate(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::curve::Keyframe;
    use approx::assert_relative_eq;

    fn fade_and_move() -> Animation {
        Animation::new("intro")
            .with_curve(AnimationCurve::from_keys(
                "opacity",
                [Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)],
            ))
            .with_curve(AnimationCurve::from_keys(
                "x",
                [Keyframe::new(0.0, 100.0), Keyframe::new(3.0, 400.0)],
            ))
    }

    #[test]
    fn test_duration_is_longest_curve() {
        assert_eq!(fade_and_move().duration(), 3.0);
        assert_eq!(Animation::new("empty").duration(), 0.0);
    }

    #[test]
    fn test_evaluate_per_curve() {
        let anim = fade_and_move();
        let values = anim.evaluate(2.0);
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], 1.0);
        assert_relative_eq!(values[1], 300.0, epsilon = 1e-3);
        assert!(Animation::new("empty").evaluate(1.0).is_empty());
    }

    #[test]
    fn test_value_by_property() {
        let anim = fade_and_move();
        assert_eq!(anim.value("x", 0.0), Some(100.0));
        assert_eq!(anim.value("rotation", 0.0), None);
    }
}
