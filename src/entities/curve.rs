//! Keyframed scalar curves.
//!
//! # Invariants
//!
//! - Keys are sorted ascending by `time`.
//! - At most one key per time value: adding a key at an existing time
//!   replaces that key's value (last write wins).
//!
//! Evaluation clamps to the first/last key outside the keyed range and
//! interpolates linearly between bracketing keys inside it.

use serde::{Deserialize, Serialize};

use super::interp::lerp;

/// Single `(time, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Scalar curve driving one animated property.
///
/// Deserialized keys go through [`AnimationCurve::add_keyframe`], so loaded
/// curves hold the same invariants as edited ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCurve")]
pub struct AnimationCurve {
    /// Name of the property this curve drives (e.g. "opacity", "position.x").
    pub property: String,
    keyframes: Vec<Keyframe>,
}

/// Wire form of a curve, keys in any order.
#[derive(Deserialize)]
struct RawCurve {
    #[serde(default)]
    property: String,
    #[serde(default)]
    keyframes: Vec<Keyframe>,
}

impl From<RawCurve> for AnimationCurve {
    fn from(raw: RawCurve) -> Self {
        Self::from_keys(raw.property, raw.keyframes)
    }
}

impl AnimationCurve {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            keyframes: Vec::new(),
        }
    }

    /// Build from unsorted keys (same rules as repeated `add_keyframe`).
    pub fn from_keys(property: impl Into<String>, keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut curve = Self::new(property);
        for key in keys {
            curve.add_keyframe(key.time, key.value);
        }
        curve
    }

    /// Insert a key keeping ascending time order. Existing time: value replaced.
    ///
    /// Non-finite times are skipped.
    pub fn add_keyframe(&mut self, time: f32, value: f32) {
        if !time.is_finite() {
            log::warn!("Keyframe with non-finite time {} on '{}' skipped", time, self.property);
            return;
        }
        let pos = self.keyframes.partition_point(|k| k.time < time);
        if let Some(existing) = self.keyframes.get_mut(pos).filter(|k| k.time == time) {
            log::trace!("Keyframe at t={} replaced ({} -> {})", time, existing.value, value);
            existing.value = value;
            return;
        }
        self.keyframes.insert(pos, Keyframe::new(time, value));
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Time of the last key, 0 when empty.
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map(|k| k.time).unwrap_or(0.0)
    }

    /// Sample the curve at `time`.
    pub fn evaluate(&self, time: f32) -> f32 {
        let Some(first) = self.keyframes.first() else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }

        for pair in self.keyframes.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            if time == curr.time {
                return curr.value;
            }
            if time < curr.time {
                let t = (time - prev.time) / (curr.time - prev.time);
                return lerp(prev.value, curr.value, t);
            }
        }

        // Past the end: hold last value
        self.keyframes.last().map(|k| k.value).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp() -> AnimationCurve {
        AnimationCurve::from_keys(
            "x",
            [Keyframe::new(2.0, 20.0), Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 10.0)],
        )
    }

    #[test]
    fn test_empty_curve() {
        let curve = AnimationCurve::new("x");
        assert_eq!(curve.evaluate(0.5), 0.0);
        assert_eq!(curve.duration(), 0.0);
    }

    #[test]
    fn test_keys_sorted_on_insert() {
        let curve = ramp();
        let times: Vec<f32> = curve.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0]);
        assert_eq!(curve.duration(), 2.0);
    }

    #[test]
    fn test_exact_at_keys() {
        let curve = ramp();
        for key in curve.keyframes() {
            assert_eq!(curve.evaluate(key.time), key.value);
        }
    }

    #[test]
    fn test_interpolates_between_keys() {
        let curve = ramp();
        assert_relative_eq!(curve.evaluate(0.5), 5.0);
        assert_relative_eq!(curve.evaluate(1.25), 12.5);
    }

    #[test]
    fn test_clamps_outside_range() {
        let curve = ramp();
        assert_eq!(curve.evaluate(-1.0), 0.0);
        assert_eq!(curve.evaluate(99.0), 20.0);
    }

    #[test]
    fn test_duplicate_time_replaces_value() {
        let mut curve = ramp();
        curve.add_keyframe(1.0, -4.0);
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.evaluate(1.0), -4.0);
    }

    #[test]
    fn test_non_finite_time_skipped() {
        let mut curve = AnimationCurve::new("x");
        curve.add_keyframe(0.0, 0.0);
        curve.add_keyframe(1.0, 10.0);
        curve.add_keyframe(f32::NAN, 99.0);
        curve.add_keyframe(f32::NAN, 98.0);
        curve.add_keyframe(f32::INFINITY, 5.0);
        curve.add_keyframe(f32::NEG_INFINITY, 5.0);
        let times: Vec<f32> = curve.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 1.0]);
        assert_eq!(curve.duration(), 1.0);
    }

    #[test]
    fn test_deserialize_sorts_keys() {
        let json = r#"{"property":"x","keyframes":[
            {"time":2.0,"value":20.0},
            {"time":0.0,"value":0.0},
            {"time":1.0,"value":7.0},
            {"time":1.0,"value":10.0}
        ]}"#;
        let curve: AnimationCurve = serde_json::from_str(json).unwrap();
        assert_eq!(curve, ramp());
        assert_eq!(curve.duration(), 2.0);
        assert_eq!(curve.evaluate(1.0), 10.0);
        assert_relative_eq!(curve.evaluate(0.5), 5.0);

        let back: AnimationCurve = serde_json::from_str(&serde_json::to_string(&curve).unwrap()).unwrap();
        assert_eq!(back, curve);
    }

    #[test]
    fn test_evaluate_monotonic_within_brackets() {
        let curve = AnimationCurve::from_keys(
            "y",
            [
                Keyframe::new(0.0, 0.0),
                Keyframe::new(0.5, 8.0),
                Keyframe::new(1.25, -3.0),
                Keyframe::new(2.0, -3.0),
                Keyframe::new(4.0, 12.5),
            ],
        );

        for pair in curve.keyframes().windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let (lo, hi) = (prev.value.min(next.value), prev.value.max(next.value));
            let rising = next.value >= prev.value;
            let steps = 200;
            let mut last = curve.evaluate(prev.time);
            assert_eq!(last, prev.value);

            for i in 1..=steps {
                let t = prev.time + (next.time - prev.time) * i as f32 / steps as f32;
                let v = curve.evaluate(t);
                assert!(v >= lo - 1e-4 && v <= hi + 1e-4, "t={} v={} outside [{}, {}]", t, v, lo, hi);
                if rising {
                    assert!(v >= last - 1e-4, "t={} not rising: {} -> {}", t, last, v);
                } else {
                    assert!(v <= last + 1e-4, "t={} not falling: {} -> {}", t, last, v);
                }
                // No jumps: step size bounded by slope * dt
                let max_step = (hi - lo) / steps as f32 + 1e-3;
                assert!((v - last).abs() <= max_step, "jump at t={}: {} -> {}", t, last, v);
                last = v;
            }
            assert_eq!(curve.evaluate(next.time), next.value);
        }
    }

    #[test]
    fn test_single_key_holds() {
        let mut curve = AnimationCurve::new("alpha");
        curve.add_keyframe(0.5, 3.0);
        assert_eq!(curve.evaluate(0.0), 3.0);
        assert_eq!(curve.evaluate(5.0), 3.0);
    }
}
