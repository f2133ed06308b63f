//! Scalar interpolation primitives.
//!
//! Pure functions, no error paths: out-of-range parameters are clamped
//! (piecewise) or extrapolated (lerp / bezier), never rejected.

use serde::{Deserialize, Serialize};

/// Per-segment easing for piecewise curves.
///
/// Serialized in camelCase (`"linear"`, `"easeIn"`, `"easeOut"`, `"easeInOut"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Reshape a linear fraction in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            // smoothstep
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Interpolate `a -> b` with this easing.
    #[inline]
    pub fn ease(self, a: f32, b: f32, t: f32) -> f32 {
        lerp(a, b, self.apply(t))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "easeIn",
            Easing::EaseOut => "easeOut",
            Easing::EaseInOut => "easeInOut",
        }
    }
}

/// Position-indexed key for [`piecewise_bezier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieceKey {
    pub value: f32,
    /// Easing of the segment that starts at this key.
    #[serde(default)]
    pub easing: Easing,
}

impl PieceKey {
    pub fn new(value: f32, easing: Easing) -> Self {
        Self { value, easing }
    }

    pub fn linear(value: f32) -> Self {
        Self::new(value, Easing::Linear)
    }
}

/// `a + (b - a) * t`. Extrapolates when `t` is outside [0, 1].
///
/// Written as `(1 - t) * a + t * b` so both endpoints are exact.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Cubic Bezier in Bernstein form.
#[inline]
pub fn bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    mt2 * mt * p0 + 3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t2 * t * p3
}

/// Evaluate evenly spaced keys over [0, 1].
///
/// N keys split the unit interval into N-1 equal segments. The segment's
/// starting key decides the easing used towards the next key.
pub fn piecewise_bezier(keys: &[PieceKey], t: f32) -> f32 {
    match keys {
        [] => 0.0,
        [only] => only.value,
        _ => {
            let segments = (keys.len() - 1) as f32;
            let scaled = t.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(keys.len() - 2);
            let local = scaled - index as f32;
            let from = &keys[index];
            let to = &keys[index + 1];
            from.easing.ease(from.value, to.value, local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_endpoints() {
        for (a, b) in [(0.0, 1.0), (-3.5, 12.0), (7.0, 7.0), (1e3, -1e3)] {
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
        }
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert_relative_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_relative_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn test_bezier_endpoints() {
        assert_eq!(bezier(2.0, 9.0, -4.0, 5.0, 0.0), 2.0);
        assert_eq!(bezier(2.0, 9.0, -4.0, 5.0, 1.0), 5.0);
    }

    #[test]
    fn test_bezier_midpoint() {
        // (p0 + 3p1 + 3p2 + p3) / 8
        assert_relative_eq!(bezier(0.0, 1.0, 1.0, 0.0, 0.5), 0.75);
    }

    #[test]
    fn test_piecewise_empty_and_single() {
        assert_eq!(piecewise_bezier(&[], 0.3), 0.0);
        assert_eq!(piecewise_bezier(&[], 7.0), 0.0);
        let single = [PieceKey::linear(5.0)];
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(piecewise_bezier(&single, t), 5.0);
        }
    }

    #[test]
    fn test_piecewise_segments() {
        let keys = [
            PieceKey::linear(0.0),
            PieceKey::new(10.0, Easing::EaseIn),
            PieceKey::linear(20.0),
        ];
        assert_relative_eq!(piecewise_bezier(&keys, 0.25), 5.0);
        // second segment, local 0.5, ease-in -> 10 + 10 * 0.25
        assert_relative_eq!(piecewise_bezier(&keys, 0.75), 12.5);
        assert_relative_eq!(piecewise_bezier(&keys, 1.0), 20.0);
    }

    #[test]
    fn test_piecewise_segment_boundaries() {
        let keys = [
            PieceKey::new(0.0, Easing::EaseOut),
            PieceKey::new(30.0, Easing::EaseInOut),
            PieceKey::new(-6.0, Easing::EaseIn),
            PieceKey::linear(12.0),
        ];
        // t = k/3 lands on key k; floor may pick either neighbouring segment
        assert_relative_eq!(piecewise_bezier(&keys, 0.0), 0.0);
        assert_relative_eq!(piecewise_bezier(&keys, 1.0 / 3.0), 30.0, epsilon = 1e-4);
        assert_relative_eq!(piecewise_bezier(&keys, 2.0 / 3.0), -6.0, epsilon = 1e-4);
        assert_relative_eq!(piecewise_bezier(&keys, 1.0), 12.0);

        // Continuity across each boundary
        for boundary in [1.0 / 3.0, 2.0 / 3.0] {
            let before = piecewise_bezier(&keys, boundary - 1e-4);
            let after = piecewise_bezier(&keys, boundary + 1e-4);
            assert!((before - after).abs() < 0.05, "jump at {}: {} vs {}", boundary, before, after);
        }

        // Middle of each segment uses that segment's easing
        assert_relative_eq!(piecewise_bezier(&keys, 1.0 / 6.0), 22.5, epsilon = 1e-3);
        assert_relative_eq!(piecewise_bezier(&keys, 0.5), 12.0, epsilon = 1e-3);
        assert_relative_eq!(piecewise_bezier(&keys, 5.0 / 6.0), -1.5, epsilon = 1e-3);
    }

    #[test]
    fn test_piecewise_clamps_t() {
        let keys = [PieceKey::linear(1.0), PieceKey::linear(3.0)];
        assert_eq!(piecewise_bezier(&keys, -2.0), 1.0);
        assert_eq!(piecewise_bezier(&keys, 4.0), 3.0);
    }

    #[test]
    fn test_easing_formulas() {
        assert_relative_eq!(Easing::EaseIn.ease(0.0, 8.0, 0.5), 2.0);
        assert_relative_eq!(Easing::EaseOut.ease(0.0, 8.0, 0.5), 6.0);
        assert_relative_eq!(Easing::EaseInOut.ease(0.0, 8.0, 0.5), 4.0);
        assert_relative_eq!(Easing::EaseInOut.ease(0.0, 8.0, 0.25), 8.0 * 0.15625);
    }

    #[test]
    fn test_easing_serde_names() {
        let key: PieceKey = serde_json::from_str(r#"{"value":1.0,"easing":"easeInOut"}"#).unwrap();
        assert_eq!(key.easing, Easing::EaseInOut);
        let key: PieceKey = serde_json::from_str(r#"{"value":1.0}"#).unwrap();
        assert_eq!(key.easing, Easing::Linear);
        assert_eq!(serde_json::to_string(&Easing::EaseOut).unwrap(), "\"easeOut\"");
    }
}
