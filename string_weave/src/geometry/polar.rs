use serde::{Deserialize, Serialize};

use crate::Float;

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_angle<S: Float>(angle: S) -> S {
    let mut angle = angle % S::FULL_TURN;
    if angle < S::ZERO {
        angle += S::FULL_TURN;
    }
    // a tiny negative remainder plus a full turn rounds up to exactly 360
    if angle >= S::FULL_TURN {
        angle = S::ZERO;
    }
    angle
}

/// Position of the winder head: distance from the board centre and angle in degrees.
///
/// The angle is kept in `[0, 360)` after every update.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polar<S> {
    pub radius: S,
    pub angle: S,
}

impl<S: Float> Polar<S> {
    pub fn new(radius: S, angle: S) -> Self {
        Self {
            radius,
            angle: normalize_angle(angle),
        }
    }

    pub fn origin() -> Self {
        Self {
            radius: S::ZERO,
            angle: S::ZERO,
        }
    }

    /// Applies a radial and an angular delta.
    pub fn moved(self, dr: S, dtheta: S) -> Self {
        Self {
            radius: self.radius + dr,
            angle: normalize_angle(self.angle + dtheta),
        }
    }
}

impl<S: Float> Default for Polar<S> {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_angles_wrap_forward() {
        assert_eq!(normalize_angle(-30.0f64), 330.0);
        assert_eq!(normalize_angle(-720.0f64), 0.0);
        assert_eq!(normalize_angle(725.0f64), 5.0);
        assert_eq!(normalize_angle(360.0f64), 0.0);
    }

    #[test]
    fn tiny_negative_angle_stays_in_range() {
        let angle = normalize_angle(-1e-20f64);
        assert!((0.0..360.0).contains(&angle));
    }

    #[test]
    fn moves_accumulate_radius_and_wrap_angle() {
        let p = Polar::new(0.0f64, 350.0).moved(0.9, 20.0).moved(-0.4, -40.0);
        assert!((p.radius - 0.5).abs() < 1e-12);
        assert!((p.angle - 330.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn normalize_is_total_and_idempotent(angle in -1.0e7f64..1.0e7) {
            let once = normalize_angle(angle);
            prop_assert!((0.0..360.0).contains(&once));
            prop_assert_eq!(normalize_angle(once), once);
        }

        #[test]
        fn normalize_is_total_in_single_precision(angle in -1.0e5f32..1.0e5) {
            let once = normalize_angle(angle);
            prop_assert!((0.0..360.0).contains(&once));
            prop_assert_eq!(normalize_angle(once), once);
        }
    }
}
