use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, DivAssign, MulAssign, SubAssign},
};

use num_traits::{ConstOne, ConstZero};

/// Scalar used for brightness, string cost and angles.
pub trait Float:
    'static
    + Debug
    + Display
    + Sync
    + Send
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + num_traits::Float
    + num_traits::NumCast
    + ConstZero
    + ConstOne
{
    const TWO: Self;
    const PI: Self;
    /// Angle of peg 0, straight up in image coordinates.
    const FRAC_3PI_2: Self;
    const HALF_TURN: Self;
    const FULL_TURN: Self;
    /// Fraction of the board radius the head stops at before wrapping a peg.
    const APPROACH_RATIO: Self;
}

impl Float for f32 {
    const TWO: Self = 2.0;
    const PI: Self = core::f32::consts::PI;
    const FRAC_3PI_2: Self = 3.0 * core::f32::consts::FRAC_PI_2;
    const HALF_TURN: Self = 180.0;
    const FULL_TURN: Self = 360.0;
    const APPROACH_RATIO: Self = 0.9;
}

impl Float for f64 {
    const TWO: Self = 2.0;
    const PI: Self = core::f64::consts::PI;
    const FRAC_3PI_2: Self = 3.0 * core::f64::consts::FRAC_PI_2;
    const HALF_TURN: Self = 180.0;
    const FULL_TURN: Self = 360.0;
    const APPROACH_RATIO: Self = 0.9;
}
