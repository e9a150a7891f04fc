use std::ops::{Add, Mul, Sub};

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::Float;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Add for Point<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T> Add<T> for Point<T>
where
    T: Add<Output = T> + Clone,
{
    type Output = Self;

    fn add(self, scalar: T) -> Self {
        Point {
            x: self.x + scalar.clone(),
            y: self.y + scalar,
        }
    }
}

impl<T> Sub for Point<T>
where
    T: Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> Mul<T> for Point<T>
where
    T: Mul<Output = T> + Clone,
{
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        Point {
            x: self.x * scalar.clone(),
            y: self.y * scalar,
        }
    }
}

impl<T: Float> Point<T> {
    pub fn sq_distance(&self, other: &Self) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> T {
        num_traits::Float::sqrt(self.sq_distance(other))
    }

    pub fn floor(&self) -> Self {
        Self {
            x: self.x.floor(),
            y: self.y.floor(),
        }
    }

    /// Drops the fractional part, rounding toward zero.
    pub fn trunc(&self) -> Self {
        Self {
            x: self.x.trunc(),
            y: self.y.trunc(),
        }
    }
}

impl<S: num_traits::NumCast> Point<S> {
    pub fn cast<I: num_traits::NumCast>(self) -> Option<Point<I>> {
        num_traits::cast(self.x).and_then(|x| num_traits::cast(self.y).map(|y| Point { x, y }))
    }
}

impl<S> Point<S> {
    pub fn as_<I: Copy + 'static>(self) -> Point<I>
    where
        S: AsPrimitive<I>,
    {
        Point {
            x: self.x.as_(),
            y: self.y.as_(),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:2}, {:2})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0f64, 0.0);
        let b = Point::new(3.0f64, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn trunc_rounds_toward_zero() {
        let p = Point::new(-1.7f64, 2.7).trunc();
        assert_eq!(p, Point::new(-1.0, 2.0));
        assert_eq!(Point::new(-1.7f64, 2.7).floor(), Point::new(-2.0, 2.0));
    }
}
