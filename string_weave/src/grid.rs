use num_traits::{NumCast, Unsigned};
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T = usize> {
    pub height: T,
    pub width: T,
}

impl<T> Grid<T> {
    pub fn new(height: T, width: T) -> Self {
        Self { height, width }
    }
}

impl Grid {
    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    pub fn len(&self) -> usize {
        self.height * self.width
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of a signed pixel coordinate, `None` when it falls outside the grid.
    pub fn index_of_signed(&self, point: Point<isize>) -> Option<usize> {
        point.cast::<usize>().and_then(|point| self.index_of(point))
    }
}

impl<T: NumCast + Unsigned + PartialOrd + Copy> Grid<T> {
    pub fn index_of(&self, point: Point<T>) -> Option<T> {
        if point.x < self.width && point.y < self.height {
            Some(point.y * self.width + point.x)
        } else {
            None
        }
    }
}
