use image::GrayImage;
use num_traits::AsPrimitive;

use crate::{geometry::Point, Float, Grid};

/// Remaining darkness to capture, one value per pixel.
///
/// Values only ever go down: drawing a chord zeroes the pixels it crosses.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas<S> {
    values: Vec<S>,
    grid: Grid,
}

impl<S: Float> Canvas<S> {
    pub fn new(mut builder: impl FnMut(Point<usize>) -> S, grid: Grid) -> Self {
        let mut values = Vec::with_capacity(grid.len());
        for y in 0..grid.height {
            for x in 0..grid.width {
                values.push(builder(Point { x, y }));
            }
        }
        Self { values, grid }
    }

    /// Wraps row-major values, `None` if their count does not fit the grid.
    pub fn from_vec(values: Vec<S>, grid: Grid) -> Option<Self> {
        (values.len() == grid.len()).then_some(Self { values, grid })
    }

    /// Raw luma values, expected already inverted and masked so that ink is bright.
    pub fn from_luma(image: &GrayImage) -> Self
    where
        u8: AsPrimitive<S>,
    {
        Self {
            values: image.pixels().map(|pixel| pixel.0[0].as_()).collect(),
            grid: Grid {
                height: image.height() as usize,
                width: image.width() as usize,
            },
        }
    }

    /// Fit score of a path: the sum of the values it crosses. Repeated pixels
    /// count once per occurrence, pixels outside the canvas count as zero.
    pub fn darkness_sum(&self, path: &[Point<isize>]) -> S {
        path.iter()
            .filter_map(|&point| self.grid.index_of_signed(point))
            .fold(S::ZERO, |sum, index| sum + self.values[index])
    }

    /// Marks the ink along `path` as captured.
    pub fn consume(&mut self, path: &[Point<isize>]) {
        for &point in path {
            if let Some(index) = self.grid.index_of_signed(point) {
                self.values[index] = S::ZERO;
            }
        }
    }

    pub fn get(&self, point: Point<usize>) -> Option<S> {
        self.grid.index_of(point).map(|index| self.values[index])
    }

    pub fn values(&self) -> &[S] {
        &self.values
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Darkness still left on the whole canvas.
    pub fn remaining(&self) -> S {
        self.values.iter().fold(S::ZERO, |sum, &value| sum + value)
    }
}
