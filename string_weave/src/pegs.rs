use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    geometry::{polar::normalize_angle, Point},
    Error, Float, Grid,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peg<S> {
    /// Pixel position used to rasterize chords.
    pub position: Point<isize>,
    /// Angular position in degrees used by the motion planner.
    pub angle: S,
}

/// Pegs evenly spread on a circle, peg 0 at the top and indexes growing clockwise
/// on screen.
#[derive(Clone, Debug)]
pub struct PegLayout<S> {
    pegs: Vec<Peg<S>>,
    radius: S,
}

impl<S: Float> PegLayout<S> {
    /// Layout inscribed in a grid: centred on it, radius half of its smaller side.
    pub fn for_grid(peg_count: usize, grid: Grid) -> Result<Self, Error>
    where
        usize: AsPrimitive<S>,
        S: AsPrimitive<isize>,
    {
        let center = Point {
            x: grid.width / 2,
            y: grid.height / 2,
        };
        let radius = grid.width.min(grid.height) / 2;
        Self::new(peg_count, center.as_(), radius.as_())
    }

    pub fn new(peg_count: usize, center: Point<S>, radius: S) -> Result<Self, Error>
    where
        usize: AsPrimitive<S>,
        S: AsPrimitive<isize>,
    {
        if peg_count <= 1 {
            return Err(config::Error::PegCount(peg_count).into());
        }
        if !(radius.is_finite() && radius > S::ZERO) {
            return Err(config::Error::Radius(radius.to_f64().unwrap_or(f64::NAN)).into());
        }
        let step = S::TWO * S::PI / peg_count.as_();
        let angle_step = S::FULL_TURN / peg_count.as_();
        let pegs = (0..peg_count)
            .map(|i| {
                let theta = S::FRAC_3PI_2 + i.as_() * step;
                let position = Point {
                    x: center.x + radius * theta.cos(),
                    y: center.y + radius * theta.sin(),
                }
                .floor()
                .as_();
                Peg {
                    position,
                    angle: normalize_angle(angle_step * i.as_()),
                }
            })
            .collect();
        Ok(Self { pegs, radius })
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    pub fn pegs(&self) -> &[Peg<S>] {
        &self.pegs
    }

    pub fn peg(&self, index: usize) -> Result<&Peg<S>, Error> {
        self.pegs.get(index).ok_or(Error::InvalidPegIndex {
            index,
            count: self.pegs.len(),
        })
    }

    /// Board radius in pixels.
    pub fn radius(&self) -> S {
        self.radius
    }

    /// Half the angular spacing between adjacent pegs, in degrees.
    pub fn half_step(&self) -> S
    where
        usize: AsPrimitive<S>,
    {
        S::HALF_TURN / self.pegs.len().as_()
    }
}
