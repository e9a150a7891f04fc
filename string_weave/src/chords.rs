use num_traits::AsPrimitive;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::info;

use crate::{
    config::{self, Config},
    geometry::Point,
    pair::PegPair,
    pegs::PegLayout,
    verboser::{Message, Verboser},
    Error, Float,
};

/// Rasterized path and string cost of the chord between two pegs.
#[derive(Clone, Debug, PartialEq)]
pub struct ChordEntry<S> {
    path: Vec<Point<isize>>,
    cost: S,
}

impl<S: Copy> ChordEntry<S> {
    /// Pixel samples along the chord, from the lower peg to the higher one.
    /// May contain repeated pixels and pixels outside the canvas.
    pub fn path(&self) -> &[Point<isize>] {
        &self.path
    }

    /// Physical string length spent by this chord.
    pub fn cost(&self) -> S {
        self.cost
    }
}

/// Every chord of a board, baked once and shared read-only afterwards.
#[derive(Clone, Debug)]
pub struct ChordTable<S> {
    entries: Vec<ChordEntry<S>>,
    peg_count: usize,
}

impl<S: Float> ChordTable<S> {
    pub fn from_config(
        layout: &PegLayout<S>,
        config: &Config,
        verboser: &mut impl Verboser<S>,
    ) -> Result<Self, Error>
    where
        f64: AsPrimitive<S>,
        isize: AsPrimitive<S>,
        usize: AsPrimitive<S>,
        S: AsPrimitive<isize>,
    {
        config.validate()?;
        if config.peg_count != layout.len() {
            return Err(config::Error::PegCountMismatch {
                table: layout.len(),
                config: config.peg_count,
            }
            .into());
        }
        Self::new(
            layout,
            config.real_radius.as_(),
            config.calibration_offset,
            verboser,
        )
    }

    /// Bakes the `N·(N−1)/2` chords of `layout`.
    ///
    /// Pairs are processed in parallel; the result does not depend on the thread count.
    pub fn new(
        layout: &PegLayout<S>,
        real_radius: S,
        calibration_offset: isize,
        verboser: &mut impl Verboser<S>,
    ) -> Result<Self, Error>
    where
        isize: AsPrimitive<S>,
        usize: AsPrimitive<S>,
        S: AsPrimitive<isize>,
    {
        if !(real_radius.is_finite() && real_radius > S::ZERO) {
            return Err(config::Error::Radius(real_radius.to_f64().unwrap_or(f64::NAN)).into());
        }
        let peg_count = layout.len();
        let pairs: Vec<PegPair> = PegPair::all(peg_count).collect();
        verboser.verbose(Message::Baking(pairs.len()));
        let scale = real_radius / layout.radius();
        let pegs = layout.pegs();
        let entries = pairs
            .par_iter()
            .map(|pair| {
                let start = pegs[pair.low()].position + calibration_offset;
                let end = pegs[pair.high()].position + calibration_offset;
                let length = start.as_::<S>().distance(&end.as_()).round();
                ChordEntry {
                    path: sample_path::<S>(start, end, length.to_usize().unwrap_or(0)),
                    cost: scale * length,
                }
            })
            .collect();
        info!(peg_count, chords = pairs.len(), "chord table baked");
        Ok(Self { entries, peg_count })
    }

    pub fn peg_count(&self) -> usize {
        self.peg_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chord between pegs `a` and `b`, in either order.
    pub fn chord(&self, a: usize, b: usize) -> Result<&ChordEntry<S>, Error> {
        for index in [a, b] {
            if index >= self.peg_count {
                return Err(Error::InvalidPegIndex {
                    index,
                    count: self.peg_count,
                });
            }
        }
        PegPair::new(a, b).map(|pair| self.entry(pair))
    }

    /// `pair` must come from a board of [`Self::peg_count`] pegs.
    pub(crate) fn entry(&self, pair: PegPair) -> &ChordEntry<S> {
        &self.entries[pair.index()]
    }
}

/// `length` evenly spaced samples from `start` to `end`, both included, each
/// coordinate truncated toward zero.
fn sample_path<S: Float>(start: Point<isize>, end: Point<isize>, length: usize) -> Vec<Point<isize>>
where
    isize: AsPrimitive<S>,
    usize: AsPrimitive<S>,
    S: AsPrimitive<isize>,
{
    match length {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let from = start.as_::<S>();
            let delta = end.as_::<S>() - from;
            let step = Point {
                x: delta.x / (length - 1).as_(),
                y: delta.y / (length - 1).as_(),
            };
            let mut path: Vec<Point<isize>> = (0..length - 1)
                .map(|i| (from + step * i.as_()).trunc().as_())
                .collect();
            path.push(end);
            path
        }
    }
}
