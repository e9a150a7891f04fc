use serde::{Deserialize, Serialize};

/// Planning parameters shared by the chord table, the greedy planner and the motion planner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of pegs around the board.
    pub peg_count: usize,
    /// Physical board radius. String costs and motion deltas are expressed in its unit.
    pub real_radius: f64,
    /// Width in pixels of the lines drawn on the comparison rendering.
    pub string_thickness: u32,
    pub max_lines: Option<usize>,
    /// Stop once the cumulative string cost reaches this budget.
    pub max_cost: Option<f64>,
    /// How many times the same pair of pegs may be linked.
    pub max_overlap: u32,
    pub start_peg: usize,
    /// Pixel shift applied to both chord endpoints when sampling paths.
    /// Matches the radius of the peg markers on the reference renders.
    pub calibration_offset: isize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            peg_count: 36,
            real_radius: 0.75,
            string_thickness: 1,
            max_lines: Some(1000),
            max_cost: None,
            max_overlap: 5,
            start_peg: 0,
            calibration_offset: -2,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.peg_count <= 1 {
            return Err(Error::PegCount(self.peg_count));
        }
        if !(self.real_radius.is_finite() && self.real_radius > 0.0) {
            return Err(Error::Radius(self.real_radius));
        }
        if self.string_thickness == 0 {
            return Err(Error::StringThickness);
        }
        if self.max_lines == Some(0) {
            return Err(Error::MaxLines);
        }
        if let Some(max_cost) = self.max_cost {
            if !(max_cost.is_finite() && max_cost > 0.0) {
                return Err(Error::MaxCost(max_cost));
            }
        }
        if self.max_lines.is_none() && self.max_cost.is_none() {
            return Err(Error::NoCeiling);
        }
        if self.start_peg >= self.peg_count {
            return Err(Error::StartPeg {
                start: self.start_peg,
                count: self.peg_count,
            });
        }
        Ok(())
    }

    /// Capacity of the recency ring: a fifth of the pegs, rounded down.
    pub fn recency_window(&self) -> usize {
        self.peg_count / 5
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    #[error("Peg count must be greater than 1, got {0}")]
    PegCount(usize),
    #[error("Board radius must be a positive number, got {0}")]
    Radius(f64),
    #[error("String thickness must be at least one pixel")]
    StringThickness,
    #[error("Line ceiling must be positive")]
    MaxLines,
    #[error("String budget must be a positive number, got {0}")]
    MaxCost(f64),
    #[error("Either a line ceiling or a string budget is required")]
    NoCeiling,
    #[error("Start peg {start} is out of range for {count} pegs")]
    StartPeg { start: usize, count: usize },
    #[error("Chord table was built for {table} pegs but the configuration asks for {config}")]
    PegCountMismatch { table: usize, config: usize },
}
