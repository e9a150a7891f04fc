pub mod geometry {
    pub mod point;
    pub mod polar;
    pub mod segment;

    pub use point::Point;
    pub use polar::{normalize_angle, Polar};
    pub use segment::Segment;
}

pub mod canvas;
pub mod chords;
pub mod comparison;
pub mod config;
mod error;
mod float;
pub mod grid;
pub mod motion;
pub mod overlap;
pub mod pair;
pub mod pegs;
pub mod plan;
pub mod planner;
pub mod preprocess;
pub mod recency;
pub mod verboser;

pub use canvas::Canvas;
pub use chords::{ChordEntry, ChordTable};
pub use config::Config;
pub use error::Error;
pub use float::Float;
pub use grid::Grid;
pub use motion::{plan_wrap, Direction, MotionCommand, MotionPlanner};
pub use pegs::{Peg, PegLayout};
pub use plan::Plan;
pub use planner::{GreedyPlanner, Line, StepResult, Termination};
