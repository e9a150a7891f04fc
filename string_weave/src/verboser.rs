use crate::planner::{Line, Termination};

pub enum Message<S> {
    /// Chord precomputation started for this many pairs.
    Baking(usize),
    /// A line was accepted by the planner.
    Line(Line<S>),
    Terminated(Termination),
}

pub trait Verboser<S> {
    fn verbose(&mut self, message: Message<S>);
}

pub struct Silent;

impl<S> Verboser<S> for Silent {
    fn verbose(&mut self, _: Message<S>) {}
}
