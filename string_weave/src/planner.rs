use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    canvas::Canvas,
    chords::ChordTable,
    config::{self, Config},
    overlap::OverlapTracker,
    pair::PegPair,
    plan::Plan,
    recency::RecencyRing,
    verboser::{Message, Verboser},
    Error, Float,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The line ceiling was reached.
    MaxLinesReached,
    /// No legal candidate captures any darkness: the image is fully captured.
    NoImprovingMove,
    /// The string budget is spent.
    MaxCostReached,
}

impl Termination {
    /// Whether planning stopped because a budget ran out rather than because
    /// nothing was left to capture.
    pub fn is_budget(self) -> bool {
        !matches!(self, Termination::NoImprovingMove)
    }
}

/// A line accepted by the planner, as reported to rendering collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line<S> {
    pub from: usize,
    pub to: usize,
    /// String spent so far, this line included.
    pub total_cost: S,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StepResult<S> {
    Drawn(Line<S>),
    Terminated(Termination),
}

/// Greedy chord selection over a consumable canvas.
///
/// Each step links the current peg to the candidate whose chord crosses the most
/// remaining darkness, skipping recently visited pegs and pairs already linked
/// `max_overlap` times. Ties go to the lowest peg index.
pub struct GreedyPlanner<'a, S> {
    table: &'a ChordTable<S>,
    canvas: Canvas<S>,
    overlap: OverlapTracker,
    recent: RecencyRing,
    current: usize,
    total_cost: S,
    sequence: Vec<usize>,
    max_lines: Option<usize>,
    max_cost: Option<S>,
    max_overlap: u32,
    termination: Option<Termination>,
}

impl<'a, S: Float> GreedyPlanner<'a, S> {
    pub fn new(table: &'a ChordTable<S>, canvas: Canvas<S>, config: &Config) -> Result<Self, Error>
    where
        f64: AsPrimitive<S>,
    {
        config.validate()?;
        if config.peg_count != table.peg_count() {
            return Err(config::Error::PegCountMismatch {
                table: table.peg_count(),
                config: config.peg_count,
            }
            .into());
        }
        Ok(Self {
            table,
            canvas,
            overlap: OverlapTracker::new(table.peg_count()),
            recent: RecencyRing::new(config.recency_window(), config.start_peg),
            current: config.start_peg,
            total_cost: S::ZERO,
            sequence: vec![config.start_peg],
            max_lines: config.max_lines,
            max_cost: config.max_cost.map(|cost| cost.as_()),
            max_overlap: config.max_overlap,
            termination: None,
        })
    }

    /// Selects and draws the next line.
    ///
    /// Only the line ceiling is enforced here; the string budget is checked between
    /// steps through [`Self::check_budget`]. Once terminated, every further call
    /// returns the same termination.
    pub fn step(&mut self) -> StepResult<S> {
        if let Some(termination) = self.termination {
            return StepResult::Terminated(termination);
        }
        if self.max_lines.is_some_and(|max| self.lines() >= max) {
            return StepResult::Terminated(self.terminate(Termination::MaxLinesReached));
        }
        let Some(candidate) = self.best_candidate() else {
            return StepResult::Terminated(self.terminate(Termination::NoImprovingMove));
        };
        if self.sequence.last() == Some(&candidate) {
            return StepResult::Terminated(self.terminate(Termination::NoImprovingMove));
        }

        let pair = PegPair::ordered(self.current, candidate);
        let chord = self.table.entry(pair);
        self.canvas.consume(chord.path());
        self.overlap.increment(pair);
        self.total_cost += chord.cost();
        self.recent.push(candidate);
        self.sequence.push(candidate);
        let line = Line {
            from: self.current,
            to: candidate,
            total_cost: self.total_cost,
        };
        self.current = candidate;
        debug!(
            from = line.from,
            to = line.to,
            total_cost = %line.total_cost,
            "line drawn"
        );
        StepResult::Drawn(line)
    }

    /// Terminates with [`Termination::MaxCostReached`] once the string budget is spent.
    pub fn check_budget(&mut self) -> Option<Termination> {
        match (self.termination, self.max_cost) {
            (Some(termination), _) => Some(termination),
            (None, Some(max_cost)) if self.total_cost >= max_cost => {
                Some(self.terminate(Termination::MaxCostReached))
            }
            _ => None,
        }
    }

    /// Runs to completion, checking the string budget between steps.
    pub fn run(&mut self, verboser: &mut impl Verboser<S>) -> Termination {
        loop {
            if let Some(termination) = self.check_budget() {
                verboser.verbose(Message::Terminated(termination));
                return termination;
            }
            match self.step() {
                StepResult::Drawn(line) => verboser.verbose(Message::Line(line)),
                StepResult::Terminated(termination) => {
                    verboser.verbose(Message::Terminated(termination));
                    return termination;
                }
            }
        }
    }

    fn best_candidate(&self) -> Option<usize> {
        let mut best_score = S::ZERO;
        let mut best = None;
        for candidate in 0..self.table.peg_count() {
            if candidate == self.current || self.recent.contains(candidate) {
                continue;
            }
            let pair = PegPair::ordered(self.current, candidate);
            if self.overlap.count(pair) >= self.max_overlap {
                continue;
            }
            let score = self.canvas.darkness_sum(self.table.entry(pair).path());
            if score > best_score {
                best_score = score;
                best = Some(candidate);
            }
        }
        best
    }

    fn terminate(&mut self, termination: Termination) -> Termination {
        info!(
            ?termination,
            lines = self.lines(),
            total_cost = %self.total_cost,
            "planning finished"
        );
        self.termination = Some(termination);
        termination
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Visited pegs, start peg first.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Number of lines drawn so far.
    pub fn lines(&self) -> usize {
        self.sequence.len() - 1
    }

    pub fn total_cost(&self) -> S {
        self.total_cost
    }

    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    pub fn overlap(&self) -> &OverlapTracker {
        &self.overlap
    }

    pub fn recent(&self) -> &RecencyRing {
        &self.recent
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn into_plan(self) -> Plan<S> {
        Plan::new(self.sequence, self.total_cost, self.termination)
    }
}
