//! Wrap-around kinematics for a two-axis polar winder.
//!
//! The head moves in polar coordinates around the board centre. To hang the
//! string on a peg it approaches the point half a step before the peg, loops
//! around it, then turns toward the next peg so that it leaves the peg clear.

use std::fmt;

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    config,
    geometry::{polar::normalize_angle, Polar},
    pegs::PegLayout,
    Error, Float,
};

/// Side the head approaches a peg from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Same side as the head's current angle.
    N,
    /// Opposite side: the head crosses near the centre and comes in from behind.
    S,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::N => write!(f, "N"),
            Direction::S => write!(f, "S"),
        }
    }
}

/// One actuator command, all angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionCommand<S> {
    pub radial_delta: S,
    pub angular_delta: S,
    pub direction: Direction,
    pub continuation_angular_delta: S,
}

/// Transport format: `radius,theta,direction,theta2`.
impl<S: fmt::Display> fmt::Display for MotionCommand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.radial_delta, self.angular_delta, self.direction, self.continuation_angular_delta
        )
    }
}

/// One command per line.
pub fn commands_to_string<S: fmt::Display>(commands: &[MotionCommand<S>]) -> String {
    let mut out = String::new();
    for command in commands {
        out.push_str(&command.to_string());
        out.push('\n');
    }
    out
}

/// -1, 0 or 1. Unlike `signum`, zero maps to zero.
fn sign<S: Float>(value: S) -> S {
    if value > S::ZERO {
        S::ONE
    } else if value < S::ZERO {
        -S::ONE
    } else {
        S::ZERO
    }
}

/// First of `targets` closest to `reference`.
fn closest<S: Float>(targets: [S; 2], reference: S) -> S {
    let mut best = targets[0];
    for &target in &targets[1..] {
        if (target - reference).abs() < (best - reference).abs() {
            best = target;
        }
    }
    best
}

fn min_distance<S: Float>(targets: [S; 2], reference: S) -> S {
    (closest(targets, reference) - reference).abs()
}

/// Plans the wrap around the peg at `peg_angle`.
///
/// `next_peg_angle` is the angle of the peg that follows, or `peg_angle` itself
/// when there is none; in that case the head stops right after the wrap.
/// Returns the head location after the maneuver and the commands that perform it.
pub fn plan_wrap<S: Float>(
    location: Polar<S>,
    peg_angle: S,
    half_step: S,
    board_radius: S,
    next_peg_angle: S,
) -> (Polar<S>, Vec<MotionCommand<S>>) {
    let targets = [peg_angle - half_step, peg_angle - half_step - S::FULL_TURN];
    let north = normalize_angle(location.angle);
    let south = normalize_angle(north + S::HALF_TURN);

    // exact ties approach from the north side
    let (direction, reference, radial_delta, lookahead) =
        if min_distance(targets, north) <= min_distance(targets, south) {
            (
                Direction::N,
                north,
                board_radius * S::APPROACH_RATIO - location.radius,
                next_peg_angle,
            )
        } else {
            (
                Direction::S,
                south,
                -board_radius * S::APPROACH_RATIO - location.radius,
                next_peg_angle + S::HALF_TURN,
            )
        };
    let angular_delta = closest(targets, reference) - reference;

    let location = location
        .moved(radial_delta, angular_delta)
        .moved(S::ZERO, S::TWO * half_step);

    let continuation_angular_delta = if peg_angle == next_peg_angle {
        S::ZERO
    } else {
        let direct = lookahead - location.angle;
        let around = (S::FULL_TURN - direct.abs()) * -sign(direct);
        let shortest = if direct.abs() <= around.abs() {
            direct
        } else {
            around
        };
        // overshoot by half a step so the head clears the peg
        if shortest < S::ZERO {
            shortest - half_step
        } else {
            shortest + half_step
        }
    };
    let location = location.moved(S::ZERO, continuation_angular_delta);

    let command = MotionCommand {
        radial_delta,
        angular_delta,
        direction,
        continuation_angular_delta,
    };
    (location, vec![command])
}

/// Turns a peg sequence into actuator commands, tracking the head position.
///
/// The head never resets: its location carries over from one transition to the next.
pub struct MotionPlanner<'a, S> {
    layout: &'a PegLayout<S>,
    board_radius: S,
    half_step: S,
    location: Polar<S>,
}

impl<'a, S: Float> MotionPlanner<'a, S> {
    pub fn new(layout: &'a PegLayout<S>, board_radius: S) -> Result<Self, Error>
    where
        usize: AsPrimitive<S>,
    {
        if !(board_radius.is_finite() && board_radius > S::ZERO) {
            return Err(config::Error::Radius(board_radius.to_f64().unwrap_or(f64::NAN)).into());
        }
        Ok(Self {
            layout,
            board_radius,
            half_step: layout.half_step(),
            location: Polar::origin(),
        })
    }

    pub fn location(&self) -> Polar<S> {
        self.location
    }

    pub fn board_radius(&self) -> S {
        self.board_radius
    }

    /// Wraps the peg `target`, looking ahead to `next` when it is known.
    pub fn transition(
        &mut self,
        target: usize,
        next: Option<usize>,
    ) -> Result<Vec<MotionCommand<S>>, Error> {
        let peg_angle = self.layout.peg(target)?.angle;
        let next_angle = match next {
            Some(next) => self.layout.peg(next)?.angle,
            None => peg_angle,
        };
        let (location, commands) = plan_wrap(
            self.location,
            peg_angle,
            self.half_step,
            self.board_radius,
            next_angle,
        );
        for command in &commands {
            trace!(peg = target, %command, "motion command");
        }
        self.location = location;
        Ok(commands)
    }

    /// Commands for a whole planned sequence. The first peg is where the string
    /// starts and is not wrapped.
    ///
    /// Every index is checked before any motion is planned.
    pub fn plan_sequence(&mut self, pegs: &[usize]) -> Result<Vec<MotionCommand<S>>, Error> {
        for &peg in pegs {
            self.layout.peg(peg)?;
        }
        let mut commands = Vec::with_capacity(pegs.len().saturating_sub(1));
        for (offset, &target) in pegs.iter().enumerate().skip(1) {
            let next = pegs.get(offset + 1).copied();
            commands.extend(self.transition(target, next)?);
        }
        Ok(commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn wraps_from_the_north_when_already_facing_the_peg() {
        let (location, commands) = plan_wrap(Polar::origin(), 90.0f64, 5.0, 1.0, 90.0);
        assert_eq!(commands.len(), 1);
        let command = commands[0];
        assert_eq!(command.direction, Direction::N);
        assert_close(command.radial_delta, 0.9);
        assert_close(command.angular_delta, 85.0);
        assert_eq!(command.continuation_angular_delta, 0.0);
        assert_close(location.radius, 0.9);
        assert_close(location.angle, 95.0);
    }

    #[test]
    fn last_peg_has_no_continuation() {
        let half_step = 180.0 / 48.0;
        assert_eq!(half_step, 3.75);
        for start in [0.0f64, 100.0, 200.0, 300.0] {
            let location = Polar::new(0.5, start);
            let (_, commands) = plan_wrap(location, 75.0, half_step, 1.0, 75.0);
            assert_eq!(commands[0].continuation_angular_delta, 0.0);
        }
    }

    #[test]
    fn wraps_from_the_south_when_the_peg_is_behind() {
        let (location, commands) = plan_wrap(Polar::new(0.9f64, 0.0), 180.0, 5.0, 1.0, 270.0);
        let command = commands[0];
        assert_eq!(command.direction, Direction::S);
        assert_close(command.radial_delta, -1.8);
        assert_close(command.angular_delta, -5.0);
        // lookahead is 270 + 180 in the flipped frame; shortest path from 5 is +85
        assert_close(command.continuation_angular_delta, 90.0);
        assert_close(location.radius, -0.9);
        assert_close(location.angle, 95.0);
    }

    #[test]
    fn continuation_takes_the_short_way_round() {
        // after wrapping peg 10 the head sits at 15; peg 350 is 25 degrees back
        let (location, commands) = plan_wrap(Polar::new(0.9f64, 5.0), 10.0, 5.0, 1.0, 350.0);
        let command = commands[0];
        assert_eq!(command.direction, Direction::N);
        assert_close(command.angular_delta, 0.0);
        assert_close(command.continuation_angular_delta, -30.0);
        assert_close(location.angle, 345.0);
    }

    #[test]
    fn crossing_zero_picks_the_wrapped_target() {
        // peg 0: targets are -5 and -365, from 2 the head backs up through 355
        let (location, commands) = plan_wrap(Polar::new(0.9f64, 2.0), 0.0, 5.0, 1.0, 0.0);
        let command = commands[0];
        assert_eq!(command.direction, Direction::N);
        assert_close(command.angular_delta, -7.0);
        assert_close(location.angle, 5.0);
    }

    #[test]
    fn north_wins_exact_ties() {
        // targets 180 and -180 are both 90 degrees from the 90 and 270 references
        let (_, commands) = plan_wrap(Polar::new(0.0f64, 90.0), 185.0, 5.0, 1.0, 185.0);
        assert_eq!(commands[0].direction, Direction::N);
    }

    #[test]
    fn angles_stay_normalized_over_long_runs() {
        let layout = PegLayout::<f64>::for_grid(48, Grid::square(200)).expect("valid layout");
        let mut planner = MotionPlanner::new(&layout, 1.0).expect("valid planner");
        let pegs: Vec<usize> = (0..200).map(|i| (i * 17 + 3) % 48).collect();
        let commands = planner.plan_sequence(&pegs).expect("valid pegs");
        assert_eq!(commands.len(), pegs.len() - 1);
        let location = planner.location();
        assert!((0.0..360.0).contains(&location.angle));
        assert_eq!(commands.last().map(|c| c.continuation_angular_delta), Some(0.0));
    }

    #[test]
    fn transition_matches_plan_wrap() {
        let layout = PegLayout::<f64>::for_grid(36, Grid::square(200)).expect("valid layout");
        let mut planner = MotionPlanner::new(&layout, 1.0).expect("valid planner");
        let commands = planner.transition(9, Some(27)).expect("valid pegs");
        let (location, expected) = plan_wrap(Polar::origin(), 90.0, 5.0, 1.0, 270.0);
        assert_eq!(commands, expected);
        assert_eq!(planner.location(), location);
    }

    #[test]
    fn rejects_invalid_pegs_before_moving() {
        let layout = PegLayout::<f64>::for_grid(36, Grid::square(200)).expect("valid layout");
        let mut planner = MotionPlanner::new(&layout, 1.0).expect("valid planner");
        assert!(matches!(
            planner.plan_sequence(&[0, 4, 36]),
            Err(Error::InvalidPegIndex {
                index: 36,
                count: 36
            })
        ));
        assert_eq!(planner.location(), Polar::origin());
        assert!(matches!(
            planner.transition(3, Some(99)),
            Err(Error::InvalidPegIndex { index: 99, .. })
        ));
        assert!(MotionPlanner::new(&layout, 0.0).is_err());
    }

    #[test]
    fn commands_serialize_for_transport() {
        let command = MotionCommand {
            radial_delta: 0.9f64,
            angular_delta: 85.0,
            direction: Direction::N,
            continuation_angular_delta: -12.5,
        };
        assert_eq!(command.to_string(), "0.9,85,N,-12.5");
        assert_eq!(commands_to_string(&[command, command]).lines().count(), 2);
    }
}
