//! Per-step trace of a traversal
//!
//! Everything a presentation layer needs to replay a hunt: the cell, its
//! kind, how the walker got there and the multipliers in force for that
//! move.

use crate::board::{Board, CellKind, Coord};
use crate::topology::{teleport_displacement, Direction};
use serde::{Deserialize, Serialize};

/// Gravity and speed carried by a search branch
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    pub gravity: f64,
    pub speed: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            speed: 1.0,
        }
    }
}

impl Multipliers {
    /// Cost of one elementary move
    pub fn step_cost(self) -> f64 {
        self.gravity / self.speed
    }

    /// Apply the multiplier change of `kind`, if it has one
    pub fn apply(self, kind: CellKind) -> Self {
        let Self { gravity, speed } = self;
        match kind {
            CellKind::Trap1 => Self { gravity: gravity * 2.0, speed },
            CellKind::Trap2 => Self { gravity, speed: speed / 2.0 },
            CellKind::Reward1 => Self { gravity: gravity / 2.0, speed },
            CellKind::Reward2 => Self { gravity, speed: speed * 2.0 },
            CellKind::Empty
            | CellKind::Obstacle
            | CellKind::Treasure
            | CellKind::Trap3
            | CellKind::Trap4 => self,
        }
    }
}

/// How a path cell was reached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrival {
    /// First cell of the traversal
    Start,
    /// One elementary move along a heading
    Move(Direction),
    /// Thrown by a teleport trap entered along a heading; costs nothing extra
    Teleport(Direction),
}

/// One cell of a traversal
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub coord: Coord,
    pub kind: CellKind,
    pub arrival: Arrival,
    /// Multipliers in force for the move that reached this cell
    pub multipliers: Multipliers,
}

impl Step {
    pub fn start(coord: Coord, kind: CellKind, multipliers: Multipliers) -> Self {
        Self {
            coord,
            kind,
            arrival: Arrival::Start,
            multipliers,
        }
    }

    /// Cost charged for arriving here
    pub fn cost(&self) -> f64 {
        match self.arrival {
            Arrival::Move(_) => self.multipliers.step_cost(),
            Arrival::Start | Arrival::Teleport(_) => 0.0,
        }
    }

    /// Step units charged for arriving here (moves scaled by speed)
    pub fn step_units(&self) -> f64 {
        match self.arrival {
            Arrival::Move(_) => 1.0 / self.multipliers.speed,
            Arrival::Start | Arrival::Teleport(_) => 0.0,
        }
    }
}

/// Problems found when re-walking a trace
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceViolation {
    Blocked { index: usize, coord: Coord },
    NotAdjacent { index: usize, from: Coord, to: Coord },
    BadTeleport { index: usize, from: Coord, to: Coord },
    /// A start step somewhere other than the first position
    MisplacedStart { index: usize, coord: Coord },
}

/// Ordered steps of a traversal
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Coordinates in walking order
    pub fn coords(&self) -> Vec<Coord> {
        self.steps.iter().map(|s| s.coord).collect()
    }

    /// Append a leg, dropping its first step when it repeats our last cell
    pub fn extend_leg(&mut self, leg: &[Step]) {
        let skip = match (self.steps.last(), leg.first()) {
            (Some(last), Some(first)) if last.coord == first.coord => 1,
            _ => 0,
        };
        self.steps.extend_from_slice(&leg[skip.min(leg.len())..]);
    }

    /// Σ gravity/speed over every move
    pub fn energy(&self) -> f64 {
        self.steps.iter().map(Step::cost).sum()
    }

    /// Σ 1/speed over every move
    pub fn step_units(&self) -> f64 {
        self.steps.iter().map(Step::step_units).sum()
    }

    /// Number of elementary moves, teleports excluded
    pub fn move_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.arrival, Arrival::Move(_)))
            .count()
    }

    /// Running (energy, step units) after each step
    pub fn cumulative(&self) -> Vec<(f64, f64)> {
        self.steps
            .iter()
            .scan((0.0, 0.0), |acc, step| {
                acc.0 += step.cost();
                acc.1 += step.step_units();
                Some(*acc)
            })
            .collect()
    }

    /// Re-walk the trace against `board`
    pub fn validate(&self, board: &Board) -> Result<(), TraceViolation> {
        for (index, step) in self.steps.iter().enumerate() {
            if !board.is_traversable(step.coord) {
                return Err(TraceViolation::Blocked {
                    index,
                    coord: step.coord,
                });
            }
            if index == 0 {
                continue;
            }
            let from = self.steps[index - 1].coord;
            match step.arrival {
                Arrival::Start => {
                    return Err(TraceViolation::MisplacedStart {
                        index,
                        coord: step.coord,
                    });
                }
                Arrival::Move(_) => {
                    if Direction::between(from, step.coord).is_none() {
                        return Err(TraceViolation::NotAdjacent {
                            index,
                            from,
                            to: step.coord,
                        });
                    }
                }
                Arrival::Teleport(dir) => {
                    if from.offset(teleport_displacement(dir)) != step.coord {
                        return Err(TraceViolation::BadTeleport {
                            index,
                            from,
                            to: step.coord,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
