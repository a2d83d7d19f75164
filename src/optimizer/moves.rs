use super::tour::Tour;
use crate::error::TfResult;
use crate::instance::Instance;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which positions a move touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// No-op, used when the tour is too small to perturb.
    Identity,
    /// Exchange the cities at positions `i` and `j`.
    Swap { i: usize, j: usize },
    /// Remove the city at `from` and reinsert it so it ends up at `to`.
    Insertion { from: usize, to: usize },
}

/// A proposed neighbor together with its exact cost change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub kind: MoveKind,
    pub delta: f64,
}

impl Move {
    pub fn identity() -> Self {
        Self {
            kind: MoveKind::Identity,
            delta: 0.0,
        }
    }

    /// The neighbor tour, leaving `tour` untouched.
    pub fn apply(&self, tour: &[usize]) -> Tour {
        let mut next = tour.to_vec();
        self.apply_in_place(&mut next);
        next
    }

    pub fn apply_in_place(&self, tour: &mut [usize]) {
        match self.kind {
            MoveKind::Identity => {}
            MoveKind::Swap { i, j } => tour.swap(i, j),
            MoveKind::Insertion { from, to } => {
                if from < to {
                    tour[from..=to].rotate_left(1);
                } else if to < from {
                    tour[to..=from].rotate_right(1);
                }
            }
        }
    }
}

/// Produces neighbor moves. Implementations may only consume `rng`.
pub trait MoveGenerator {
    fn propose(&self, tour: &[usize], instance: &Instance, rng: &mut Rng) -> TfResult<Move>;

    /// `(neighbor, delta)` where `delta == cost(neighbor) - current_cost`.
    fn neighbor(
        &self,
        tour: &[usize],
        _current_cost: f64,
        instance: &Instance,
        rng: &mut Rng,
    ) -> TfResult<(Tour, f64)> {
        let mv = self.propose(tour, instance, rng)?;
        Ok((mv.apply(tour), mv.delta))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    Swap,
    #[default]
    Insertion,
}

impl MoveGenerator for Neighborhood {
    fn propose(&self, tour: &[usize], instance: &Instance, rng: &mut Rng) -> TfResult<Move> {
        let n = tour.len();
        if n <= 1 {
            return Ok(Move::identity());
        }

        let a = rng.usize(0..n);
        let mut b = rng.usize(0..n - 1);
        if b >= a {
            b += 1;
        }

        match self {
            Neighborhood::Swap => Ok(Move {
                kind: MoveKind::Swap { i: a, j: b },
                delta: swap_delta(tour, a, b, instance)?,
            }),
            Neighborhood::Insertion => Ok(Move {
                kind: MoveKind::Insertion { from: a, to: b },
                delta: insertion_delta(tour, a, b, instance)?,
            }),
        }
    }
}

/// Cost change of exchanging positions `i` and `j`, from the edges around them only.
pub fn swap_delta(tour: &[usize], i: usize, j: usize, instance: &Instance) -> TfResult<f64> {
    let n = tour.len();
    // Any swap in a 2-cycle yields the same cycle.
    if i == j || n <= 2 {
        return Ok(0.0);
    }
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    let d = |a: usize, b: usize| instance.distance(a, b);

    // Neighbouring positions share an edge. (0, n-1) are neighbours across the wrap.
    if j == i + 1 || (i == 0 && j == n - 1) {
        let (first, second) = if j == i + 1 { (i, j) } else { (j, i) };
        let a = tour[first];
        let b = tour[second];
        let before_a = tour[(first + n - 1) % n];
        let after_b = tour[(second + 1) % n];

        let old = d(before_a, a)? + d(a, b)? + d(b, after_b)?;
        let new = d(before_a, b)? + d(b, a)? + d(a, after_b)?;
        return Ok(new - old);
    }

    let a = tour[i];
    let b = tour[j];
    let a_prev = tour[(i + n - 1) % n];
    let a_next = tour[(i + 1) % n];
    let b_prev = tour[(j + n - 1) % n];
    let b_next = tour[(j + 1) % n];

    let old = d(a_prev, a)? + d(a, a_next)? + d(b_prev, b)? + d(b, b_next)?;
    let new = d(a_prev, b)? + d(b, a_next)? + d(b_prev, a)? + d(a, b_next)?;
    Ok(new - old)
}

/// Cost change of moving the city at `from` so that it lands at position `to`.
///
/// The splice point is located in the tour *after* removal, where every
/// position at or beyond `from` has shifted down by one.
pub fn insertion_delta(tour: &[usize], from: usize, to: usize, instance: &Instance) -> TfResult<f64> {
    let n = tour.len();
    if from == to || n <= 1 {
        return Ok(0.0);
    }
    let d = |a: usize, b: usize| instance.distance(a, b);

    let city = tour[from];
    let prev = tour[(from + n - 1) % n];
    let next = tour[(from + 1) % n];
    let removal = d(prev, next)? - d(prev, city)? - d(city, next)?;

    let m = n - 1;
    let shifted = |k: usize| if k < from { tour[k] } else { tour[k + 1] };
    let left = shifted((to + m - 1) % m);
    let right = shifted(to % m);
    let splice = d(left, city)? + d(city, right)? - d(left, right)?;

    Ok(removal + splice)
}
