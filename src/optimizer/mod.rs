pub mod moves;
pub mod runner;
pub mod schedule;
pub mod tour;
pub mod trace;

pub use self::moves::{Move, MoveGenerator, MoveKind, Neighborhood};
pub use self::runner::{Optimizer, PhaseSummary, SearchOutcome};
pub use self::schedule::{Phase, Schedule};
pub use self::tour::Tour;
pub use self::trace::{Trace, TraceEntry};

use crate::error::TfResult;
use crate::instance::Instance;
use fastrand::Rng;

/// Metropolis probability of accepting a move of cost change `delta` at `temperature`.
#[inline(always)]
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else if temperature <= 0.0 {
        0.0
    } else {
        (-delta / temperature).exp()
    }
}

/// The mutable state of one annealing walk over a borrowed instance.
pub struct Walker<'a> {
    pub instance: &'a Instance,
    pub tour: Tour,
    pub cost: f64,
    pub accepted: usize,
    pub improving: usize,
}

impl<'a> Walker<'a> {
    /// Starts from a random permutation drawn from `rng`.
    pub fn new(instance: &'a Instance, rng: &mut Rng) -> TfResult<Self> {
        let tour = tour::random_tour(rng, instance.dimension);
        let cost = instance.tour_cost(&tour)?;
        Ok(Self {
            instance,
            tour,
            cost,
            accepted: 0,
            improving: 0,
        })
    }

    /// Proposes one move and applies it if the Metropolis test passes.
    #[inline]
    pub fn step<G: MoveGenerator>(
        &mut self,
        generator: &G,
        temperature: f64,
        rng: &mut Rng,
    ) -> TfResult<bool> {
        let mv = generator.propose(&self.tour, self.instance, rng)?;

        let accept = mv.delta < 0.0 || rng.f64() < acceptance_probability(mv.delta, temperature);
        if accept {
            mv.apply_in_place(&mut self.tour);
            self.cost += mv.delta;
            self.accepted += 1;
            if mv.delta < 0.0 {
                self.improving += 1;
            }
        }
        Ok(accept)
    }
}
