use super::moves::{MoveGenerator, Neighborhood};
use super::schedule::{Phase, Schedule};
use super::tour::Tour;
use super::trace::{Trace, TraceEntry};
use super::Walker;
use crate::error::{TfResult, TourForgeError};
use crate::instance::Instance;
use fastrand::Rng;
use tracing::{debug, info};

/// What one cooling leg did.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSummary {
    pub start_temperature: f64,
    pub final_temperature: f64,
    pub temperature_steps: usize,
    pub iterations: usize,
    pub best_cost: f64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub tour: Tour,
    /// Full cost of `tour`, recomputed from scratch.
    pub cost: f64,
    pub trace: Trace,
    pub phases: Vec<PhaseSummary>,
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
}

impl SearchOutcome {
    pub fn obtained_cost(&self) -> f64 {
        self.cost
    }

    /// Best tour as 0-based node indices.
    pub fn tour_as_sequence(&self) -> &[usize] {
        &self.tour
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.iterations as f64
        }
    }
}

/// Simulated annealing over one instance, one neighborhood and one schedule.
pub struct Optimizer<'a, G: MoveGenerator = Neighborhood> {
    instance: &'a Instance,
    generator: G,
    schedule: Schedule,
}

impl<'a, G: MoveGenerator> Optimizer<'a, G> {
    pub fn new(instance: &'a Instance, generator: G, schedule: Schedule) -> Self {
        Self {
            instance,
            generator,
            schedule,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn run(&self, seed: Option<u64>) -> TfResult<SearchOutcome> {
        let mut rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        self.run_with_rng(&mut rng)
    }

    pub fn run_with_rng(&self, rng: &mut Rng) -> TfResult<SearchOutcome> {
        if self.instance.dimension == 0 {
            return Err(TourForgeError::InvalidArgument(format!(
                "instance '{}' has no nodes",
                self.instance.name
            )));
        }
        self.schedule.validate()?;

        let walker = Walker::new(self.instance, rng)?;
        info!(
            "🔥 Annealing '{}' ({} nodes), initial cost {:.2}",
            self.instance.name, self.instance.dimension, walker.cost
        );

        let outcome = match &self.schedule {
            Schedule::Standard {
                initial_temp,
                cooling_rate,
                iters_per_temp,
                min_temp,
            } => {
                let phase = Phase::new(*initial_temp, *min_temp, *cooling_rate, *iters_per_temp);
                self.run_standard(walker, phase, rng)?
            }
            Schedule::Reheating { phases } => self.run_reheating(walker, phases, rng)?,
        };

        info!(
            "🏁 Best cost {:.2} after {} iterations ({} accepted, {} improving)",
            outcome.cost, outcome.iterations, outcome.accepted_moves, outcome.improving_moves
        );
        Ok(outcome)
    }

    /// Single geometric cooling run. Traces every inner iteration.
    fn run_standard(&self, mut walker: Walker<'a>, phase: Phase, rng: &mut Rng) -> TfResult<SearchOutcome> {
        let mut best = walker.tour.clone();
        let mut best_cost = walker.cost;
        let mut trace = Trace::new();
        let mut iterations = 0;
        let mut steps = 0;
        let mut temperature = phase.start_temp;

        if phase.iters_per_temp > 0 {
            while temperature > phase.end_temp {
                for _ in 0..phase.iters_per_temp {
                    walker.step(&self.generator, temperature, rng)?;
                    if walker.cost < best_cost {
                        best.clone_from(&walker.tour);
                        best_cost = walker.cost;
                    }
                    iterations += 1;
                    trace.push(TraceEntry {
                        iteration: iterations,
                        temperature,
                        cost: walker.cost,
                        best_cost,
                    });
                }
                steps += 1;
                debug!(
                    "T={:.4} cost={:.2} best={:.2}",
                    temperature, walker.cost, best_cost
                );
                temperature *= phase.cooling_rate;
            }
        }

        let summary = PhaseSummary {
            start_temperature: phase.start_temp,
            final_temperature: temperature,
            temperature_steps: steps,
            iterations,
            best_cost,
        };
        self.finish(walker, best, trace, vec![summary], iterations)
    }

    /// Phases in order, each restarting at its own temperature from the current tour.
    /// A phase's best only reaches the global best when the phase ends.
    fn run_reheating(
        &self,
        mut walker: Walker<'a>,
        phases: &[Phase],
        rng: &mut Rng,
    ) -> TfResult<SearchOutcome> {
        let mut best = walker.tour.clone();
        let mut best_cost = walker.cost;
        let mut trace = Trace::new();
        let mut summaries = Vec::with_capacity(phases.len());
        let mut iterations = 0;
        let mut step_index = 0;

        for (k, phase) in phases.iter().enumerate() {
            info!(
                "♨️  Phase {}/{}: T {} -> {} (rate {}, {} iters/T)",
                k + 1,
                phases.len(),
                phase.start_temp,
                phase.end_temp,
                phase.cooling_rate,
                phase.iters_per_temp
            );

            let mut phase_best = walker.tour.clone();
            let mut phase_best_cost = walker.cost;
            let mut phase_iterations = 0;
            let mut steps = 0;
            let mut temperature = phase.start_temp;

            if phase.iters_per_temp > 0 {
                while temperature > phase.end_temp {
                    for _ in 0..phase.iters_per_temp {
                        walker.step(&self.generator, temperature, rng)?;
                        if walker.cost < phase_best_cost {
                            phase_best.clone_from(&walker.tour);
                            phase_best_cost = walker.cost;
                        }
                        phase_iterations += 1;
                    }
                    steps += 1;
                    step_index += 1;
                    trace.push(TraceEntry {
                        iteration: step_index,
                        temperature,
                        cost: walker.cost,
                        best_cost: best_cost.min(phase_best_cost),
                    });
                    debug!(
                        "phase {} T={:.4} cost={:.2} phase best={:.2}",
                        k + 1,
                        temperature,
                        walker.cost,
                        phase_best_cost
                    );
                    temperature *= phase.cooling_rate;
                }
            }

            if phase_best_cost < best_cost {
                best = phase_best;
                best_cost = phase_best_cost;
            }
            iterations += phase_iterations;
            info!(
                "✅ Phase {} done: {} steps, phase best {:.2}, global best {:.2}",
                k + 1,
                steps,
                phase_best_cost,
                best_cost
            );

            summaries.push(PhaseSummary {
                start_temperature: phase.start_temp,
                final_temperature: temperature,
                temperature_steps: steps,
                iterations: phase_iterations,
                best_cost: phase_best_cost,
            });
        }

        self.finish(walker, best, trace, summaries, iterations)
    }

    fn finish(
        &self,
        walker: Walker<'a>,
        best: Tour,
        trace: Trace,
        phases: Vec<PhaseSummary>,
        iterations: usize,
    ) -> TfResult<SearchOutcome> {
        let cost = self.instance.tour_cost(&best)?;
        Ok(SearchOutcome {
            tour: best,
            cost,
            trace,
            phases,
            iterations,
            accepted_moves: walker.accepted,
            improving_moves: walker.improving,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::EdgeMatrix;

    fn tiny() -> Instance {
        let m = EdgeMatrix::from_rows(&[
            vec![0, 1, 9, 1],
            vec![1, 0, 1, 9],
            vec![9, 1, 0, 1],
            vec![1, 9, 1, 0],
        ])
        .unwrap();
        Instance::from_matrix("ring4", m)
    }

    #[test]
    fn test_zero_iterations_completes_immediately() {
        let inst = tiny();
        let opt = Optimizer::new(&inst, Neighborhood::Swap, Schedule::standard(100.0, 0.9, 0));
        let out = opt.run(Some(3)).unwrap();
        assert_eq!(out.iterations, 0);
        assert!(out.trace.is_empty());
        assert_eq!(out.tour.len(), 4);
    }

    #[test]
    fn test_finds_ring_optimum() {
        let inst = tiny();
        let opt = Optimizer::new(&inst, Neighborhood::Insertion, Schedule::standard(10.0, 0.9, 50));
        let out = opt.run(Some(11)).unwrap();
        assert_eq!(out.obtained_cost(), 4.0);
    }

    #[test]
    fn test_invalid_schedule_is_rejected_before_running() {
        let inst = tiny();
        let opt = Optimizer::new(&inst, Neighborhood::Swap, Schedule::standard(100.0, 1.5, 10));
        assert!(matches!(opt.run(Some(1)), Err(TourForgeError::InvalidArgument(_))));
    }
}
