use crate::error::{TfResult, TourForgeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_min_temp() -> f64 {
    1.0
}

/// One leg of a reheating run: cool from `start_temp` while above `end_temp`.
/// A phase that starts at or below `end_temp` completes without steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub start_temp: f64,
    pub end_temp: f64,
    pub cooling_rate: f64,
    pub iters_per_temp: usize,
}

impl Phase {
    pub fn new(start_temp: f64, end_temp: f64, cooling_rate: f64, iters_per_temp: usize) -> Self {
        Self {
            start_temp,
            end_temp,
            cooling_rate,
            iters_per_temp,
        }
    }

    fn validate(&self, index: usize) -> TfResult<()> {
        let bad = |msg: String| {
            Err(TourForgeError::InvalidArgument(format!(
                "phase {}: {}",
                index + 1,
                msg
            )))
        };
        if !positive(self.start_temp) || !positive(self.end_temp) {
            return bad(format!(
                "temperatures must be positive (start {}, end {})",
                self.start_temp, self.end_temp
            ));
        }
        check_rate(self.cooling_rate).or_else(bad)
    }
}

fn positive(temp: f64) -> bool {
    temp.is_finite() && temp > 0.0
}

fn check_rate(rate: f64) -> Result<(), String> {
    if rate > 0.0 && rate < 1.0 {
        Ok(())
    } else {
        Err(format!("cooling rate {} must lie strictly between 0 and 1", rate))
    }
}

/// How temperature evolves over a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    /// Geometric cooling from `initial_temp` until the temperature reaches `min_temp`.
    Standard {
        initial_temp: f64,
        cooling_rate: f64,
        iters_per_temp: usize,
        #[serde(default = "default_min_temp")]
        min_temp: f64,
    },
    /// Phases run in order. Each restarts at its own temperature.
    Reheating { phases: Vec<Phase> },
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::standard(1000.0, 0.995, 1000)
    }
}

impl Schedule {
    pub fn standard(initial_temp: f64, cooling_rate: f64, iters_per_temp: usize) -> Self {
        Schedule::Standard {
            initial_temp,
            cooling_rate,
            iters_per_temp,
            min_temp: default_min_temp(),
        }
    }

    pub fn reheating(phases: Vec<Phase>) -> Self {
        Schedule::Reheating { phases }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        let content = fs::read_to_string(path)?;
        let schedule: Schedule = serde_json::from_str(&content)?;
        Ok(schedule)
    }

    /// Rejects parameter sets that would never terminate.
    pub fn validate(&self) -> TfResult<()> {
        match self {
            Schedule::Standard {
                initial_temp,
                cooling_rate,
                min_temp,
                ..
            } => {
                if !positive(*initial_temp) || !positive(*min_temp) {
                    return Err(TourForgeError::InvalidArgument(format!(
                        "temperatures must be positive (initial {}, min {})",
                        initial_temp, min_temp
                    )));
                }
                check_rate(*cooling_rate).map_err(TourForgeError::InvalidArgument)
            }
            Schedule::Reheating { phases } => {
                if phases.is_empty() {
                    return Err(TourForgeError::InvalidArgument(
                        "reheating schedule has no phases".to_string(),
                    ));
                }
                phases
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, phase)| phase.validate(i))
            }
        }
    }

    pub fn phases(&self) -> Vec<Phase> {
        match self {
            Schedule::Standard {
                initial_temp,
                cooling_rate,
                iters_per_temp,
                min_temp,
            } => vec![Phase::new(*initial_temp, *min_temp, *cooling_rate, *iters_per_temp)],
            Schedule::Reheating { phases } => phases.clone(),
        }
    }
}
