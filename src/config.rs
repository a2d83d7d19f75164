use crate::error::{TfResult, TourForgeError};
use crate::instance::WeightRounding;
use crate::optimizer::{Neighborhood, Phase, Schedule};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Phase list of the multi-phase reheating run, `start:end:rate:iters` each.
pub const DEFAULT_PHASES: &str =
    "1000:100:0.995:1000,500:50:0.99:1000,1000:25:0.98:1000,250:1:0.9:1000";

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub instance: InstanceParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Standard,
    Reheating,
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    #[arg(long, value_enum, default_value_t = Algorithm::Standard)]
    pub algorithm: Algorithm,
    #[arg(long, value_enum, default_value_t = Neighborhood::Insertion)]
    pub neighborhood: Neighborhood,

    // === STANDARD ===
    #[arg(long, default_value_t = 1000.0)]
    pub initial_temp: f64,
    #[arg(long, default_value_t = 0.995)]
    pub cooling_rate: f64,
    #[arg(long, default_value_t = 1000)]
    pub iters_per_temp: usize,
    #[arg(long, default_value_t = 1.0)]
    pub min_temp: f64,

    // === REHEATING ===
    #[arg(long, default_value = DEFAULT_PHASES)]
    pub phases: String,

    /// JSON schedule file; overrides every flag above.
    #[arg(long)]
    pub schedule: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Standard,
            neighborhood: Neighborhood::Insertion,
            initial_temp: 1000.0,
            cooling_rate: 0.995,
            iters_per_temp: 1000,
            min_temp: 1.0,
            phases: DEFAULT_PHASES.to_string(),
            schedule: None,
            seed: None,
        }
    }
}

impl SearchParams {
    /// Resolves the flags (or the schedule file) into a validated schedule.
    pub fn to_schedule(&self) -> TfResult<Schedule> {
        let schedule = if let Some(path) = &self.schedule {
            Schedule::load_from_file(path)?
        } else {
            match self.algorithm {
                Algorithm::Standard => Schedule::Standard {
                    initial_temp: self.initial_temp,
                    cooling_rate: self.cooling_rate,
                    iters_per_temp: self.iters_per_temp,
                    min_temp: self.min_temp,
                },
                Algorithm::Reheating => Schedule::reheating(parse_phases(&self.phases)?),
            }
        };
        schedule
            .validate()
            .map_err(|e| TourForgeError::Config(e.to_string()))?;
        Ok(schedule)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct InstanceParams {
    /// Round formula distances the TSPLIB way (nint, GEO truncated).
    #[arg(long, default_value_t = false)]
    pub tsplib_weights: bool,
}

impl InstanceParams {
    pub fn rounding(&self) -> WeightRounding {
        if self.tsplib_weights {
            WeightRounding::Tsplib
        } else {
            WeightRounding::Raw
        }
    }
}

/// Parses `"start:end:rate:iters,..."` into phases.
pub fn parse_phases(input: &str) -> TfResult<Vec<Phase>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
            if parts.len() != 4 {
                return Err(TourForgeError::Config(format!(
                    "phase '{}' must have the form start:end:rate:iters",
                    entry
                )));
            }
            let float = |s: &str| {
                s.parse::<f64>()
                    .map_err(|_| TourForgeError::Config(format!("invalid number '{}' in phase '{}'", s, entry)))
            };
            let iters = parts[3].parse::<usize>().map_err(|_| {
                TourForgeError::Config(format!("invalid iteration count '{}' in phase '{}'", parts[3], entry))
            })?;
            Ok(Phase::new(float(parts[0])?, float(parts[1])?, float(parts[2])?, iters))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phases_parse() {
        let phases = parse_phases(DEFAULT_PHASES).unwrap();
        assert_eq!(phases.len(), 4);
        assert_eq!(phases[0], Phase::new(1000.0, 100.0, 0.995, 1000));
        assert_eq!(phases[3], Phase::new(250.0, 1.0, 0.9, 1000));
    }

    #[test]
    fn test_malformed_phase_is_config_error() {
        assert!(matches!(parse_phases("10:1:0.9"), Err(TourForgeError::Config(_))));
        assert!(matches!(parse_phases("10:1:abc:5"), Err(TourForgeError::Config(_))));
    }

    #[test]
    fn test_invalid_flags_are_config_errors() {
        let params = SearchParams {
            cooling_rate: 1.2,
            ..SearchParams::default()
        };
        assert!(matches!(params.to_schedule(), Err(TourForgeError::Config(_))));
    }
}
