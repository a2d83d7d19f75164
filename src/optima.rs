use crate::error::TfResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN: &str = include_str!("../data/known_optima.json");

/// Published optimal tour lengths keyed by instance name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownOptima {
    entries: BTreeMap<String, f64>,
}

impl KnownOptima {
    /// The TSPLIB table shipped with the crate.
    pub fn builtin() -> TfResult<Self> {
        Ok(serde_json::from_str(BUILTIN)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn lookup(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    pub fn insert(&mut self, name: &str, optimum: f64) {
        self.entries.insert(name.to_string(), optimum);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Percentage above the optimum.
pub fn gap(obtained: f64, optimal: f64) -> f64 {
    (obtained - optimal) / optimal * 100.0
}

/// Lookup key for an instance file: its stem, e.g. `berlin52` for `data/berlin52.tsp`.
pub fn instance_key<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
