use crate::error::TfResult;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADERS: [&str; 4] = ["Iteration", "Temperature", "Cost", "BestCost"];

/// One diagnostic sample of the search.
///
/// For standard cooling `iteration` counts inner moves; for reheating it
/// counts temperature steps across all phases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceEntry {
    #[serde(rename = "Iteration")]
    pub iteration: usize,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "BestCost")]
    pub best_cost: f64,
}

pub type Trace = Vec<TraceEntry>;

pub fn write_csv<W: Write>(writer: W, trace: &[TraceEntry]) -> TfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if trace.is_empty() {
        wtr.write_record(HEADERS)?;
    }
    for entry in trace {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv<P: AsRef<Path>>(path: P, trace: &[TraceEntry]) -> TfResult<()> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), trace)
}
