use crate::reports::{self, RunSummary};
use clap::Args;
use std::time::Instant;
use tourforge::config::Config;
use tourforge::error::TfResult;
use tourforge::instance::Instance;
use tourforge::optima::{self, KnownOptima};
use tourforge::optimizer::{trace, Optimizer};
use tracing::{info, warn};

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    /// TSPLIB instance file.
    pub instance: String,

    #[command(flatten)]
    pub config: Config,

    /// Write the search trace as CSV.
    #[arg(long)]
    pub trace_out: Option<String>,

    /// JSON table of known optima, `{"name": cost}`. Defaults to the bundled TSPLIB table.
    #[arg(long)]
    pub optima: Option<String>,
}

pub fn run(args: SolveArgs) -> TfResult<()> {
    let instance =
        Instance::load_from_file(&args.instance)?.with_rounding(args.config.instance.rounding());
    let schedule = args.config.search.to_schedule()?;
    let optimizer = Optimizer::new(&instance, args.config.search.neighborhood, schedule);

    let start = Instant::now();
    let outcome = optimizer.run(args.config.search.seed)?;
    let elapsed = start.elapsed();

    let table = match &args.optima {
        Some(path) => KnownOptima::load_from_file(path)?,
        None => KnownOptima::builtin()?,
    };
    let key = optima::instance_key(&args.instance);
    let optimum = table.lookup(&key);
    if optimum.is_none() {
        warn!("No known optimum for '{}'", key);
    }

    reports::print_summary(&RunSummary {
        instance: &instance,
        outcome: &outcome,
        optimum,
        elapsed,
    });
    reports::print_tour(&instance, outcome.tour_as_sequence());

    if let Some(path) = &args.trace_out {
        trace::export_csv(path, &outcome.trace)?;
        info!("💾 Trace ({} rows) written to {}", outcome.trace.len(), path);
    }
    Ok(())
}
