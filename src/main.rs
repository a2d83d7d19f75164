use clap::{Parser, Subcommand};
use std::process;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulated annealing for TSPLIB instances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Anneal an instance and report the best tour.
    Solve(cmd::solve::SolveArgs),
    /// Show instance metadata and a distance sample.
    Inspect(cmd::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let result = match cli.command {
        Commands::Solve(args) => cmd::solve::run(args),
        Commands::Inspect(args) => cmd::inspect::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
