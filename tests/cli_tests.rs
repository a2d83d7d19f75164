use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    instance_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let instance_path = dir.path().join("square8.tsp");

        // Octagon-ish ring: the optimal tour follows the ring.
        let mut file = File::create(&instance_path).unwrap();
        writeln!(file, "NAME: square8").unwrap();
        writeln!(file, "TYPE: TSP").unwrap();
        writeln!(file, "DIMENSION: 8").unwrap();
        writeln!(file, "EDGE_WEIGHT_TYPE: EUC_2D").unwrap();
        writeln!(file, "NODE_COORD_SECTION").unwrap();
        let coords = [(0, 0), (10, 0), (20, 0), (20, 10), (20, 20), (10, 20), (0, 20), (0, 10)];
        for (i, (x, y)) in coords.iter().enumerate() {
            writeln!(file, "{} {} {}", i + 1, x, y).unwrap();
        }
        writeln!(file, "EOF").unwrap();

        Self { dir, instance_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn tourforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tourforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn test_cli_solve_prints_summary_and_writes_trace() {
    let ctx = TestContext::new();
    let trace_path = ctx.path("trace.csv");
    let optima_path = ctx.path("optima.json");
    std::fs::write(&optima_path, r#"{"square8": 80}"#).unwrap();

    let output = tourforge(&[
        "solve",
        ctx.instance_path.to_str().unwrap(),
        "--seed",
        "7",
        "--initial-temp",
        "50",
        "--cooling-rate",
        "0.9",
        "--iters-per-temp",
        "200",
        "--trace-out",
        trace_path.to_str().unwrap(),
        "--optima",
        optima_path.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {}", stdout);

    assert!(stdout.contains("square8"));
    let tour_line = Regex::new(r"Tour: (\d+)( -> \d+){8}").unwrap();
    assert!(tour_line.is_match(&stdout), "no tour in: {}", stdout);

    // Cost cell of the summary row, e.g. "| 80.00 |".
    let cost = Regex::new(r"\|\s*square8\s*\|\s*8\s*\|\s*([0-9.]+)\s*\|").unwrap();
    let caps = cost.captures(&stdout).expect("summary row");
    let value: f64 = caps[1].parse().unwrap();
    assert!(value >= 80.0 - 1e-6);

    let trace = std::fs::read_to_string(&trace_path).unwrap();
    assert!(trace.starts_with("Iteration,Temperature,Cost,BestCost"));
    assert!(trace.lines().count() > 1);
}

#[test]
fn test_cli_solve_reheating_with_swap() {
    let ctx = TestContext::new();
    let output = tourforge(&[
        "solve",
        ctx.instance_path.to_str().unwrap(),
        "--algorithm",
        "reheating",
        "--neighborhood",
        "swap",
        "--phases",
        "50:5:0.8:100,20:1:0.7:100",
        "--seed",
        "3",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {}", stdout);
    assert!(stdout.contains("Phase"));
}

#[test]
fn test_cli_inspect() {
    let ctx = TestContext::new();
    let output = tourforge(&["inspect", ctx.instance_path.to_str().unwrap(), "--sample", "3"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("EUC_2D"));
    assert!(stdout.contains("10.00"));
}

#[test]
fn test_cli_missing_instance_fails() {
    let output = tourforge(&["solve", "no/such/file.tsp"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_bad_phases_fail() {
    let ctx = TestContext::new();
    let output = tourforge(&[
        "solve",
        ctx.instance_path.to_str().unwrap(),
        "--algorithm",
        "reheating",
        "--phases",
        "oops",
    ]);
    assert_eq!(output.status.code(), Some(1));
}
