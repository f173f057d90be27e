//! Runs an FCFS simulation over a workload file and prints the report.
//!
//! Usage: `u-cpusched [PATH]` (defaults to `processes.txt`).

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::Level;

use u_cpusched::report::SimulationReport;
use u_cpusched::workload;

const DEFAULT_INPUT: &str = "processes.txt";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<SimulationReport> {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_INPUT.to_string());

    let mut loaded =
        workload::load_file(&path).with_context(|| format!("loading workload from {path}"))?;
    let simulator = loaded.simulator();
    let outcome = simulator
        .simulate(&mut loaded.processes)
        .context("running the FCFS simulation")?;

    Ok(SimulationReport::new(
        simulator.policy().name(),
        loaded.config,
        outcome,
    ))
}
