//! Scheduling engine and metrics derivation.
//!
//! # Algorithm
//!
//! `Simulator` advances a simulated clock one tick at a time, admits
//! arrived processes into a ready queue, executes the dispatched process,
//! and inserts context-switch overhead between processes. The result is a
//! [`Timeline`](crate::models::Timeline).
//!
//! # Metrics
//!
//! `derive_metrics` recovers start/finish ticks from the timeline and
//! computes waiting, turnaround and response times. `SimulationSummary`
//! aggregates them with CPU utilization and throughput.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod config;
mod engine;
mod metrics;

pub use config::SimulationConfig;
pub use engine::{SimulationError, SimulationOutcome, Simulator};
pub use metrics::{derive_metrics, DerivationError, ProcessMetrics, SimulationSummary};
