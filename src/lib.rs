//! Tick-level CPU scheduling simulator.
//!
//! Simulates a fixed batch of processes on a single CPU and produces a
//! per-tick Gantt timeline plus per-process metrics (finish, waiting,
//! turnaround and response time). The simulation is pure: the same
//! workload always yields the same timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `TickLabel`, `Timeline`, `Segment`
//! - **`dispatching`**: `ReadyQueue` admission and the `SchedulingPolicy` seam (`Fcfs`)
//! - **`scheduler`**: `Simulator` loop, `SimulationConfig`, metrics derivation
//! - **`validation`**: Input integrity checks (counts, bursts, quantum, names)
//! - **`workload`**: Text/JSON loaders and a seeded random generator
//! - **`report`**: Gantt chart and metrics rendering
//!
//! # Example
//!
//! ```
//! use u_cpusched::report::SimulationReport;
//! use u_cpusched::workload;
//!
//! let input = "Number of processes: 2
//! Arrival times: 0 1
//! CPU bursts: 4 3
//! Context switch time (milliseconds): 1
//! Time quantum for Round Robin: 2";
//!
//! let mut loaded = workload::parse_text(input).unwrap();
//! let simulator = loaded.simulator();
//! let outcome = simulator.simulate(&mut loaded.processes).unwrap();
//! assert_eq!(outcome.metrics[1].waiting_time, 4);
//!
//! let report = SimulationReport::new("FCFS", loaded.config, outcome);
//! assert!(report.to_string().starts_with("Gantt Chart:"));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;
