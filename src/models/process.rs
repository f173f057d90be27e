//! Process (PCB) model.
//!
//! A process is the unit of work the simulator schedules on its single CPU.
//! It carries immutable workload data (arrival, burst) plus the fields the
//! simulation mutates (`remaining_time`) or derives (`start_time`,
//! `finish_time`).
//!
//! # Time Representation
//! All times are in ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// A process control block.
///
/// # Field ownership
/// - `name`, `index`, `arrival_time`, `burst_time` are fixed at load time.
/// - `remaining_time` is the only field the scheduling loop mutates.
/// - `start_time` / `finish_time` are written once, by metrics derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process name (e.g., "P1").
    pub name: String,
    /// Original listing position (0-indexed). Breaks arrival ties.
    pub index: usize,
    /// Tick at which the process becomes eligible to run.
    pub arrival_time: u64,
    /// Total CPU ticks required (original burst).
    pub burst_time: u64,
    /// CPU ticks still required. `0 <= remaining_time <= burst_time`.
    pub remaining_time: u64,
    /// First tick the process appears in the timeline.
    pub start_time: Option<u64>,
    /// One past the last tick the process appears in the timeline.
    pub finish_time: Option<u64>,
}

impl Process {
    /// Creates a process with a full remaining burst and no derived times.
    pub fn new(name: impl Into<String>, index: usize, arrival_time: u64, burst_time: u64) -> Self {
        Self {
            name: name.into(),
            index,
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            start_time: None,
            finish_time: None,
        }
    }

    /// Creates a process with the positional name `P{index + 1}`.
    pub fn positional(index: usize, arrival_time: u64, burst_time: u64) -> Self {
        Self::new(format!("P{}", index + 1), index, arrival_time, burst_time)
    }

    /// Whether the process has received all of its CPU ticks.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// CPU ticks already executed.
    #[inline]
    pub fn executed_ticks(&self) -> u64 {
        self.burst_time - self.remaining_time
    }

    /// Restores the simulation-mutable and derived fields to their load-time state.
    pub fn reset(&mut self) {
        self.remaining_time = self.burst_time;
        self.start_time = None;
        self.finish_time = None;
    }

    /// Consumes one tick of CPU time. Returns `true` if the burst is now complete.
    pub(crate) fn execute_tick(&mut self) -> bool {
        debug_assert!(self.remaining_time > 0, "{} executed past its burst", self.name);
        self.remaining_time = self.remaining_time.saturating_sub(1);
        self.remaining_time == 0
    }
}
