//! Tick-level scheduling loop.
//!
//! # Algorithm
//!
//! Each iteration handles one tick `t`:
//! 1. Admit every process with `arrival_time <= t` into the ready queue.
//! 2. If the CPU is free, ask the policy for the next queued process.
//! 3. If nothing can run: stop when admission is exhausted, otherwise
//!    record an idle tick.
//! 4. Otherwise execute the running process for one tick. On completion,
//!    insert `context_switch_time` switch ticks unless it was the last
//!    process to finish.
//!
//! # Complexity
//! O(T + n log n) where T = makespan, n = processes.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use super::metrics::{derive_metrics, DerivationError, ProcessMetrics, SimulationSummary};
use super::SimulationConfig;
use crate::dispatching::{policies, DispatchContext, ReadyQueue, SchedulingPolicy};
use crate::models::{Process, TickLabel, Timeline};
use crate::validation::{validate_processes, ValidationError};

/// Result of a full simulation: timeline plus derived metrics.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Per-tick execution record.
    pub timeline: Timeline,
    /// Per-process metrics, in original listing order.
    pub metrics: Vec<ProcessMetrics>,
    /// Aggregate indicators.
    pub summary: SimulationSummary,
}

/// Failure of [`Simulator::simulate`].
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The processes or configuration failed validation; no tick was run.
    Invalid(Vec<ValidationError>),
    /// The timeline is inconsistent with the process list.
    Derivation(DerivationError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "invalid simulation input: {}", messages.join("; "))
            }
            Self::Derivation(e) => write!(f, "inconsistent timeline: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Derivation(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

impl From<DerivationError> for SimulationError {
    fn from(e: DerivationError) -> Self {
        Self::Derivation(e)
    }
}

/// Single-CPU scheduling simulator.
///
/// Holds only immutable configuration; every call to [`run`](Self::run)
/// is an independent simulation.
///
/// # Example
///
/// ```
/// use u_cpusched::models::{Process, TickLabel};
/// use u_cpusched::scheduler::{SimulationConfig, Simulator};
///
/// let mut processes = vec![Process::positional(0, 0, 2), Process::positional(1, 1, 1)];
/// let config = SimulationConfig::default().with_context_switch(1);
/// let timeline = Simulator::new(config).run(&mut processes);
///
/// assert_eq!(
///     timeline.ticks(),
///     &[
///         TickLabel::process("P1"),
///         TickLabel::process("P1"),
///         TickLabel::ContextSwitch,
///         TickLabel::process("P2"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    policy: Arc<dyn SchedulingPolicy>,
}

impl Simulator {
    /// Creates an FCFS simulator.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_policy(config, policies::Fcfs)
    }

    /// Creates a simulator with a custom dispatch policy.
    pub fn with_policy<P: SchedulingPolicy + 'static>(config: SimulationConfig, policy: P) -> Self {
        Self {
            config,
            policy: Arc::new(policy),
        }
    }

    /// The configuration this simulator runs with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The dispatch policy.
    pub fn policy(&self) -> &dyn SchedulingPolicy {
        self.policy.as_ref()
    }

    /// Runs the scheduling loop and returns the timeline.
    ///
    /// Only `remaining_time` of each process is touched: it is reset to
    /// `burst_time` on entry and ends at zero for every process.
    ///
    /// Input is not validated here. Processes with a zero burst are never
    /// admitted and do not appear in the timeline; use
    /// [`simulate`](Self::simulate) for checked input.
    #[instrument(skip_all, fields(policy = self.policy.name(), processes = processes.len()))]
    pub fn run(&self, processes: &mut [Process]) -> Timeline {
        for p in processes.iter_mut() {
            p.remaining_time = p.burst_time;
        }

        let mut timeline = Timeline::new();
        let mut ready = ReadyQueue::new(processes);
        let mut running: Option<usize> = None;
        let mut previous: Option<usize> = None;
        let mut completed = 0usize;
        let mut tick: u64 = 0;

        loop {
            ready.admit(tick, processes);

            if running.is_none() && !ready.is_empty() {
                let mut context = DispatchContext::at_tick(tick).with_completed(completed);
                if let Some(prev) = previous {
                    context = context.with_previous(prev);
                }
                let position = self
                    .policy
                    .select(&ready, processes, &context)
                    .filter(|&pos| pos < ready.len())
                    .unwrap_or(0);
                running = ready.remove(position);
                if let Some(idx) = running {
                    debug!(tick, process = %processes[idx].name, "dispatched");
                }
            }

            let Some(idx) = running else {
                if ready.is_exhausted() {
                    break;
                }
                trace!(tick, "idle");
                timeline.push(TickLabel::Idle);
                tick += 1;
                continue;
            };

            let process = &mut processes[idx];
            let done = process.execute_tick();
            trace!(tick, process = %process.name, remaining = process.remaining_time, "executed");
            timeline.push(TickLabel::Process(process.name.clone()));
            tick += 1;

            if done {
                debug!(tick, process = %process.name, "completed");
                running = None;
                previous = Some(idx);
                completed += 1;

                if ready.is_exhausted() && ready.is_empty() {
                    break;
                }
                for _ in 0..self.config.context_switch_time {
                    timeline.push(TickLabel::ContextSwitch);
                    tick += 1;
                }
            }
        }

        debug!(makespan = timeline.len(), completed, "simulation finished");
        timeline
    }

    /// Validates the input, runs the loop and derives per-process metrics
    /// from the timeline.
    ///
    /// `start_time` and `finish_time` of each process are filled in.
    ///
    /// # Errors
    /// - [`SimulationError::Invalid`] if a burst is zero, the quantum is
    ///   zero or names repeat; the loop is not started.
    /// - [`SimulationError::Derivation`] if the timeline is inconsistent
    ///   (an engine defect); no metrics are returned in that case.
    pub fn simulate(
        &self,
        processes: &mut [Process],
    ) -> Result<SimulationOutcome, SimulationError> {
        validate_processes(processes, &self.config)?;

        let timeline = self.run(processes);
        let metrics = derive_metrics(processes, &timeline)?;
        let summary = SimulationSummary::calculate(&metrics, &timeline);
        Ok(SimulationOutcome {
            timeline,
            metrics,
            summary,
        })
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
