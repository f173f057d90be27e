//! Timeline → per-process metrics.
//!
//! Derivation is a pure function of the timeline and the process list. It
//! recovers each process's first and last execution tick and computes the
//! classic CPU scheduling measures.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Start | First tick the process executed |
//! | Finish | Last tick the process executed + 1 |
//! | Turnaround | finish − arrival |
//! | Waiting | finish − burst − arrival |
//! | Response | start − arrival |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Process, Timeline};

/// Derived measures for one process. All times are in ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process name.
    pub name: String,
    /// Original listing position.
    pub index: usize,
    /// Arrival tick.
    pub arrival_time: u64,
    /// Original burst.
    pub burst_time: u64,
    /// First execution tick.
    pub start_time: u64,
    /// One past the last execution tick.
    pub finish_time: u64,
    /// Ticks spent ready but not running.
    pub waiting_time: u64,
    /// Ticks from arrival to completion.
    pub turnaround_time: u64,
    /// Ticks from arrival to first execution.
    pub response_time: u64,
}

/// A timeline inconsistent with the process list it was built from.
///
/// Any of these indicates an engine defect, not a valid scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// The process never executed.
    MissingFromTimeline { process: String },
    /// Executed tick count differs from the original burst.
    BurstMismatch {
        process: String,
        expected: u64,
        observed: u64,
    },
    /// `finish − burst − arrival` would be negative.
    NegativeWaiting {
        process: String,
        finish_time: u64,
        burst_time: u64,
        arrival_time: u64,
    },
    /// The process executed before it arrived.
    NegativeResponse {
        process: String,
        start_time: u64,
        arrival_time: u64,
    },
}

impl fmt::Display for DerivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFromTimeline { process } => {
                write!(f, "process {process} never appears in the timeline")
            }
            Self::BurstMismatch {
                process,
                expected,
                observed,
            } => write!(
                f,
                "process {process} executed {observed} ticks, expected {expected}"
            ),
            Self::NegativeWaiting {
                process,
                finish_time,
                burst_time,
                arrival_time,
            } => write!(
                f,
                "negative waiting time for {process}: \
                 finish {finish_time} - burst {burst_time} - arrival {arrival_time}"
            ),
            Self::NegativeResponse {
                process,
                start_time,
                arrival_time,
            } => write!(
                f,
                "process {process} started at {start_time} before arriving at {arrival_time}"
            ),
        }
    }
}

impl std::error::Error for DerivationError {}

/// Derives start/finish times and metrics for every process.
///
/// Writes `start_time` and `finish_time` into each process and returns the
/// metrics sorted by original listing order.
///
/// # Errors
/// Returns the first inconsistency found; processes already visited keep
/// their derived fields.
pub fn derive_metrics(
    processes: &mut [Process],
    timeline: &Timeline,
) -> Result<Vec<ProcessMetrics>, DerivationError> {
    let mut metrics = Vec::with_capacity(processes.len());

    for process in processes.iter_mut() {
        let missing = || DerivationError::MissingFromTimeline {
            process: process.name.clone(),
        };
        let start = timeline.first_tick_of(&process.name).ok_or_else(missing)?;
        let finish = timeline.end_tick_of(&process.name).ok_or_else(missing)?;

        let observed = timeline.count_of(&process.name) as u64;
        if observed != process.burst_time {
            return Err(DerivationError::BurstMismatch {
                process: process.name.clone(),
                expected: process.burst_time,
                observed,
            });
        }

        let turnaround = finish.checked_sub(process.arrival_time);
        let waiting = turnaround.and_then(|t| t.checked_sub(process.burst_time));
        let (Some(turnaround), Some(waiting)) = (turnaround, waiting) else {
            return Err(DerivationError::NegativeWaiting {
                process: process.name.clone(),
                finish_time: finish,
                burst_time: process.burst_time,
                arrival_time: process.arrival_time,
            });
        };
        let response = start.checked_sub(process.arrival_time).ok_or_else(|| {
            DerivationError::NegativeResponse {
                process: process.name.clone(),
                start_time: start,
                arrival_time: process.arrival_time,
            }
        })?;

        process.start_time = Some(start);
        process.finish_time = Some(finish);

        metrics.push(ProcessMetrics {
            name: process.name.clone(),
            index: process.index,
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            start_time: start,
            finish_time: finish,
            waiting_time: waiting,
            turnaround_time: turnaround,
            response_time: response,
        });
    }

    metrics.sort_by_key(|m| m.index);
    Ok(metrics)
}

/// Aggregate indicators for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Timeline length (ticks).
    pub makespan: u64,
    /// Ticks spent executing processes.
    pub busy_ticks: u64,
    /// Ticks spent idle.
    pub idle_ticks: u64,
    /// Ticks spent on context switches.
    pub context_switch_ticks: u64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// busy_ticks / makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl SimulationSummary {
    /// Computes the summary from derived metrics and the timeline.
    pub fn calculate(metrics: &[ProcessMetrics], timeline: &Timeline) -> Self {
        let makespan = timeline.len() as u64;
        let busy_ticks = timeline.busy_ticks() as u64;

        let mean = |f: fn(&ProcessMetrics) -> u64| -> f64 {
            if metrics.is_empty() {
                0.0
            } else {
                metrics.iter().map(f).sum::<u64>() as f64 / metrics.len() as f64
            }
        };

        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                busy_ticks as f64 / makespan as f64,
                metrics.len() as f64 / makespan as f64,
            )
        };

        Self {
            makespan,
            busy_ticks,
            idle_ticks: timeline.idle_ticks() as u64,
            context_switch_ticks: timeline.switch_ticks() as u64,
            avg_waiting_time: mean(|m| m.waiting_time),
            avg_turnaround_time: mean(|m| m.turnaround_time),
            avg_response_time: mean(|m| m.response_time),
            cpu_utilization,
            throughput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TickLabel;

    fn p(name: &str) -> TickLabel {
        TickLabel::process(name)
    }

    #[test]
    fn test_derive_two_processes() {
        let mut procs = vec![Process::positional(0, 0, 4), Process::positional(1, 1, 3)];
        let timeline = Timeline::from(vec![
            p("P1"),
            p("P1"),
            p("P1"),
            p("P1"),
            TickLabel::ContextSwitch,
            p("P2"),
            p("P2"),
            p("P2"),
        ]);

        let m = derive_metrics(&mut procs, &timeline).unwrap();
        assert_eq!(m[0].finish_time, 4);
        assert_eq!(m[0].waiting_time, 0);
        assert_eq!(m[0].turnaround_time, 4);
        assert_eq!(m[1].start_time, 5);
        assert_eq!(m[1].finish_time, 8);
        assert_eq!(m[1].waiting_time, 4);
        assert_eq!(m[1].turnaround_time, 7);
        assert_eq!(m[1].response_time, 4);
        assert_eq!(procs[1].finish_time, Some(8));
    }

    #[test]
    fn test_metrics_sorted_by_listing_order() {
        let mut procs = vec![Process::positional(1, 0, 1), Process::positional(0, 1, 1)];
        let timeline = Timeline::from(vec![p("P2"), p("P1")]);
        let m = derive_metrics(&mut procs, &timeline).unwrap();
        assert_eq!(m[0].name, "P1");
        assert_eq!(m[1].name, "P2");
    }

    #[test]
    fn test_missing_process() {
        let mut procs = vec![Process::positional(0, 0, 1)];
        let err = derive_metrics(&mut procs, &Timeline::from(vec![TickLabel::Idle])).unwrap_err();
        assert_eq!(
            err,
            DerivationError::MissingFromTimeline {
                process: "P1".into()
            }
        );
    }

    #[test]
    fn test_burst_mismatch() {
        let mut procs = vec![Process::positional(0, 0, 3)];
        let err = derive_metrics(&mut procs, &Timeline::from(vec![p("P1"), p("P1")])).unwrap_err();
        assert!(matches!(err, DerivationError::BurstMismatch { observed: 2, .. }));
    }

    #[test]
    fn test_negative_waiting_detected() {
        // Ran before it arrived: finish 2 - burst 2 - arrival 5 < 0
        let mut procs = vec![Process::positional(0, 5, 2)];
        let err = derive_metrics(&mut procs, &Timeline::from(vec![p("P1"), p("P1")])).unwrap_err();
        assert!(matches!(err, DerivationError::NegativeWaiting { .. }));
        assert!(err.to_string().contains("negative waiting"));
    }

    #[test]
    fn test_negative_response_detected() {
        // Split execution: first tick before arrival, finish late enough for waiting >= 0.
        let mut procs = vec![Process::positional(0, 2, 2)];
        let timeline = Timeline::from(vec![
            p("P1"),
            TickLabel::Idle,
            TickLabel::Idle,
            TickLabel::Idle,
            p("P1"),
        ]);
        let err = derive_metrics(&mut procs, &timeline).unwrap_err();
        assert!(matches!(err, DerivationError::NegativeResponse { .. }));
    }

    #[test]
    fn test_summary() {
        let mut procs = vec![Process::positional(0, 0, 4), Process::positional(1, 1, 3)];
        let timeline = Timeline::from(vec![
            p("P1"),
            p("P1"),
            p("P1"),
            p("P1"),
            TickLabel::ContextSwitch,
            p("P2"),
            p("P2"),
            p("P2"),
        ]);
        let m = derive_metrics(&mut procs, &timeline).unwrap();
        let s = SimulationSummary::calculate(&m, &timeline);

        assert_eq!(s.makespan, 8);
        assert_eq!(s.busy_ticks, 7);
        assert_eq!(s.context_switch_ticks, 1);
        assert_eq!(s.idle_ticks, 0);
        assert!((s.avg_waiting_time - 2.0).abs() < 1e-10); // (0 + 4) / 2
        assert!((s.avg_turnaround_time - 5.5).abs() < 1e-10); // (4 + 7) / 2
        assert!((s.cpu_utilization - 0.875).abs() < 1e-10);
        assert!((s.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_summary_empty() {
        let s = SimulationSummary::calculate(&[], &Timeline::new());
        assert_eq!(s.makespan, 0);
        assert!((s.avg_waiting_time - 0.0).abs() < 1e-10);
        assert!((s.cpu_utilization - 0.0).abs() < 1e-10);
    }
}
