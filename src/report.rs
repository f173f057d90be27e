//! Text rendering of simulation results.
//!
//! Formatting only; no computation beyond what the metrics already hold.

use serde::Serialize;
use std::fmt;

use crate::models::Timeline;
use crate::scheduler::{ProcessMetrics, SimulationConfig, SimulationOutcome, SimulationSummary};

const SEPARATOR: &str = "*****************************************************";

/// Gantt chart view over a timeline.
///
/// Default rendering shows one cell per tick:
/// `| P1 | P1 | CS | P2 |`
#[derive(Debug, Clone, Copy)]
pub struct GanttChart<'a> {
    timeline: &'a Timeline,
    compact: bool,
}

impl<'a> GanttChart<'a> {
    /// Per-tick chart.
    pub fn new(timeline: &'a Timeline) -> Self {
        Self {
            timeline,
            compact: false,
        }
    }

    /// Run-length chart with tick ranges: `| P1 [0,4) | CS [4,5) |`.
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

impl fmt::Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        if self.compact {
            for seg in self.timeline.segments() {
                write!(f, " {} [{},{}) |", seg.label, seg.start, seg.end)?;
            }
        } else {
            for label in self.timeline {
                write!(f, " {label} |")?;
            }
        }
        Ok(())
    }
}

/// Complete, serializable report of one simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Policy name (e.g., "FCFS").
    pub policy: String,
    /// Timing parameters used.
    pub config: SimulationConfig,
    /// Per-tick record.
    pub timeline: Timeline,
    /// Per-process metrics, in listing order.
    pub metrics: Vec<ProcessMetrics>,
    /// Aggregate indicators.
    pub summary: SimulationSummary,
}

impl SimulationReport {
    /// Builds a report from a finished simulation.
    pub fn new(
        policy: impl Into<String>,
        config: SimulationConfig,
        outcome: SimulationOutcome,
    ) -> Self {
        Self {
            policy: policy.into(),
            config,
            timeline: outcome.timeline,
            metrics: outcome.metrics,
            summary: outcome.summary,
        }
    }

    /// Gantt chart of the run.
    pub fn gantt(&self) -> GanttChart<'_> {
        GanttChart::new(&self.timeline)
    }

    /// Report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn write_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        value: fn(&ProcessMetrics) -> u64,
    ) -> fmt::Result {
        writeln!(f, "{title} time for each process:")?;
        for m in &self.metrics {
            writeln!(f, "{}: {}", m.name, value(m))?;
        }
        Ok(())
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gantt Chart:")?;
        writeln!(f, "{}", self.gantt())?;
        writeln!(f)?;

        self.write_section(f, "Finish", |m| m.finish_time)?;
        writeln!(f)?;
        self.write_section(f, "Waiting", |m| m.waiting_time)?;
        writeln!(f)?;
        self.write_section(f, "Turnaround", |m| m.turnaround_time)?;
        writeln!(f)?;

        writeln!(f, "Average waiting time: {:.2}", self.summary.avg_waiting_time)?;
        writeln!(f, "Average turnaround time: {:.2}", self.summary.avg_turnaround_time)?;
        writeln!(f, "CPU utilization: {:.2}%", self.summary.cpu_utilization * 100.0)?;
        writeln!(f)?;
        writeln!(f, "{SEPARATOR}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, TickLabel};
    use crate::scheduler::Simulator;

    fn scenario_b() -> SimulationReport {
        let mut procs = vec![Process::positional(0, 0, 4), Process::positional(1, 1, 3)];
        let config = SimulationConfig::default().with_context_switch(1);
        let sim = Simulator::new(config);
        let outcome = sim.simulate(&mut procs).unwrap();
        SimulationReport::new(sim.policy().name(), config, outcome)
    }

    #[test]
    fn test_gantt_per_tick() {
        let t = Timeline::from(vec![
            TickLabel::Idle,
            TickLabel::process("P1"),
            TickLabel::ContextSwitch,
        ]);
        assert_eq!(GanttChart::new(&t).to_string(), "| Idle | P1 | CS |");
    }

    #[test]
    fn test_gantt_compact() {
        let t = Timeline::from(vec![
            TickLabel::process("P1"),
            TickLabel::process("P1"),
            TickLabel::ContextSwitch,
            TickLabel::process("P2"),
        ]);
        assert_eq!(
            GanttChart::new(&t).compact().to_string(),
            "| P1 [0,2) | CS [2,3) | P2 [3,4) |"
        );
    }

    #[test]
    fn test_gantt_empty() {
        assert_eq!(GanttChart::new(&Timeline::new()).to_string(), "|");
    }

    #[test]
    fn test_report_text() {
        let text = scenario_b().to_string();
        let expected = "Gantt Chart:
| P1 | P1 | P1 | P1 | CS | P2 | P2 | P2 |

Finish time for each process:
P1: 4
P2: 8

Waiting time for each process:
P1: 0
P2: 4

Turnaround time for each process:
P1: 4
P2: 7

Average waiting time: 2.00
Average turnaround time: 5.50
CPU utilization: 87.50%

*****************************************************
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report_json() {
        let report = scenario_b();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["policy"], "FCFS");
        assert_eq!(value["metrics"][1]["waiting_time"], 4);
        assert_eq!(value["summary"]["makespan"], 8);
    }
}
