//! Timeline (Gantt) model.
//!
//! A timeline is the complete, tick-by-tick record of one simulation run.
//! Each entry says what the CPU did during that tick: executed a process,
//! spent the tick on context-switch overhead, or sat idle.
//!
//! The engine builds a timeline once; afterwards it is read-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered label of a context-switch tick.
pub const CONTEXT_SWITCH_LABEL: &str = "CS";
/// Rendered label of an idle tick.
pub const IDLE_LABEL: &str = "Idle";

/// What the CPU did during a single tick.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickLabel {
    /// The named process executed.
    Process(String),
    /// Context-switch overhead.
    ContextSwitch,
    /// Nothing was ready to run.
    Idle,
}

impl TickLabel {
    /// Creates a process label.
    pub fn process(name: impl Into<String>) -> Self {
        Self::Process(name.into())
    }

    /// The process name, if this tick executed a process.
    pub fn process_name(&self) -> Option<&str> {
        match self {
            Self::Process(name) => Some(name),
            _ => None,
        }
    }

    /// Whether this tick executed the named process.
    #[inline]
    pub fn is_process(&self, name: &str) -> bool {
        matches!(self, Self::Process(n) if n == name)
    }
}

impl fmt::Display for TickLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process(name) => f.write_str(name),
            Self::ContextSwitch => f.write_str(CONTEXT_SWITCH_LABEL),
            Self::Idle => f.write_str(IDLE_LABEL),
        }
    }
}

/// A maximal run of identical consecutive ticks: `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Label shared by every tick in the run.
    pub label: TickLabel,
    /// First tick of the run.
    pub start: u64,
    /// One past the last tick of the run.
    pub end: u64,
}

impl Segment {
    /// Number of ticks in the run.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the run is empty (never true for segments from a timeline).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Ordered per-tick record of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    ticks: Vec<TickLabel>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, label: TickLabel) {
        self.ticks.push(label);
    }

    /// Number of ticks (the makespan of the run).
    #[inline]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Whether no tick was simulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// All tick labels in order.
    pub fn ticks(&self) -> &[TickLabel] {
        &self.ticks
    }

    /// Label at a tick.
    pub fn get(&self, tick: usize) -> Option<&TickLabel> {
        self.ticks.get(tick)
    }

    /// Iterates over tick labels in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TickLabel> {
        self.ticks.iter()
    }

    /// First tick at which `name` executed.
    pub fn first_tick_of(&self, name: &str) -> Option<u64> {
        self.ticks
            .iter()
            .position(|t| t.is_process(name))
            .map(|i| i as u64)
    }

    /// One past the last tick at which `name` executed.
    pub fn end_tick_of(&self, name: &str) -> Option<u64> {
        self.ticks
            .iter()
            .rposition(|t| t.is_process(name))
            .map(|i| i as u64 + 1)
    }

    /// Number of ticks `name` executed.
    pub fn count_of(&self, name: &str) -> usize {
        self.ticks.iter().filter(|t| t.is_process(name)).count()
    }

    /// Ticks spent executing any process.
    pub fn busy_ticks(&self) -> usize {
        self.ticks
            .iter()
            .filter(|t| matches!(t, TickLabel::Process(_)))
            .count()
    }

    /// Ticks spent idle.
    pub fn idle_ticks(&self) -> usize {
        self.ticks
            .iter()
            .filter(|t| matches!(t, TickLabel::Idle))
            .count()
    }

    /// Ticks spent on context-switch overhead.
    pub fn switch_ticks(&self) -> usize {
        self.ticks
            .iter()
            .filter(|t| matches!(t, TickLabel::ContextSwitch))
            .count()
    }

    /// Collapses consecutive identical ticks into segments.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for (tick, label) in self.ticks.iter().enumerate() {
            let tick = tick as u64;
            match segments.last_mut() {
                Some(last) if &last.label == label => last.end = tick + 1,
                _ => segments.push(Segment {
                    label: label.clone(),
                    start: tick,
                    end: tick + 1,
                }),
            }
        }
        segments
    }
}

impl From<Vec<TickLabel>> for Timeline {
    fn from(ticks: Vec<TickLabel>) -> Self {
        Self { ticks }
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TickLabel;
    type IntoIter = std::slice::Iter<'a, TickLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.ticks.iter()
    }
}
