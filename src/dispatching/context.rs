//! Dispatch context for scheduling policy evaluation.

/// Runtime simulation state passed to scheduling policies.
///
/// All times are in ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, Default)]
pub struct DispatchContext {
    /// Current simulation tick.
    pub current_tick: u64,
    /// Index of the process that ran most recently, if any.
    pub previous: Option<usize>,
    /// Number of processes that have completed.
    pub completed: usize,
}

impl DispatchContext {
    /// Creates a context at the given tick.
    pub fn at_tick(current_tick: u64) -> Self {
        Self {
            current_tick,
            ..Default::default()
        }
    }

    /// Sets the previously running process.
    pub fn with_previous(mut self, index: usize) -> Self {
        self.previous = Some(index);
        self
    }

    /// Sets the completed process count.
    pub fn with_completed(mut self, completed: usize) -> Self {
        self.completed = completed;
        self
    }
}
