//! Ready queue with arrival-ordered admission.

use std::collections::VecDeque;

use tracing::debug;

use crate::models::Process;

/// FIFO ready queue plus the admission cursor that feeds it.
///
/// Processes are admitted in arrival order; equal arrival times are
/// admitted in original listing order (`Process::index`). Processes with a
/// zero burst are never admitted. Queue entries are indices into the
/// process slice the queue was built from.
#[derive(Debug, Clone)]
pub struct ReadyQueue {
    /// Process indices sorted by (arrival_time, index).
    arrival_order: Vec<usize>,
    /// Next position in `arrival_order` to admit.
    cursor: usize,
    queue: VecDeque<usize>,
}

impl ReadyQueue {
    /// Builds an empty queue whose admission order follows `processes`.
    pub fn new(processes: &[Process]) -> Self {
        let mut arrival_order: Vec<usize> = (0..processes.len())
            .filter(|&i| processes[i].burst_time > 0)
            .collect();
        // Stable: equal keys keep slice order.
        arrival_order.sort_by_key(|&i| (processes[i].arrival_time, processes[i].index));
        Self {
            arrival_order,
            cursor: 0,
            queue: VecDeque::with_capacity(processes.len()),
        }
    }

    /// Admits every not-yet-admitted process with `arrival_time <= tick`.
    ///
    /// Returns the number of processes admitted.
    pub fn admit(&mut self, tick: u64, processes: &[Process]) -> usize {
        let before = self.cursor;
        while let Some(&idx) = self.arrival_order.get(self.cursor) {
            if processes[idx].arrival_time > tick {
                break;
            }
            debug!(tick, process = %processes[idx].name, "admitted");
            self.queue.push_back(idx);
            self.cursor += 1;
        }
        self.cursor - before
    }

    /// Whether every process has been admitted.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.arrival_order.len()
    }

    /// Number of processes not yet admitted.
    #[inline]
    pub fn pending(&self) -> usize {
        self.arrival_order.len() - self.cursor
    }

    /// Whether the queue currently holds no process.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued processes.
    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Process index at the head of the queue.
    pub fn front(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    /// Process index at a queue position.
    pub fn get(&self, position: usize) -> Option<usize> {
        self.queue.get(position).copied()
    }

    /// Removes and returns the process index at a queue position.
    pub fn remove(&mut self, position: usize) -> Option<usize> {
        self.queue.remove(position)
    }

    /// Queued process indices, head first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }
}
