//! Built-in scheduling policies.

use super::{DispatchContext, ReadyQueue, SchedulingPolicy};
use crate::models::Process;

/// First-Come-First-Served.
///
/// Dispatches the head of the ready queue. Since admission is in arrival
/// order, processes run in the order they arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn select(
        &self,
        ready: &ReadyQueue,
        _processes: &[Process],
        _context: &DispatchContext,
    ) -> Option<usize> {
        if ready.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn description(&self) -> &'static str {
        "First-Come First-Served (non-preemptive)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcfs_picks_head() {
        let p = vec![
            Process::positional(0, 2, 1),
            Process::positional(1, 0, 9),
        ];
        let mut q = ReadyQueue::new(&p);
        q.admit(5, &p);
        let ctx = DispatchContext::at_tick(5);
        let pos = Fcfs.select(&q, &p, &ctx).unwrap();
        // P2 arrived first
        assert_eq!(q.get(pos), Some(1));
    }

    #[test]
    fn test_fcfs_empty_queue() {
        let p = vec![Process::positional(0, 4, 1)];
        let q = ReadyQueue::new(&p);
        assert_eq!(Fcfs.select(&q, &p, &DispatchContext::at_tick(0)), None);
    }

    #[test]
    fn test_fcfs_metadata() {
        assert_eq!(Fcfs.name(), "FCFS");
        assert!(Fcfs.description().contains("First-Come"));
    }
}
