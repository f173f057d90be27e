//! Ready-queue admission and scheduling policies.
//!
//! The scheduling loop owns a [`ReadyQueue`] and asks a
//! [`SchedulingPolicy`] which queued process to dispatch whenever the CPU
//! becomes free. FCFS is the only shipped policy; the trait is the seam
//! where other non-preemptive disciplines plug in.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{policies, DispatchContext, ReadyQueue, SchedulingPolicy};
//! use u_cpusched::models::Process;
//!
//! let processes = vec![Process::positional(0, 0, 3), Process::positional(1, 0, 2)];
//! let mut queue = ReadyQueue::new(&processes);
//! queue.admit(0, &processes);
//!
//! let ctx = DispatchContext::at_tick(0);
//! assert_eq!(policies::Fcfs.select(&queue, &processes, &ctx), Some(0));
//! ```

mod context;
pub mod policies;
mod queue;

pub use context::DispatchContext;
pub use queue::ReadyQueue;

use crate::models::Process;
use std::fmt::Debug;

/// A policy that picks the next process to dispatch from the ready queue.
///
/// # Contract
/// `select` returns a *position* within `ready` (0 = head), or `None` when
/// the queue is empty. The engine removes that entry and runs the process
/// to completion.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "FCFS").
    fn name(&self) -> &'static str;

    /// Chooses the queue position to dispatch next.
    fn select(
        &self,
        ready: &ReadyQueue,
        processes: &[Process],
        context: &DispatchContext,
    ) -> Option<usize>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
