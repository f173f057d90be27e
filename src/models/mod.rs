//! CPU scheduling domain models.
//!
//! Provides the data types exchanged between the loader, the engine,
//! metrics derivation and report rendering.
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Process control block (workload + simulation state) |
//! | `TickLabel` | What the CPU did during one tick |
//! | `Timeline` | Ordered per-tick record of a run |
//! | `Segment` | Run-length view of a timeline |

mod process;
mod timeline;

pub use process::Process;
pub use timeline::{Segment, TickLabel, Timeline, CONTEXT_SWITCH_LABEL, IDLE_LABEL};
