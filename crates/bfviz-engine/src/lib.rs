//! Bellman-Ford Step Engine
//!
//! Runs single-source Bellman-Ford once and records every observable
//! transition as a reversible [`Step`].
//!
//! # Step Log
//!
//! A step bundles four kinds of change, each carrying the value it writes and
//! the value it replaces:
//! - node highlight (normal, updated, source)
//! - edge highlight (normal, visiting, updated, rejected)
//! - distance-matrix cell, addressed by round and vertex
//! - parent-map cell
//!
//! Replaying `steps[0..=k]` forward from the pristine state reproduces the
//! state after step `k`; undoing them backward from `k` restores it.
//!
//! # Step Count
//!
//! For `V` vertices and `E` edges the log holds `1 + (V - 1) * (1 + 3E)`
//! steps: initialization, then per round a carry-over and three steps per
//! edge (visit, accept or reject, revert).

mod step;
mod log;
mod recorder;

pub use step::{DistanceChange, EdgeChange, EdgeStatus, NodeChange, NodeStatus, ParentChange, Step, StepKind};
pub use log::{Cursor, StepLog};
pub use recorder::{run, BellmanFordRun};

/// Steps a run over `vertices` and `edges` produces.
pub const fn expected_step_count(vertices: usize, edges: usize) -> usize {
    if vertices == 0 {
        return 1;
    }
    1 + (vertices - 1) * (1 + 3 * edges)
}
