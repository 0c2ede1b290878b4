//! Per-step execution record and the observer boundary.
//!
//! The engine appends one event per scheduling step to a trace the caller can
//! inspect after the run, and mirrors each event to a [`TraceHooks`]
//! implementation as it happens. Rendering (progress narration, plotting,
//! logging) lives entirely on the observer side; the core never formats
//! anything.

use crate::clock::SimTime;
use crate::task::{TaskId, TaskSet};

/// One step of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// Nothing was ready; the clock jumped to the next arrival.
    Idle { from: SimTime, until: SimTime },
    /// A task executed for `ran` starting at `at`, leaving `remaining` work.
    Slice {
        id: TaskId,
        at: SimTime,
        ran: SimTime,
        remaining: SimTime,
    },
    /// An expired task left the processor; the switch consumed `cost` of
    /// clock time.
    ContextSwitch { id: TaskId, cost: SimTime },
    /// `by` displaced `running` without consuming clock time.
    Preempted { running: TaskId, by: TaskId },
    /// A task's remaining work reached zero.
    Finished {
        id: TaskId,
        at: SimTime,
        missed_deadline: bool,
    },
}

/// Observer hooks invoked once per trace event, in order.
///
/// The task set is passed alongside so an observer can resolve names and
/// static attributes without holding its own copy. Implementations should be
/// cheap; they run inline with the simulation.
pub trait TraceHooks {
    fn on_event(&mut self, _event: &TraceEvent, _tasks: &TaskSet) {}
}

/// Default observer: does nothing.
#[derive(Debug, Default)]
pub struct NoopTrace;

impl TraceHooks for NoopTrace {}
