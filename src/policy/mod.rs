mod edf;
mod fifo;
mod priority;
mod round_robin;

pub use edf::Edf;
pub use fifo::Fifo;
pub use priority::Priority;
pub use round_robin::RoundRobin;

use crate::clock::SimTime;
use crate::task::{TaskId, TaskSet};
use std::time::Duration;
use thiserror::Error;

/// Cost of one context switch unless a policy is configured otherwise.
pub const DEFAULT_OVERHEAD: SimTime = Duration::from_millis(100);

/// Rejected policy configuration. Construction either fully succeeds or
/// leaves nothing behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("quantum must be greater than zero")]
    ZeroQuantum,
}

/// What the processor does with a task whose slice expired with work left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The task keeps the processor for another slice.
    Continue,
    /// The task returns to the ready queue; the switch costs `overhead` of
    /// clock time on top of the accumulator charge.
    Requeue { overhead: SimTime },
    /// `next` takes the processor; the displaced task returns to the ready
    /// queue.
    SwitchTo { next: TaskId },
}

/// Scheduling policy: owns the ready set and decides which task runs next.
///
/// The engine drives the shared admission/clock skeleton and calls into the
/// policy at three points: when a task becomes ready (`push`), when the
/// processor is free (`pop`), and after every slice that leaves the running
/// task unfinished (`decide`). Policies never touch the clock or the task
/// run-state; they only read static attributes through the [`TaskSet`].
pub trait Policy {
    /// Label used by traces, metrics and comparison output.
    fn name(&self) -> &'static str;

    /// A task became ready: it arrived, or was put back after losing the
    /// processor.
    fn push(&mut self, id: TaskId, tasks: &TaskSet);

    /// Remove and return the next task to dispatch.
    fn pop(&mut self, tasks: &TaskSet) -> Option<TaskId>;

    fn is_runnable(&self) -> bool;

    /// Execution budget per dispatch. `None` runs the task to completion in
    /// a single slice.
    fn quantum(&self) -> Option<SimTime> {
        None
    }

    /// Accumulator-only cost charged each time a task is granted the
    /// processor.
    fn dispatch_overhead(&self) -> SimTime {
        SimTime::ZERO
    }

    /// Accumulator-only cost charged when a task finishes.
    fn exit_overhead(&self) -> SimTime {
        SimTime::ZERO
    }

    /// Called after a slice that left `running` unfinished, once tasks that
    /// arrived during the slice have been admitted.
    fn decide(&mut self, _running: TaskId, _tasks: &TaskSet) -> Decision {
        Decision::Continue
    }
}
