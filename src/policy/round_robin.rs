use crate::clock::SimTime;
use crate::policy::{ConfigError, Decision, Policy, DEFAULT_OVERHEAD};
use crate::task::{TaskId, TaskSet};
use std::collections::VecDeque;

/// Time-sliced round-robin: each dispatch runs at most one quantum, then the
/// task pays a context switch (charged to the accumulator and consumed on the
/// clock) and rejoins the ready queue.
///
/// The queue is not a pure cycle: after every insertion it is re-sorted
/// stably by arrival time, so a preempted task is merged among newly-arrived
/// ones by arrival rather than appended. Tasks with equal arrivals still
/// rotate in strict cyclic order (stable sort keeps the rotation), but an
/// early arrival re-enters ahead of later arrivals that are already waiting.
pub struct RoundRobin {
    quantum: SimTime,
    overhead: SimTime,
    ready: VecDeque<TaskId>,
}

impl RoundRobin {
    pub fn new(quantum: SimTime) -> Result<Self, ConfigError> {
        if quantum.is_zero() {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(Self {
            quantum,
            overhead: DEFAULT_OVERHEAD,
            ready: VecDeque::new(),
        })
    }

    /// Override the per-switch cost (default [`DEFAULT_OVERHEAD`]).
    pub fn with_overhead(mut self, overhead: SimTime) -> Self {
        self.overhead = overhead;
        self
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn push(&mut self, id: TaskId, tasks: &TaskSet) {
        self.ready.push_back(id);
        // keep the queue merged by arrival; the stable sort preserves
        // rotation order among equal arrivals
        self.ready
            .make_contiguous()
            .sort_by_key(|&i| tasks.get(i).arrival());
    }

    fn pop(&mut self, _tasks: &TaskSet) -> Option<TaskId> {
        self.ready.pop_front()
    }

    fn is_runnable(&self) -> bool {
        !self.ready.is_empty()
    }

    fn quantum(&self) -> Option<SimTime> {
        Some(self.quantum)
    }

    fn decide(&mut self, _running: TaskId, _tasks: &TaskSet) -> Decision {
        Decision::Requeue {
            overhead: self.overhead,
        }
    }
}
