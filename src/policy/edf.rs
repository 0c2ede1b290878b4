use crate::clock::SimTime;
use crate::policy::{ConfigError, Decision, Policy, DEFAULT_OVERHEAD};
use crate::task::{Task, TaskId, TaskSet};
use std::collections::BTreeSet;

/// Earliest-deadline-first with preemption at quantum granularity.
///
/// The processor always runs the ready task with the globally earliest
/// deadline: after every slice, a ready task whose deadline is strictly
/// earlier than the runner's displaces it. Tasks without a deadline order
/// last and can never preempt anything; ties fall back to earliest arrival,
/// then insertion order.
///
/// There is no admission control or feasibility test. A task that cannot
/// make its deadline still runs to completion and is reported as missed.
/// Each completion charges one switch cost to the overhead accumulator.
pub struct Edf {
    quantum: SimTime,
    overhead: SimTime,
    ready: BTreeSet<(SimTime, SimTime, TaskId)>,
}

/// Unbounded deadlines sort after every real one.
fn deadline_key(task: &Task) -> SimTime {
    task.deadline().unwrap_or(SimTime::MAX)
}

impl Edf {
    pub fn new(quantum: SimTime) -> Result<Self, ConfigError> {
        if quantum.is_zero() {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(Self {
            quantum,
            overhead: DEFAULT_OVERHEAD,
            ready: BTreeSet::new(),
        })
    }

    /// Override the per-completion cost (default [`DEFAULT_OVERHEAD`]).
    pub fn with_overhead(mut self, overhead: SimTime) -> Self {
        self.overhead = overhead;
        self
    }
}

impl Policy for Edf {
    fn name(&self) -> &'static str {
        "edf"
    }

    fn push(&mut self, id: TaskId, tasks: &TaskSet) {
        let task = tasks.get(id);
        self.ready.insert((deadline_key(task), task.arrival(), id));
    }

    fn pop(&mut self, _tasks: &TaskSet) -> Option<TaskId> {
        self.ready.pop_first().map(|(_, _, id)| id)
    }

    fn is_runnable(&self) -> bool {
        !self.ready.is_empty()
    }

    fn quantum(&self) -> Option<SimTime> {
        Some(self.quantum)
    }

    fn exit_overhead(&self) -> SimTime {
        self.overhead
    }

    fn decide(&mut self, running: TaskId, tasks: &TaskSet) -> Decision {
        let Some(&(deadline, _, id)) = self.ready.first() else {
            return Decision::Continue;
        };
        // strictly earlier: an equal deadline never displaces the runner
        if deadline < deadline_key(tasks.get(running)) {
            self.ready.pop_first();
            Decision::SwitchTo { next: id }
        } else {
            Decision::Continue
        }
    }
}
