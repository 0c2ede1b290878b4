use crate::policy::Policy;
use crate::task::{TaskId, TaskSet};
use std::collections::VecDeque;

/// First-come-first-served: earliest arrival runs first and runs to
/// completion. No overhead is ever charged; a dispatch here is not a context
/// switch.
///
/// The engine admits tasks in `(arrival, id)` order, so a plain FIFO queue
/// already yields arrival order with insertion-order ties.
#[derive(Debug, Default)]
pub struct Fifo {
    ready: VecDeque<TaskId>,
}

impl Fifo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for Fifo {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn push(&mut self, id: TaskId, _tasks: &TaskSet) {
        self.ready.push_back(id);
    }

    fn pop(&mut self, _tasks: &TaskSet) -> Option<TaskId> {
        self.ready.pop_front()
    }

    fn is_runnable(&self) -> bool {
        !self.ready.is_empty()
    }
}
