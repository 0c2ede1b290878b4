use crate::clock::SimTime;
use slab::Slab;
use static_assertions::assert_impl_all;

/// Identifies a task within one scheduler instance.
///
/// Ids are handed out in insertion order and double as the final tie-breaker
/// wherever a policy needs one.
pub type TaskId = usize;

/// Priority given to tasks that don't specify one. Lower value = higher
/// priority.
pub const DEFAULT_PRIORITY: i32 = 1;

/// A unit of work for the compute unit: static attributes fixed at
/// construction plus the run-state the scheduler fills in.
///
/// Tasks are plain values. Running the same logical batch under several
/// policies means cloning the tasks into each scheduler; run-state never
/// leaks from one run into another.
#[derive(Clone, Debug)]
pub struct Task {
    name: String,
    duration: SimTime,
    priority: i32,
    arrival: SimTime,
    deadline: Option<SimTime>,

    // run-state, owned by the engine
    pub(crate) remaining: SimTime,
    pub(crate) start: Option<SimTime>,
    pub(crate) finish: Option<SimTime>,
    pub(crate) wait: SimTime,
    pub(crate) response: Option<SimTime>,
    /// End of the most recent slice; the gap from here to the next dispatch
    /// is ready-but-idle time.
    pub(crate) last_slice_end: Option<SimTime>,
}

assert_impl_all!(Task: Send, Sync, Clone);

impl Task {
    /// A task that arrives at t=0 with the default priority and no deadline.
    ///
    /// Names are opaque and need not be unique. A zero duration is legal:
    /// the task finishes at the instant it is first dispatched.
    pub fn new(name: impl Into<String>, duration: SimTime) -> Self {
        Self {
            name: name.into(),
            duration,
            priority: DEFAULT_PRIORITY,
            arrival: SimTime::ZERO,
            deadline: None,
            remaining: duration,
            start: None,
            finish: None,
            wait: SimTime::ZERO,
            response: None,
            last_slice_end: None,
        }
    }

    /// Instant at which the task becomes eligible to run.
    pub fn with_arrival(mut self, arrival: SimTime) -> Self {
        self.arrival = arrival;
        self
    }

    /// Lower value = higher priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Absolute instant the task should finish by. Unset means unbounded.
    pub fn with_deadline(mut self, deadline: SimTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> SimTime {
        self.duration
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    pub fn deadline(&self) -> Option<SimTime> {
        self.deadline
    }

    /// Work still owed; zero once the task is finished.
    pub fn remaining(&self) -> SimTime {
        self.remaining
    }

    /// First instant the task received any execution.
    pub fn start(&self) -> Option<SimTime> {
        self.start
    }

    /// Instant the task's remaining work reached zero.
    pub fn finish(&self) -> Option<SimTime> {
        self.finish
    }

    /// Accumulated ready-but-not-running time.
    pub fn wait_time(&self) -> SimTime {
        self.wait
    }

    /// `start - arrival`; unset until the first dispatch.
    pub fn response_time(&self) -> Option<SimTime> {
        self.response
    }

    /// `finish - arrival`; unset until the task completes.
    pub fn turnaround(&self) -> Option<SimTime> {
        self.finish.map(|f| f.saturating_sub(self.arrival))
    }

    /// Whether the task finished after its deadline. Unfinished tasks and
    /// tasks without a deadline never count as missed.
    pub fn missed_deadline(&self) -> bool {
        match (self.finish, self.deadline) {
            (Some(finish), Some(deadline)) => finish > deadline,
            _ => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finish.is_some()
    }
}

/// The task table owned by one scheduler: a slab keyed by [`TaskId`].
///
/// Ids are never reused within a run (tasks are not removed), so slab keys
/// are insertion-ordered.
#[derive(Debug, Default)]
pub struct TaskSet {
    tasks: Slab<Task>,
}

impl TaskSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, task: Task) -> TaskId {
        self.tasks.insert(task)
    }

    /// Panics on an unknown id: policies only ever see ids the engine handed
    /// them, so a miss is an internal defect.
    pub fn get(&self, id: TaskId) -> &Task {
        self.tasks.get(id).expect("unknown task id")
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> &mut Task {
        self.tasks.get_mut(id).expect("unknown task id")
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
