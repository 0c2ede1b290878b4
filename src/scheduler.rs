use crate::clock::{SimClock, SimTime};
use crate::metrics::RunMetrics;
use crate::policy::{Decision, Policy};
use crate::task::{Task, TaskId, TaskSet};
use crate::trace::{NoopTrace, TraceEvent, TraceHooks};
use static_assertions::assert_not_impl_any;
use std::collections::VecDeque;

/// The scheduling core: one simulated processor, one policy, one batch of
/// tasks.
///
/// Add tasks, then call [`run`](Scheduler::run) once; the engine owns the
/// clock end-to-end and drives every task to completion. Afterwards the
/// scheduler is read-only: per-task records via [`tasks`](Scheduler::tasks),
/// the step-by-step history via [`trace`](Scheduler::trace), the accumulated
/// switch cost via [`overhead`](Scheduler::overhead) and a summary via
/// [`metrics`](Scheduler::metrics).
///
/// All four policies share the admission loop here: pending tasks are held
/// until their arrival, the clock only ever jumps to real events, and the
/// run terminates exactly when pending, ready and the running slot are all
/// empty.
pub struct Scheduler {
    tasks: TaskSet,
    policy: Box<dyn Policy>,
    clock: SimClock,
    overhead: SimTime,
    trace: Vec<TraceEvent>,
    hooks: Box<dyn TraceHooks>,
    ran: bool,
}

assert_not_impl_any!(Scheduler: Send, Sync);

impl Scheduler {
    pub fn new(policy: impl Policy + 'static) -> Self {
        Self {
            tasks: TaskSet::new(),
            policy: Box::new(policy),
            clock: SimClock::new(),
            overhead: SimTime::ZERO,
            trace: Vec::new(),
            hooks: Box::new(NoopTrace),
            ran: false,
        }
    }

    /// Install an observer for live trace events. Replaces the default no-op
    /// observer; must be called before [`run`](Scheduler::run) to see
    /// anything.
    pub fn set_trace_hooks(&mut self, hooks: impl TraceHooks + 'static) {
        self.hooks = Box::new(hooks);
    }

    /// Hand a task to the scheduler. Tasks must be added before
    /// [`run`](Scheduler::run); a task added afterwards is never dispatched.
    pub fn add_task(&mut self, task: Task) -> TaskId {
        self.tasks.insert(task)
    }

    /// Execute the whole batch to the terminal state. Runs at most once; a
    /// second call returns immediately with nothing left to do.
    pub fn run(&mut self) {
        if self.ran {
            return;
        }
        self.ran = true;

        // tasks carry their own arrival; insertion order only breaks ties
        let mut pending: Vec<TaskId> = self.tasks.iter().map(|(id, _)| id).collect();
        pending.sort_by_key(|&id| (self.tasks.get(id).arrival(), id));
        let mut pending: VecDeque<TaskId> = pending.into();

        let mut running: Option<TaskId> = None;

        loop {
            self.admit(&mut pending);

            let id = match running {
                Some(id) => id,
                None => {
                    if !self.policy.is_runnable() {
                        // nothing ready: jump to the next real event, or stop
                        let Some(&next) = pending.front() else { break };
                        let until = self.tasks.get(next).arrival();
                        self.emit(TraceEvent::Idle {
                            from: self.clock.now(),
                            until,
                        });
                        self.clock.advance_to(until);
                        continue;
                    }
                    let id = self
                        .policy
                        .pop(&self.tasks)
                        .expect("runnable policy yielded no task");
                    let cost = self.policy.dispatch_overhead();
                    self.overhead += cost;
                    running = Some(id);
                    id
                }
            };

            let slice_start = self.clock.now();
            {
                let task = self.tasks.get_mut(id);
                debug_assert!(task.finish.is_none(), "finished task selected");
                debug_assert!(task.arrival() <= slice_start, "dispatched before arrival");
                if task.start.is_none() {
                    task.start = Some(slice_start);
                    task.response = Some(slice_start.saturating_sub(task.arrival()));
                }
                let ready_since = task.last_slice_end.unwrap_or(task.arrival());
                task.wait += slice_start.saturating_sub(ready_since);
            }

            let slice = {
                let remaining = self.tasks.get(id).remaining();
                match self.policy.quantum() {
                    Some(quantum) => quantum.min(remaining),
                    None => remaining,
                }
            };
            self.clock.advance(slice);
            let slice_end = self.clock.now();
            let remaining = {
                let task = self.tasks.get_mut(id);
                task.remaining -= slice;
                task.last_slice_end = Some(slice_end);
                task.remaining
            };
            self.emit(TraceEvent::Slice {
                id,
                at: slice_start,
                ran: slice,
                remaining,
            });

            // anything that arrived during the slice joins the ready set
            // before continuation or preemption is decided
            self.admit(&mut pending);

            if remaining.is_zero() {
                let missed = {
                    let task = self.tasks.get_mut(id);
                    task.finish = Some(slice_end);
                    task.missed_deadline()
                };
                self.overhead += self.policy.exit_overhead();
                self.emit(TraceEvent::Finished {
                    id,
                    at: slice_end,
                    missed_deadline: missed,
                });
                running = None;
            } else {
                match self.policy.decide(id, &self.tasks) {
                    Decision::Continue => {}
                    Decision::Requeue { overhead } => {
                        self.overhead += overhead;
                        self.clock.advance(overhead);
                        self.emit(TraceEvent::ContextSwitch { id, cost: overhead });
                        self.policy.push(id, &self.tasks);
                        running = None;
                    }
                    Decision::SwitchTo { next } => {
                        self.emit(TraceEvent::Preempted { running: id, by: next });
                        self.policy.push(id, &self.tasks);
                        running = Some(next);
                    }
                }
            }
        }
    }

    /// Move every pending task whose arrival has passed into the ready set.
    fn admit(&mut self, pending: &mut VecDeque<TaskId>) {
        while let Some(&id) = pending.front() {
            if self.tasks.get(id).arrival() > self.clock.now() {
                break;
            }
            pending.pop_front();
            self.policy.push(id, &self.tasks);
        }
    }

    fn emit(&mut self, event: TraceEvent) {
        self.hooks.on_event(&event, &self.tasks);
        self.trace.push(event);
    }

    pub fn tasks(&self) -> &TaskSet {
        &self.tasks
    }

    /// Simulated cost of context switches and scheduling decisions
    /// accumulated over the run.
    pub fn overhead(&self) -> SimTime {
        self.overhead
    }

    /// Every step of the run, in order.
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    pub fn metrics(&self) -> RunMetrics {
        RunMetrics::collect(&self.tasks, self.overhead)
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}
