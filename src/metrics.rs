use crate::clock::SimTime;
use crate::task::TaskSet;

/// Post-run summary over the whole task set.
///
/// Averages are `None` when no task completed. Rendering is the caller's
/// concern; everything here is plain data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Tasks that reached `remaining == 0`.
    pub completed: usize,
    /// Accumulated context-switch and dispatch cost.
    pub total_overhead: SimTime,
    /// Mean of `finish - arrival` over completed tasks.
    pub avg_turnaround: Option<SimTime>,
    /// Mean accumulated ready-but-idle time over completed tasks.
    pub avg_wait: Option<SimTime>,
    /// Mean of `start - arrival` over completed tasks.
    pub avg_response: Option<SimTime>,
    /// Completed tasks whose finish exceeded their deadline.
    pub deadline_misses: usize,
}

impl RunMetrics {
    pub(crate) fn collect(tasks: &TaskSet, total_overhead: SimTime) -> Self {
        let mut completed = 0u32;
        let mut turnaround = SimTime::ZERO;
        let mut wait = SimTime::ZERO;
        let mut response = SimTime::ZERO;
        let mut deadline_misses = 0;

        for (_, task) in tasks.iter() {
            let Some(t) = task.turnaround() else { continue };
            completed += 1;
            turnaround += t;
            wait += task.wait_time();
            response += task.response_time().unwrap_or(SimTime::ZERO);
            if task.missed_deadline() {
                deadline_misses += 1;
            }
        }

        let avg = |sum: SimTime| (completed > 0).then(|| sum / completed);
        Self {
            completed: completed as usize,
            total_overhead,
            avg_turnaround: avg(turnaround),
            avg_wait: avg(wait),
            avg_response: avg(response),
            deadline_misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Fifo, RunMetrics, Scheduler, Task};
    use std::time::Duration;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn empty_run_has_no_averages() {
        let mut sched = Scheduler::new(Fifo::new());
        sched.run();
        assert_eq!(sched.metrics(), RunMetrics::default());
    }

    #[test]
    fn averages_agree_with_per_task_records() {
        let mut sched = Scheduler::new(Fifo::new());
        sched.add_task(Task::new("a", 5 * SEC));
        sched.add_task(Task::new("b", 3 * SEC).with_arrival(2 * SEC));
        sched.run();

        let metrics = sched.metrics();
        assert_eq!(metrics.completed, 2);
        // a: turnaround 5, wait 0; b: turnaround 6, wait 3
        assert_eq!(metrics.avg_turnaround, Some(Duration::from_millis(5500)));
        assert_eq!(metrics.avg_wait, Some(Duration::from_millis(1500)));
        assert_eq!(metrics.avg_response, Some(Duration::from_millis(1500)));
        assert_eq!(metrics.total_overhead, Duration::ZERO);
        assert_eq!(metrics.deadline_misses, 0);
    }

    #[test]
    fn misses_are_counted_per_completed_task() {
        let mut sched = Scheduler::new(Fifo::new());
        sched.add_task(Task::new("late", 4 * SEC).with_deadline(SEC));
        sched.add_task(Task::new("fine", SEC).with_deadline(10 * SEC));
        sched.run();
        assert_eq!(sched.metrics().deadline_misses, 1);
    }
}
