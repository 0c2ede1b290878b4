//! Policy comparison over a seeded random task set.
//!
//! Run with: cargo bench --bench compare
//!
//! Not a timing benchmark: the clock is simulated, so this prints the
//! scheduling quality of each policy (wait, turnaround, overhead, misses)
//! on an identical batch of tasks.

use cavsched::{Edf, Fifo, Policy, Priority, RoundRobin, Scheduler, Task};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use tabled::{Table, Tabled};

const SEED: u64 = 2024;
const TASKS: usize = 24;
const QUANTUM: Duration = Duration::from_millis(500);

#[derive(Tabled)]
struct Row {
    policy: &'static str,
    avg_wait: String,
    avg_response: String,
    avg_turnaround: String,
    overhead: String,
    missed: String,
}

fn random_tasks() -> Vec<Task> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..TASKS)
        .map(|i| {
            let duration = Duration::from_millis(rng.gen_range(200..4_000));
            let arrival = Duration::from_millis(rng.gen_range(0..15_000));
            let mut task = Task::new(format!("task-{i:02}"), duration)
                .with_arrival(arrival)
                .with_priority(rng.gen_range(0..5));
            if rng.gen_bool(0.6) {
                let slack = Duration::from_millis(rng.gen_range(500..6_000));
                task = task.with_deadline(arrival + duration + slack);
            }
            task
        })
        .collect()
}

fn run(policy: impl Policy + 'static, tasks: &[Task]) -> Row {
    let mut sched = Scheduler::new(policy);
    for task in tasks {
        sched.add_task(task.clone());
    }
    sched.run();

    let metrics = sched.metrics();
    let fmt = |d: Option<Duration>| match d {
        Some(d) => format!("{d:.2?}"),
        None => "-".to_string(),
    };
    Row {
        policy: sched.policy_name(),
        avg_wait: fmt(metrics.avg_wait),
        avg_response: fmt(metrics.avg_response),
        avg_turnaround: fmt(metrics.avg_turnaround),
        overhead: format!("{:.2?}", metrics.total_overhead),
        missed: format!("{}/{}", metrics.deadline_misses, metrics.completed),
    }
}

fn main() {
    let tasks = random_tasks();
    println!(
        "{} tasks, quantum {:?}, seed {}\n",
        tasks.len(),
        QUANTUM,
        SEED
    );

    let rows = vec![
        run(Fifo::new(), &tasks),
        run(RoundRobin::new(QUANTUM).unwrap(), &tasks),
        run(Priority::new(), &tasks),
        run(Edf::new(QUANTUM).unwrap(), &tasks),
    ];
    println!("{}", Table::new(rows));
}
