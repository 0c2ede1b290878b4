#![doc = include_str!("../README.md")]

mod clock;
mod metrics;
mod scheduler;
mod task;
mod trace;

pub mod policy;

pub use clock::{SimClock, SimTime};
pub use metrics::RunMetrics;
pub use policy::{ConfigError, Decision, Edf, Fifo, Policy, Priority, RoundRobin};
pub use scheduler::Scheduler;
pub use task::{Task, TaskId, TaskSet, DEFAULT_PRIORITY};
pub use trace::{NoopTrace, TraceEvent, TraceHooks};
