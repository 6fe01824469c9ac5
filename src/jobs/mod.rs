//! Background jobs.

pub mod scheduler;

pub use scheduler::{FixedInterval, IntervalProvider, SchedulerLoop};
