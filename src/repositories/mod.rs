//! Repository layer for persisted data.
//!
//! Everything the monitor persists lives in small files: the source list,
//! the last-seen markers and the check interval.

mod check_state_repo;
mod file;
mod interval_repo;
mod source_repo;

pub use check_state_repo::{JsonStateRepository, StateStore};
pub use interval_repo::{IntervalRepository, validate_minutes};
pub use source_repo::{JsonSourceRepository, SourceRegistry};

use std::sync::Arc;

use crate::config::MonitorConfig;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap; the registry and store are shared behind `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub sources: Arc<dyn SourceRegistry>,
    pub state: Arc<dyn StateStore>,
    pub interval: IntervalRepository,
}

impl Repositories {
    /// File-backed repositories at the paths configured in `monitor`
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            sources: Arc::new(JsonSourceRepository::new(&config.sources_file)),
            state: Arc::new(JsonStateRepository::new(&config.state_file)),
            interval: IntervalRepository::new(&config.interval_file, config.default_interval_minutes),
        }
    }
}
