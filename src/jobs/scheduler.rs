//! Periodic check loop.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::models::CheckOutcome;
use crate::services::CheckService;

/// Source of the current check interval.
///
/// Read before every sleep so external updates apply from the next cycle on.
#[async_trait]
pub trait IntervalProvider: Send + Sync {
    async fn interval_minutes(&self) -> u32;
}

/// Constant interval
#[derive(Debug, Clone, Copy)]
pub struct FixedInterval(pub u32);

#[async_trait]
impl IntervalProvider for FixedInterval {
    async fn interval_minutes(&self) -> u32 {
        self.0
    }
}

/// Runs a check cycle, sleeps for the current interval, repeats
pub struct SchedulerLoop {
    checks: Arc<CheckService>,
    interval: Arc<dyn IntervalProvider>,
}

impl SchedulerLoop {
    pub fn new(checks: Arc<CheckService>, interval: Arc<dyn IntervalProvider>) -> Self {
        Self { checks, interval }
    }

    /// Runs until the surrounding task is dropped
    pub async fn run(&self) {
        tracing::info!("Scheduler loop started");
        loop {
            let delay = self.tick().await;
            tokio::time::sleep(delay).await;
        }
    }

    /// One cycle followed by an interval lookup; returns how long to sleep.
    ///
    /// A failed cycle is logged and the loop keeps its normal schedule.
    pub async fn tick(&self) -> Duration {
        match self.checks.run_cycle().await {
            Ok(outcomes) => {
                let failed = outcomes
                    .iter()
                    .filter(|o| matches!(o, CheckOutcome::FetchFailed | CheckOutcome::MarkerNotFound))
                    .count();
                tracing::debug!(checked = outcomes.len(), failed, "Scheduled cycle done");
            }
            Err(e) => tracing::error!(error = %e, "Scheduled check cycle failed"),
        }

        let minutes = self.interval.interval_minutes().await;
        tracing::info!(minutes, "Next check scheduled");
        Duration::from_secs(u64::from(minutes) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::page::{HttpPageFetcher, UpdateExtractor};
    use crate::repositories::{IntervalRepository, JsonSourceRepository, JsonStateRepository};
    use crate::services::Notifier;
    use tempfile::TempDir;

    fn checks(dir: &TempDir) -> Arc<CheckService> {
        Arc::new(CheckService::new(
            Arc::new(JsonSourceRepository::new(dir.path().join("sources.json"))),
            Arc::new(JsonStateRepository::new(dir.path().join("last_check.json"))),
            Arc::new(HttpPageFetcher::new(Duration::from_secs(1))),
            UpdateExtractor::new("div.updatedAtDate", "h1").unwrap(),
            Notifier::disabled(),
        ))
    }

    #[tokio::test]
    async fn test_tick_uses_injected_interval() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("sources.json"), "[]").await.unwrap();
        let scheduler = SchedulerLoop::new(checks(&dir), Arc::new(FixedInterval(3)));

        assert_eq!(scheduler.tick().await, Duration::from_secs(180));
        assert!(dir.path().join("last_check.json").exists());
    }

    #[tokio::test]
    async fn test_failed_cycle_keeps_schedule() {
        let dir = TempDir::new().unwrap();
        // no sources.json: every cycle fails at registry load
        let scheduler = SchedulerLoop::new(checks(&dir), Arc::new(FixedInterval(15)));

        assert_eq!(scheduler.tick().await, Duration::from_secs(15 * 60));
        assert_eq!(scheduler.tick().await, Duration::from_secs(15 * 60));
    }

    #[tokio::test]
    async fn test_interval_is_reread_every_tick() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("sources.json"), "[]").await.unwrap();
        let interval = Arc::new(IntervalRepository::new(dir.path().join("interval.txt"), 15));
        let scheduler = SchedulerLoop::new(checks(&dir), interval.clone());

        assert_eq!(scheduler.tick().await, Duration::from_secs(15 * 60));

        interval.write_minutes(30).await.unwrap();
        assert_eq!(scheduler.tick().await, Duration::from_secs(30 * 60));
    }
}
