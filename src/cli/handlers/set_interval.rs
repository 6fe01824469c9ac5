//! Set-interval command handler
//!
//! Local administrative write of the check interval. No caller identity is
//! involved; the range check is the same as for the chat command.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::repositories::IntervalRepository;

/// Handler for the set-interval command
pub struct SetIntervalCommandHandler {
    config: Settings,
}

impl SetIntervalCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, minutes: u32) -> AppResult<()> {
        let monitor = &self.config.monitor;
        let repository =
            IntervalRepository::new(&monitor.interval_file, monitor.default_interval_minutes);

        let previous = repository.read_minutes().await;
        repository.write_minutes(minutes).await?;

        println!("✓ Check interval changed from {previous} to {minutes} minutes");
        Ok(())
    }
}
