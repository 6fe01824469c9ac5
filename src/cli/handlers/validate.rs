//! Validate command handler
//!
//! Dry run: checks configuration, selectors and the source list, prints a
//! report and exits without fetching anything.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::external::page::UpdateExtractor;
use crate::repositories::Repositories;
use crate::services::Notifier;

/// Handler for the validate command
pub struct ValidateCommandHandler {
    config: Settings,
}

impl ValidateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }

    pub async fn execute(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");

        let monitor = &self.config.monitor;
        UpdateExtractor::new(&monitor.marker_selector, &monitor.name_selector)?;
        println!("✓ Selectors compile: '{}' / '{}'", monitor.marker_selector, monitor.name_selector);

        let notifier = Notifier::from_settings(&self.config)?;
        println!("✓ Notifications go to: {}", notifier.channel());

        if self.config.server.enabled {
            println!("✓ Keep-alive endpoint would bind to: {}", self.config.server.address());
        }
        if self.config.telegram.has_token() {
            println!("✓ Chat commands enabled");
        } else {
            println!("! No bot token, chat commands disabled");
        }

        let repos = Repositories::new(monitor);
        let sources = repos.sources.load_sources().await?;
        println!("✓ {} source(s) in {}", sources.len(), monitor.sources_file);

        let state = repos.state.load().await?;
        println!("✓ Check state readable ({} entries)", state.len());

        println!(
            "✓ Current interval: {} minutes",
            repos.interval.read_minutes().await
        );

        println!("Dry run completed successfully");
        Ok(())
    }
}
