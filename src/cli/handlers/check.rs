//! Check command handler
//!
//! Runs a single check cycle and prints the outcome of every source.

use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::models::{CheckOutcome, CheckSummary};
use crate::services::Notifier;
use crate::state::AppState;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs one cycle. With `no_notify` notifications are only logged.
    pub async fn execute(self, no_notify: bool) -> AppResult<CheckSummary> {
        let state = if no_notify {
            AppState::with_notifier(self.config, Notifier::disabled())?
        } else {
            AppState::new(self.config)?
        };

        let report = state.services.check.run_cycle_by_source().await?;
        for (name, outcome) in &report {
            println!("{}", outcome_line(name, outcome));
        }

        let outcomes: Vec<CheckOutcome> = report.into_iter().map(|(_, outcome)| outcome).collect();
        let summary = CheckSummary::from_outcomes(&outcomes);
        println!("{summary}");
        Ok(summary)
    }
}

fn outcome_line(name: &str, outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Changed(display) => format!("✓ {name}: updated ({display})"),
        CheckOutcome::Unchanged(display) => format!("· {name}: unchanged ({display})"),
        CheckOutcome::FetchFailed => format!("✗ {name}: fetch failed"),
        CheckOutcome::MarkerNotFound => format!("✗ {name}: update marker not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        let path = |name: &str| dir.path().join(name).to_string_lossy().into_owned();
        settings.monitor.sources_file = path("sources.json");
        settings.monitor.state_file = path("last_check.json");
        settings.monitor.interval_file = path("interval.txt");
        settings
    }

    #[tokio::test]
    async fn test_check_with_empty_source_list() {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join("sources.json"), "[]").await.unwrap();

        let summary = CheckCommandHandler::new(settings_in(&dir))
            .execute(true)
            .await
            .unwrap();

        assert_eq!(summary, CheckSummary::NothingChecked);
        assert!(dir.path().join("last_check.json").exists());
    }

    #[tokio::test]
    async fn test_check_without_sources_fails() {
        let dir = TempDir::new().unwrap();
        let result = CheckCommandHandler::new(settings_in(&dir)).execute(true).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_lines() {
        assert_eq!(
            outcome_line("a", &CheckOutcome::Changed("A".to_string())),
            "✓ a: updated (A)"
        );
        assert_eq!(outcome_line("b", &CheckOutcome::FetchFailed), "✗ b: fetch failed");
    }
}
