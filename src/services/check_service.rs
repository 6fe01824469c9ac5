//! One check cycle: fetch every source, compare markers, notify, persist.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::notifications::{NotificationMessage, Notifier};
use crate::error::{AppError, AppResult};
use crate::external::page::{PageFetcher, UpdateExtractor};
use crate::models::{CheckOutcome, CheckState, CheckSummary, SourceDescriptor};
use crate::repositories::{SourceRegistry, StateStore};

/// Change detection over all registered sources.
///
/// At most one cycle runs at a time; a manual check issued while the
/// scheduled cycle is in flight waits for it and then sees its saved state.
pub struct CheckService {
    sources: Arc<dyn SourceRegistry>,
    state: Arc<dyn StateStore>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: UpdateExtractor,
    notifier: Notifier,
    cycle_lock: Mutex<()>,
}

impl CheckService {
    pub fn new(
        sources: Arc<dyn SourceRegistry>,
        state: Arc<dyn StateStore>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: UpdateExtractor,
        notifier: Notifier,
    ) -> Self {
        Self {
            sources,
            state,
            fetcher,
            extractor,
            notifier,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Runs one full cycle and returns the per-source outcomes in registry
    /// order.
    ///
    /// Only a registry or state load failure (or the final save) is returned
    /// as an error; per-source failures become outcomes.
    pub async fn run_cycle(&self) -> AppResult<Vec<CheckOutcome>> {
        let outcomes = self.run_cycle_by_source().await?;
        Ok(outcomes.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// `run_cycle` with every outcome paired with the name of the source it
    /// belongs to, as read from the registry by that same cycle.
    pub async fn run_cycle_by_source(&self) -> AppResult<Vec<(String, CheckOutcome)>> {
        let _cycle = self.cycle_lock.lock().await;

        let sources = self.sources.load_sources().await?;
        let mut state = self.state.load().await?;
        tracing::info!(sources = sources.len(), "Check cycle started");

        let mut outcomes = Vec::with_capacity(sources.len());
        for source in &sources {
            let outcome = self.check_source(source, &mut state).await;
            outcomes.push((source.name.clone(), outcome));
        }

        // State is written once per cycle, not per source
        self.state.save(&state).await?;

        let changed = outcomes
            .iter()
            .filter(|(_, o)| matches!(o, CheckOutcome::Changed(_)))
            .count();
        tracing::info!(sources = sources.len(), changed, "Check cycle finished");

        Ok(outcomes)
    }

    /// `run_cycle` condensed for a human-readable reply
    pub async fn run_summary(&self) -> AppResult<CheckSummary> {
        let outcomes = self.run_cycle().await?;
        Ok(CheckSummary::from_outcomes(&outcomes))
    }

    async fn check_source(&self, source: &SourceDescriptor, state: &mut CheckState) -> CheckOutcome {
        let document = match self.fetcher.fetch(&source.url).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(source = %source.name, url = %source.url, error = %e, "Fetch failed");
                let cause = fetch_cause(&e);
                self.notifier
                    .notify(&NotificationMessage::fetch_failed(&source.name, &cause, &source.url))
                    .await;
                return CheckOutcome::FetchFailed;
            }
        };

        let extraction = self.extractor.extract(&document);
        let display_name = extraction.display_name_or(&source.name).to_string();

        let Some(marker) = extraction.update_marker else {
            tracing::warn!(source = %source.name, url = %source.url, "Update marker not found");
            self.notifier
                .notify(&NotificationMessage::marker_missing(&display_name, &source.url))
                .await;
            return CheckOutcome::MarkerNotFound;
        };

        if state.record(&source.name, &marker) {
            tracing::info!(source = %source.name, marker = %marker, "Update detected");
            self.notifier
                .notify(&NotificationMessage::update_found(&display_name, &marker, &source.url))
                .await;
            CheckOutcome::Changed(display_name)
        } else {
            tracing::debug!(source = %source.name, "No change");
            CheckOutcome::Unchanged(display_name)
        }
    }
}

/// Underlying cause of a fetch failure, without the repeated URL
fn fetch_cause(error: &AppError) -> String {
    match error {
        AppError::Fetch { source, .. } => format!("{:#}", source),
        other => other.to_string(),
    }
}
