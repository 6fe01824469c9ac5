//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external integrations.

mod check_service;
pub mod notifications;

pub use check_service::CheckService;
pub use notifications::Notifier;

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::external::page::{HttpPageFetcher, UpdateExtractor};
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap; the check service is shared behind `Arc` so every
/// caller goes through the same cycle lock.
#[derive(Clone)]
pub struct Services {
    pub check: Arc<CheckService>,
    pub notifier: Notifier,
}

impl Services {
    /// Wires the services with the notifier selected by `notifier.channel`
    pub fn new(settings: &Settings, repos: &Repositories) -> AppResult<Self> {
        let notifier = Notifier::from_settings(settings)?;
        Self::with_notifier(settings, repos, notifier)
    }

    /// Wires the services around an explicit notifier
    pub fn with_notifier(
        settings: &Settings,
        repos: &Repositories,
        notifier: Notifier,
    ) -> AppResult<Self> {
        let monitor = &settings.monitor;
        let extractor = UpdateExtractor::new(&monitor.marker_selector, &monitor.name_selector)?;
        let fetcher = Arc::new(HttpPageFetcher::new(monitor.fetch_timeout()));

        let check = CheckService::new(
            repos.sources.clone(),
            repos.state.clone(),
            fetcher,
            extractor,
            notifier.clone(),
        );

        Ok(Self {
            check: Arc::new(check),
            notifier,
        })
    }
}
