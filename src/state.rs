//! Shared application state.
//!
//! Holds the wiring used by the scheduler, the chat bot and the one-shot
//! CLI commands. The keep-alive endpoint deliberately does not see it.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::repositories::Repositories;
use crate::services::{Notifier, Services};

/// Cloning is cheap: settings, repositories and services are `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub repositories: Repositories,
    pub services: Services,
}

impl AppState {
    /// Wires repositories and services from validated settings
    pub fn new(settings: Settings) -> AppResult<Self> {
        let repositories = Repositories::new(&settings.monitor);
        let services = Services::new(&settings, &repositories)?;
        Ok(Self::assemble(settings, repositories, services))
    }

    /// Same as `new` but with an explicit notifier
    pub fn with_notifier(settings: Settings, notifier: Notifier) -> AppResult<Self> {
        let repositories = Repositories::new(&settings.monitor);
        let services = Services::with_notifier(&settings, &repositories, notifier)?;
        Ok(Self::assemble(settings, repositories, services))
    }

    fn assemble(settings: Settings, repositories: Repositories, services: Services) -> Self {
        Self {
            settings: Arc::new(settings),
            repositories,
            services,
        }
    }
}
