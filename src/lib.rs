//! pagewatch library
//!
//! Watches web pages for a changed "updated at" marker, reports changes to a
//! chat and answers a few chat commands.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod jobs;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod state;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
