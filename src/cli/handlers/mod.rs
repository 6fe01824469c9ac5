//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod check;
pub mod run;
pub mod set_interval;
pub mod validate;

pub use check::CheckCommandHandler;
pub use run::RunCommandHandler;
pub use set_interval::SetIntervalCommandHandler;
pub use validate::ValidateCommandHandler;
