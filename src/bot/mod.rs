//! Chat command surface: `/start`, `/check` and `/setinterval`.

mod command;
mod dispatcher;
mod handler;

pub use command::Command;
pub use dispatcher::BotDispatcher;
pub use handler::{CommandHandler, ReplySink};
