pub mod command_handler;
pub mod handlers;
pub mod progress_commands;

pub use command_handler::{Command, CommandHandler};
