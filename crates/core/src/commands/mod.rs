//! Commands module - the single mutation path for account aggregates.

mod commands_model;
mod commands_service;


pub use commands_model::AccountCommand;
pub use commands_service::apply_command;
