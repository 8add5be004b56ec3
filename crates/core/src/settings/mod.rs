//! Settings module - per-account fee schedule and display preferences.

mod settings_model;

#[cfg(test)]
mod settings_model_tests;

pub use settings_model::AccountSettings;
