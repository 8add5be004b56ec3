//! Lotbook Core - Domain entities, calculation engines, and traits.
//!
//! This crate contains the lot accounting logic for a personal stock and
//! gold ledger. It is storage-agnostic and defines the repository trait that
//! is implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod assets;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod fees;
pub mod portfolio;
pub mod settings;
pub mod transactions;

// Re-export the aggregate types and calculation entry points
pub use accounts::{Account, AccountType};
pub use assets::Asset;
pub use commands::{apply_command, AccountCommand};
pub use portfolio::*;
pub use settings::AccountSettings;
pub use transactions::{LotStatus, SellRequest, Transaction};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
