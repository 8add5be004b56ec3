//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, NewAccount};
use crate::commands::AccountCommand;
use crate::errors::Result;
use crate::portfolio::TransactionStats;

/// Trait defining the contract for Account repository operations.
///
/// The store is a key/value collection of whole account aggregates keyed by
/// account id. Every write replaces complete records; there is no partial
/// update and no version check, so the last writer wins.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Retrieves an account by its ID, `None` when absent.
    fn get_by_id(&self, account_id: &str) -> Result<Option<Account>>;

    /// Lists every stored account.
    fn list(&self) -> Result<Vec<Account>>;

    /// Inserts or replaces the whole account record.
    async fn save(&self, account: Account) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Replaces the entire store with `accounts` in one write.
    ///
    /// Returns the number of stored records.
    async fn replace_all(&self, accounts: Vec<Account>) -> Result<usize>;
}

/// Trait defining the contract for Account service operations.
///
/// The service layer loads aggregates, runs commands through the validation
/// boundary and persists the result.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Retrieves an account by ID, failing with `NotFound` when absent.
    fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Lists all accounts.
    fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Deletes an account with all of its assets and lots.
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    /// Loads the account, applies `command` and saves the result.
    ///
    /// Nothing is written when the command is rejected.
    async fn apply(&self, account_id: &str, command: AccountCommand) -> Result<Account>;

    /// Totals across every stored account.
    fn portfolio_stats(&self) -> Result<TransactionStats>;

    /// Serializes every account into a human-readable JSON array.
    fn export_accounts(&self) -> Result<String>;

    /// Replaces the whole store with the accounts in `json`.
    ///
    /// Returns the number of imported accounts.
    async fn import_accounts(&self, json: &str) -> Result<usize>;
}
