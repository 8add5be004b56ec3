use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};

use super::accounts_model::{Account, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::commands::{apply_command, AccountCommand};
use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::{total_stats, TransactionStats};

/// Service for managing account aggregates.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn load(&self, account_id: &str) -> Result<Account> {
        self.repository
            .get_by_id(account_id)?
            .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))
    }
}

/// Parses an export document and prepares each account for storage.
///
/// Legacy flat partial sales are folded into their lots and the stats caches
/// are rebuilt, so imported data never carries a stale snapshot.
pub(crate) fn parse_import(json: &str) -> Result<Vec<Account>> {
    let mut accounts: Vec<Account> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for account in accounts.iter_mut() {
        if !seen.insert(account.id.clone()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Duplicate account id '{}' in import",
                account.id
            ))));
        }

        // Bounds are checked before folding so the parent totals rebuilt
        // from legacy records cannot overflow.
        account.validate()?;
        let folded: usize = account
            .assets
            .iter_mut()
            .map(|asset| asset.normalize_legacy_children())
            .sum();
        if folded > 0 {
            info!(
                "Folded {} legacy partial-sale records into their lots for account {}",
                folded, account.id
            );
        }

        account.validate()?;
        account.refresh_stats();
    }
    Ok(accounts)
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        let account = new_account.into_account()?;
        debug!(
            "Creating {} account {} ({})",
            account.account_type, account.name, account.id
        );
        self.repository.save(account).await
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.load(account_id)
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        self.repository.list()
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        let deleted = self.repository.delete(account_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Account {}", account_id)));
        }
        Ok(())
    }

    async fn apply(&self, account_id: &str, command: AccountCommand) -> Result<Account> {
        let account = self.load(account_id)?;
        let updated = apply_command(&account, command)?;
        self.repository.save(updated).await
    }

    fn portfolio_stats(&self) -> Result<TransactionStats> {
        let accounts = self.repository.list()?;
        Ok(total_stats(&accounts))
    }

    fn export_accounts(&self) -> Result<String> {
        let accounts = self.repository.list()?;
        info!("Exporting {} accounts", accounts.len());
        Ok(serde_json::to_string_pretty(&accounts)?)
    }

    async fn import_accounts(&self, json: &str) -> Result<usize> {
        let accounts = parse_import(json)?;
        info!("Importing {} accounts (replacing existing data)", accounts.len());
        self.repository.replace_all(accounts).await
    }
}
