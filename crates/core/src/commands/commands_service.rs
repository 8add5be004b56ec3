use log::debug;

use super::commands_model::AccountCommand;
use crate::accounts::Account;
use crate::assets::Asset;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::{create_buy_transaction, try_settle_sale, TransactionError};

/// Applies `command` to a copy of `account` and returns the new aggregate.
///
/// All validation happens here, before the pure calculation functions run.
/// On error the input account is untouched and nothing is returned to
/// persist. The caller is responsible for saving the result.
pub fn apply_command(account: &Account, command: AccountCommand) -> Result<Account> {
    debug!("Applying {} to account {}", command.kind(), account.id);
    let mut updated = account.clone();

    match command {
        AccountCommand::RenameAccount { name } => {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Account name cannot be empty".to_string(),
                )));
            }
            updated.name = name.trim().to_string();
        }
        AccountCommand::UpdateSettings { settings } => {
            settings.validate()?;
            updated.settings = settings;
        }
        AccountCommand::AddAsset { asset } => {
            let asset = asset.into_asset()?;
            if updated.find_asset(&asset.id).is_some() {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Asset {} already exists in account {}",
                    asset.id, updated.id
                ))));
            }
            updated.assets.push(asset);
        }
        AccountCommand::RemoveAsset { asset_id } => {
            let before = updated.assets.len();
            updated.assets.retain(|a| a.id != asset_id);
            if updated.assets.len() == before {
                return Err(asset_not_found(&asset_id, &updated.id));
            }
        }
        AccountCommand::RecordBuy { asset_id, buy } => {
            let lot = create_buy_transaction(&buy, &updated.settings)?;
            let asset = asset_mut(&mut updated, &asset_id)?;
            asset.transactions.push(lot);
            asset.refresh_stats();
        }
        AccountCommand::RecordSale {
            asset_id,
            transaction_id,
            sale,
        } => {
            let settings = updated.settings.clone();
            let asset = asset_mut(&mut updated, &asset_id)?;
            check_top_level(asset, &transaction_id)?;
            let lot = asset
                .find_transaction_mut(&transaction_id)
                .ok_or_else(|| TransactionError::NotFound(transaction_id.clone()))?;
            *lot = try_settle_sale(lot, &sale, &settings)?;
            asset.refresh_stats();
        }
        AccountCommand::DeleteTransaction {
            asset_id,
            transaction_id,
        } => {
            let asset = asset_mut(&mut updated, &asset_id)?;
            check_top_level(asset, &transaction_id)?;
            let before = asset.transactions.len();
            asset.transactions.retain(|t| t.id != transaction_id);
            if asset.transactions.len() == before {
                return Err(TransactionError::NotFound(transaction_id).into());
            }
            asset.refresh_stats();
        }
    }

    Ok(updated)
}

fn asset_not_found(asset_id: &str, account_id: &str) -> Error {
    Error::NotFound(format!("Asset {} in account {}", asset_id, account_id))
}

fn asset_mut<'a>(account: &'a mut Account, asset_id: &str) -> Result<&'a mut Asset> {
    let account_id = account.id.clone();
    account
        .find_asset_mut(asset_id)
        .ok_or_else(|| asset_not_found(asset_id, &account_id))
}

/// Partial-sale records are only reachable through their parent lot.
fn check_top_level(asset: &Asset, transaction_id: &str) -> Result<()> {
    if asset.is_child_transaction(transaction_id) {
        return Err(TransactionError::ChildTransaction(transaction_id.to_string()).into());
    }
    Ok(())
}
