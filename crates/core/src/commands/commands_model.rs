use serde::{Deserialize, Serialize};

use crate::assets::NewAsset;
use crate::settings::AccountSettings;
use crate::transactions::{NewBuyTransaction, SellRequest};

/// A mutation of one account aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "command",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum AccountCommand {
    RenameAccount {
        name: String,
    },
    /// Replaces the fee schedule. Fees already fixed on existing lots stay.
    UpdateSettings {
        settings: AccountSettings,
    },
    AddAsset {
        asset: NewAsset,
    },
    /// Removes the asset together with all of its lots.
    RemoveAsset {
        asset_id: String,
    },
    RecordBuy {
        asset_id: String,
        buy: NewBuyTransaction,
    },
    RecordSale {
        asset_id: String,
        transaction_id: String,
        sale: SellRequest,
    },
    /// Removes a top-level lot and its partial-sale records.
    DeleteTransaction {
        asset_id: String,
        transaction_id: String,
    },
}

impl AccountCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            AccountCommand::RenameAccount { .. } => "renameAccount",
            AccountCommand::UpdateSettings { .. } => "updateSettings",
            AccountCommand::AddAsset { .. } => "addAsset",
            AccountCommand::RemoveAsset { .. } => "removeAsset",
            AccountCommand::RecordBuy { .. } => "recordBuy",
            AccountCommand::RecordSale { .. } => "recordSale",
            AccountCommand::DeleteTransaction { .. } => "deleteTransaction",
        }
    }
}
