//! Asset domain models.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};
use crate::portfolio::{asset_stats, TransactionStats};
use crate::transactions::Transaction;

/// A named instrument (ticker, bullion product, ...) and its top-level lots.
///
/// Partial-sale records live inside their parent lot, never as siblings in
/// `transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    /// Denormalized copy of `asset_stats(self)`, refreshed after every
    /// mutation. Display only; always re-derivable from `transactions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<TransactionStats>,
}

impl Asset {
    pub fn find_transaction(&self, transaction_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == transaction_id)
    }

    pub fn find_transaction_mut(&mut self, transaction_id: &str) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == transaction_id)
    }

    /// True if `transaction_id` names a partial-sale record of one of the lots.
    pub fn is_child_transaction(&self, transaction_id: &str) -> bool {
        self.transactions
            .iter()
            .any(|t| t.children.iter().any(|c| c.id == transaction_id))
    }

    /// Recomputes the cached stats snapshot from the lots.
    pub fn refresh_stats(&mut self) {
        self.stats = Some(asset_stats(self));
    }

    /// Folds partial sales stored in the legacy flat layout (siblings carrying
    /// a `parentId`) into their parent's `children`, then rebuilds the parent's
    /// cumulative sell fields. Returns the number of records folded.
    pub fn normalize_legacy_children(&mut self) -> usize {
        if !self.transactions.iter().any(|t| t.parent_id.is_some()) {
            return 0;
        }

        let (mut legacy, mut lots): (Vec<Transaction>, Vec<Transaction>) =
            std::mem::take(&mut self.transactions)
                .into_iter()
                .partition(|t| t.parent_id.is_some());
        // The flat layout prepended new records; restore sale order.
        legacy.sort_by_key(|t| (t.sell_date, t.created_at));

        let mut touched: HashSet<String> = HashSet::new();
        let mut folded = 0;
        for mut record in legacy {
            let Some(parent_id) = record.parent_id.take() else {
                continue;
            };
            match lots.iter_mut().find(|lot| lot.id == parent_id) {
                Some(parent) => {
                    parent.children.push(record);
                    touched.insert(parent_id);
                    folded += 1;
                }
                None => {
                    warn!(
                        "Asset {}: partial sale {} references unknown transaction {}. Kept as a top-level lot.",
                        self.id, record.id, parent_id
                    );
                    lots.push(record);
                }
            }
        }

        for lot in lots.iter_mut().filter(|lot| touched.contains(&lot.id)) {
            lot.recompute_from_children();
        }
        self.transactions = lots;
        folded
    }
}

/// Input model for creating a new asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub symbol: String,
}

impl NewAsset {
    /// Validates the new asset data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Asset name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Builds an empty asset, assigning a fresh id when none is supplied.
    pub fn into_asset(self) -> Result<Asset> {
        self.validate()?;
        let mut asset = Asset {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name.trim().to_string(),
            symbol: self.symbol.trim().to_string(),
            transactions: Vec::new(),
            created_at: Utc::now(),
            stats: None,
        };
        asset.refresh_stats();
        Ok(asset)
    }
}
