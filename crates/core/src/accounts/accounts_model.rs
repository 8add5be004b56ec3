//! Account domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::Asset;
use crate::errors::{Error, Result, ValidationError};
use crate::settings::AccountSettings;

/// Kind of instrument an account holds.
///
/// Only affects the unit label and the default fee schedule, never the
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Stock,
    Gold,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Stock => "stock",
            AccountType::Gold => "gold",
        }
    }

    /// Unit in which quantities are counted.
    pub fn unit_label(&self) -> &'static str {
        match self {
            AccountType::Stock => "shares",
            AccountType::Gold => "grams",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(AccountType::Stock),
            "gold" => Ok(AccountType::Gold),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown account type '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing an account aggregate.
///
/// The account exclusively owns its assets, which own their lots. It is
/// loaded, mutated and stored as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub assets: Vec<Asset>,
    pub settings: AccountSettings,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn find_asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == asset_id)
    }

    pub fn find_asset_mut(&mut self, asset_id: &str) -> Option<&mut Asset> {
        self.assets.iter_mut().find(|a| a.id == asset_id)
    }

    pub fn unit_label(&self) -> &'static str {
        self.account_type.unit_label()
    }

    /// Validates an account coming from outside (import, repository rows).
    ///
    /// Checks the name, the fee schedule and every lot with its partial-sale
    /// records.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        self.settings.validate()?;

        for lot in self.assets.iter().flat_map(|a| a.transactions.iter()) {
            lot.validate_record()?;
        }
        Ok(())
    }

    /// Recomputes the cached stats of every asset.
    pub fn refresh_stats(&mut self) {
        for asset in self.assets.iter_mut() {
            asset.refresh_stats();
        }
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Falls back to the defaults of `account_type` when absent.
    #[serde(default)]
    pub settings: Option<AccountSettings>,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        Ok(())
    }

    /// Builds an empty account, assigning a fresh id when none is supplied.
    pub fn into_account(self) -> Result<Account> {
        self.validate()?;
        let settings = self
            .settings
            .unwrap_or_else(|| AccountSettings::defaults_for(self.account_type));
        Ok(Account {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name.trim().to_string(),
            account_type: self.account_type,
            assets: Vec::new(),
            settings,
            created_at: Utc::now(),
        })
    }
}
