//! Account settings domain model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::accounts::AccountType;
use crate::constants::MAX_PRICE;
use crate::errors::{ensure_at_most, ensure_non_negative, Result};

/// Fee schedule and display preferences of a single account.
///
/// Fees are charged per unit (share or gram) with a floor: the fee for a
/// trade is `max(quantity * per_unit, minimum)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    pub buy_fee_per_unit: Decimal,
    pub sell_fee_per_unit: Decimal,
    pub min_buy_fee: Decimal,
    pub min_sell_fee: Decimal,
    /// Display currency tag (e.g. "$"). Never used in arithmetic.
    pub currency: String,
    /// Whether partial-sale records are shown expanded by default.
    #[serde(default = "default_expand")]
    pub expand_sub_transactions: bool,
}

fn default_expand() -> bool {
    true
}

impl AccountSettings {
    /// Default fee schedule for an account type.
    pub fn defaults_for(account_type: AccountType) -> Self {
        match account_type {
            AccountType::Stock => AccountSettings {
                buy_fee_per_unit: dec!(0.0035),
                sell_fee_per_unit: dec!(0.0035),
                min_buy_fee: dec!(0.35),
                min_sell_fee: dec!(0.35),
                currency: "$".to_string(),
                expand_sub_transactions: true,
            },
            AccountType::Gold => AccountSettings {
                buy_fee_per_unit: Decimal::ZERO,
                sell_fee_per_unit: dec!(4),
                min_buy_fee: Decimal::ZERO,
                min_sell_fee: dec!(4),
                currency: "¥".to_string(),
                expand_sub_transactions: true,
            },
        }
    }

    /// A schedule that charges nothing. Handy for cost-only bookkeeping.
    pub fn fee_free(currency: impl Into<String>) -> Self {
        AccountSettings {
            buy_fee_per_unit: Decimal::ZERO,
            sell_fee_per_unit: Decimal::ZERO,
            min_buy_fee: Decimal::ZERO,
            min_sell_fee: Decimal::ZERO,
            currency: currency.into(),
            expand_sub_transactions: true,
        }
    }

    /// Validates that every fee field is non-negative and bounded.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("buyFeePerUnit", self.buy_fee_per_unit),
            ("sellFeePerUnit", self.sell_fee_per_unit),
            ("minBuyFee", self.min_buy_fee),
            ("minSellFee", self.min_sell_fee),
        ] {
            ensure_non_negative(field, value)?;
            ensure_at_most(field, value, MAX_PRICE)?;
        }
        Ok(())
    }
}

impl Default for AccountSettings {
    fn default() -> Self {
        AccountSettings::defaults_for(AccountType::default())
    }
}
