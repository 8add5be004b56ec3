//! Lot domain model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_AMOUNT, MAX_PRICE, MAX_QUANTITY};
use crate::errors::{
    ensure_at_most, ensure_non_negative, ensure_positive, Error, Result, ValidationError,
};

/// Lifecycle of a lot. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotStatus {
    /// Nothing sold yet
    Open,
    /// Some, but not all, units sold
    PartiallyClosed,
    /// Every unit sold
    Closed,
}

/// One buy event (a lot) and its cumulative sell history.
///
/// Buy-side fields never change after creation. Sell-side fields hold the
/// cumulative state: for a lot closed in one sale they describe that sale,
/// otherwise they aggregate the partial-sale records kept in `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub buy_date: NaiveDate,
    pub buy_quantity: Decimal,
    pub buy_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_quantity: Option<Decimal>,
    /// Actual price for a one-shot sale, quantity-weighted average otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
    /// Annualized return of the realized part, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_return: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    /// Only present in the legacy flat layout; folded into `children` on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Partial-sale records, oldest first. Never nested further.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Transaction>,
}

impl Transaction {
    pub fn buy_fee_or_zero(&self) -> Decimal {
        self.buy_fee.unwrap_or(Decimal::ZERO)
    }

    /// Cumulative quantity sold so far.
    pub fn sold_quantity(&self) -> Decimal {
        self.sell_quantity.unwrap_or(Decimal::ZERO)
    }

    /// Quantity still held: `buy_quantity - sold_quantity`.
    pub fn remaining_quantity(&self) -> Decimal {
        self.buy_quantity - self.sold_quantity()
    }

    pub fn status(&self) -> LotStatus {
        let sold = self.sold_quantity();
        if sold <= Decimal::ZERO {
            LotStatus::Open
        } else if sold < self.buy_quantity {
            LotStatus::PartiallyClosed
        } else {
            LotStatus::Closed
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status() == LotStatus::Closed
    }

    /// Checks a stored record (imported or loaded) against the lot invariants.
    ///
    /// Buy side positive and bounded, `0 <= sold <= bought`, fees non-negative,
    /// and for a lot with partial-sale records: children are one level deep,
    /// individually valid, and their sold quantities add up to the lot's.
    pub fn validate_record(&self) -> Result<()> {
        self.validate_fields()?;

        for child in &self.children {
            if !child.children.is_empty() {
                return Err(invalid(format!(
                    "Partial sale {} of transaction {} has nested records",
                    child.id, self.id
                )));
            }
            child.validate_fields()?;
        }

        if !self.children.is_empty() {
            let children_sold: Decimal =
                self.children.iter().map(Transaction::sold_quantity).sum();
            if children_sold != self.sold_quantity() {
                return Err(invalid(format!(
                    "Transaction {} records {} sold but its partial sales total {}",
                    self.id,
                    self.sold_quantity(),
                    children_sold
                )));
            }
        }
        Ok(())
    }

    fn validate_fields(&self) -> Result<()> {
        ensure_positive("buyQuantity", self.buy_quantity)?;
        ensure_positive("buyPrice", self.buy_price)?;
        ensure_at_most("buyQuantity", self.buy_quantity, MAX_QUANTITY)?;
        ensure_at_most("buyPrice", self.buy_price, MAX_PRICE)?;

        let sold = self.sold_quantity();
        ensure_non_negative("sellQuantity", sold)?;
        if sold > self.buy_quantity {
            return Err(invalid(format!(
                "Transaction {} sold {} of {} units",
                self.id, sold, self.buy_quantity
            )));
        }

        if let Some(price) = self.sell_price {
            ensure_non_negative("sellPrice", price)?;
            ensure_at_most("sellPrice", price, MAX_PRICE)?;
        }
        for (field, fee) in [("buyFee", self.buy_fee), ("sellFee", self.sell_fee)] {
            if let Some(fee) = fee {
                ensure_non_negative(field, fee)?;
                ensure_at_most(field, fee, MAX_AMOUNT)?;
            }
        }
        if let Some(profit) = self.profit {
            ensure_at_most("profit", profit, MAX_AMOUNT)?;
        }
        Ok(())
    }

    /// Rebuilds the cumulative sell fields from `children`.
    ///
    /// Used when partial-sale records were attached from an external source
    /// (e.g. the legacy flat layout) and the parent totals cannot be trusted.
    pub fn recompute_from_children(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let sum = |f: fn(&Transaction) -> Option<Decimal>| -> Decimal {
            self.children.iter().filter_map(f).sum()
        };
        let sold = sum(|c| c.sell_quantity);
        let fees = sum(|c| c.sell_fee);
        let profit = sum(|c| c.profit);

        self.sell_quantity = Some(sold);
        self.sell_fee = Some(fees);
        self.profit = Some(profit);
        self.sell_price = weighted_average_sell_price(&self.children);
        self.annual_return = weighted_average_annual_return(&self.children);
        self.sell_date = if sold >= self.buy_quantity {
            self.children.iter().filter_map(|c| c.sell_date).max()
        } else {
            None
        };
    }
}

fn invalid(message: String) -> Error {
    Error::Validation(ValidationError::InvalidInput(message))
}

/// `Σ price * quantity / Σ quantity` over the children, `None` if nothing sold.
pub(crate) fn weighted_average_sell_price(children: &[Transaction]) -> Option<Decimal> {
    let (value, quantity) = children.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(value, quantity), child| {
            let sold = child.sold_quantity();
            (
                value + child.sell_price.unwrap_or(Decimal::ZERO) * sold,
                quantity + sold,
            )
        },
    );
    value.checked_div(quantity)
}

/// Annual return of the children weighted by each child's sell value.
pub(crate) fn weighted_average_annual_return(children: &[Transaction]) -> Option<Decimal> {
    let mut weighted = Decimal::ZERO;
    let mut total_value = Decimal::ZERO;
    for child in children {
        let Some(annual) = child.annual_return else {
            continue;
        };
        let value = child.sell_price.unwrap_or(Decimal::ZERO) * child.sold_quantity();
        // Annual returns on tiny cost bases can be huge; skip rather than overflow.
        let Some(next) = annual
            .checked_mul(value)
            .and_then(|part| weighted.checked_add(part))
        else {
            continue;
        };
        weighted = next;
        total_value += value;
    }
    weighted.checked_div(total_value)
}

/// Input for recording a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBuyTransaction {
    pub buy_date: NaiveDate,
    pub buy_quantity: Decimal,
    pub buy_price: Decimal,
}

impl NewBuyTransaction {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("buyQuantity", self.buy_quantity)?;
        ensure_positive("buyPrice", self.buy_price)?;
        ensure_at_most("buyQuantity", self.buy_quantity, MAX_QUANTITY)?;
        ensure_at_most("buyPrice", self.buy_price, MAX_PRICE)?;
        Ok(())
    }
}

/// A single sell request against one lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub sell_date: NaiveDate,
    pub sell_quantity: Decimal,
    pub sell_price: Decimal,
}

impl SellRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("sellQuantity", self.sell_quantity)?;
        ensure_positive("sellPrice", self.sell_price)?;
        ensure_at_most("sellQuantity", self.sell_quantity, MAX_QUANTITY)?;
        ensure_at_most("sellPrice", self.sell_price, MAX_PRICE)?;
        Ok(())
    }
}
