//! Lot settlement engine.
//!
//! `settle_sale` is a total function over its documented precondition
//! (`0 < quantity <= remaining`). Callers that take user input go through
//! `try_settle_sale`, which validates first.

use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::transactions_errors::TransactionError;
use super::transactions_model::{
    weighted_average_annual_return, weighted_average_sell_price, NewBuyTransaction, SellRequest,
    Transaction,
};
use crate::constants::DAYS_PER_YEAR;
use crate::errors::Result;
use crate::fees::{buy_fee, proportional_buy_fee, sell_fee};
use crate::settings::AccountSettings;

/// Creates a pure buy lot with the buy fee fixed from the account's schedule.
pub fn create_buy_transaction(
    new_buy: &NewBuyTransaction,
    settings: &AccountSettings,
) -> Result<Transaction> {
    new_buy.validate()?;

    Ok(Transaction {
        id: Uuid::new_v4().to_string(),
        buy_date: new_buy.buy_date,
        buy_quantity: new_buy.buy_quantity,
        buy_price: new_buy.buy_price,
        buy_fee: Some(buy_fee(new_buy.buy_quantity, settings)),
        sell_date: None,
        sell_quantity: None,
        sell_price: None,
        sell_fee: None,
        profit: None,
        annual_return: None,
        created_at: Utc::now(),
        parent_id: None,
        children: Vec::new(),
    })
}

/// Checks a sell request against the lot it targets.
///
/// Rejects non-positive quantity or price, and any quantity above the open
/// remainder (which covers selling an already closed lot).
pub fn validate_sale(lot: &Transaction, request: &SellRequest) -> Result<()> {
    request.validate()?;

    let remaining = lot.remaining_quantity();
    if request.sell_quantity > remaining {
        return Err(TransactionError::InvalidSaleQuantity {
            transaction_id: lot.id.clone(),
            requested: request.sell_quantity,
            remaining,
        }
        .into());
    }
    Ok(())
}

/// Validates the request, then settles it.
pub fn try_settle_sale(
    lot: &Transaction,
    request: &SellRequest,
    settings: &AccountSettings,
) -> Result<Transaction> {
    validate_sale(lot, request)?;
    Ok(settle_sale(lot, request, settings))
}

/// Applies one sale to a lot and returns the updated lot.
///
/// A first sale that takes the whole lot is written straight into the lot's
/// sell fields. Every other sale becomes a child record, and the parent's
/// cumulative quantity, fee and profit are advanced while its sell price is
/// re-averaged over all children.
///
/// The sale that closes a lot takes whatever part of the buy fee the earlier
/// sales did not, so the slices always add up to the lot's fee exactly.
pub fn settle_sale(
    lot: &Transaction,
    request: &SellRequest,
    settings: &AccountSettings,
) -> Transaction {
    let quantity = request.sell_quantity;

    let slice_sell_fee = sell_fee(quantity, settings);
    let buy_portion_cost = lot.buy_price * quantity;
    let prior_sold = lot.sold_quantity();
    let closes_lot = prior_sold + quantity == lot.buy_quantity;
    let buy_portion_fee = if closes_lot {
        lot.buy_fee_or_zero() - attributed_buy_fee(lot)
    } else {
        proportional_buy_fee(lot.buy_fee_or_zero(), quantity, lot.buy_quantity)
    };
    let sell_revenue = request.sell_price * quantity;
    let profit = sell_revenue - slice_sell_fee - buy_portion_cost - buy_portion_fee;
    let annual_return = annualized_return(
        profit,
        buy_portion_cost + buy_portion_fee,
        lot.buy_date,
        request.sell_date,
    );

    let mut updated = lot.clone();

    if prior_sold.is_zero() && quantity == lot.buy_quantity {
        debug!(
            "Closing transaction {} in a single sale of {} @ {}",
            lot.id, quantity, request.sell_price
        );
        updated.sell_date = Some(request.sell_date);
        updated.sell_quantity = Some(lot.buy_quantity);
        updated.sell_price = Some(request.sell_price);
        updated.sell_fee = Some(slice_sell_fee);
        updated.profit = Some(profit);
        updated.annual_return = Some(annual_return);
        return updated;
    }

    let child = Transaction {
        id: Uuid::new_v4().to_string(),
        buy_date: lot.buy_date,
        buy_quantity: quantity,
        buy_price: lot.buy_price,
        buy_fee: Some(buy_portion_fee),
        sell_date: Some(request.sell_date),
        sell_quantity: Some(quantity),
        sell_price: Some(request.sell_price),
        sell_fee: Some(slice_sell_fee),
        profit: Some(profit),
        annual_return: Some(annual_return),
        created_at: Utc::now(),
        parent_id: None,
        children: Vec::new(),
    };
    debug!(
        "Recording partial sale {} of {} @ {} against transaction {} (previously sold {})",
        child.id, quantity, request.sell_price, lot.id, prior_sold
    );
    updated.children.push(child);

    updated.sell_quantity = Some(prior_sold + quantity);
    updated.sell_fee = Some(lot.sell_fee.unwrap_or(Decimal::ZERO) + slice_sell_fee);
    updated.profit = Some(lot.profit.unwrap_or(Decimal::ZERO) + profit);
    updated.sell_price = weighted_average_sell_price(&updated.children);
    updated.annual_return = weighted_average_annual_return(&updated.children);

    if closes_lot {
        updated.sell_date = Some(request.sell_date);
    }

    updated
}

/// Part of the lot's buy fee already carried by earlier sales.
fn attributed_buy_fee(lot: &Transaction) -> Decimal {
    if lot.children.is_empty() {
        proportional_buy_fee(lot.buy_fee_or_zero(), lot.sold_quantity(), lot.buy_quantity)
    } else {
        lot.children.iter().map(Transaction::buy_fee_or_zero).sum()
    }
}

/// Annualized return in percent: `profit / cost * (365 / days_held) * 100`.
///
/// `days_held` is at least one day, so same-day round trips and sell dates
/// before the buy date do not blow up. A zero cost base yields zero.
pub fn annualized_return(
    profit: Decimal,
    cost_base: Decimal,
    buy_date: NaiveDate,
    sell_date: NaiveDate,
) -> Decimal {
    let days_held = (sell_date - buy_date).num_days().max(1);
    profit
        .checked_div(cost_base)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(DAYS_PER_YEAR)))
        .and_then(|scaled| scaled.checked_div(Decimal::from(days_held)))
        .and_then(|annual| annual.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}
