use rust_decimal::Decimal;

use super::stats_model::TransactionStats;
use crate::accounts::Account;
use crate::assets::Asset;
use crate::fees::proportional_buy_fee;
use crate::transactions::Transaction;

/// Cost basis of a lot: `buy_quantity * buy_price`, fees excluded.
pub fn transaction_buy_amount(transaction: &Transaction) -> Decimal {
    transaction.buy_quantity * transaction.buy_price
}

/// Realized profit of a lot.
///
/// Zero while nothing is sold. Lots settled by the engine carry an
/// accumulated `profit`, which is authoritative: recomputing from the
/// averaged sell price of a multi-sale lot would lose per-slice precision.
/// Records without it (older imports) fall back to recomputing from the
/// cumulative sell fields.
pub fn transaction_profit(transaction: &Transaction) -> Decimal {
    let sold = transaction.sold_quantity();
    if sold <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if let Some(profit) = transaction.profit {
        return profit;
    }
    let Some(sell_price) = transaction.sell_price else {
        return Decimal::ZERO;
    };

    let sell_revenue = sell_price * sold;
    let sell_fee = transaction.sell_fee.unwrap_or(Decimal::ZERO);
    let buy_portion_cost = transaction.buy_price * sold;
    let buy_portion_fee =
        proportional_buy_fee(transaction.buy_fee_or_zero(), sold, transaction.buy_quantity);

    sell_revenue - sell_fee - buy_portion_cost - buy_portion_fee
}

/// Cost, realized profit and return over an asset's top-level lots.
///
/// Partial-sale records are not summed separately: their profit is already
/// accumulated on the parent lot.
pub fn asset_stats(asset: &Asset) -> TransactionStats {
    let (total_cost, total_profit) = asset.transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(cost, profit), transaction| {
            (
                cost + transaction_buy_amount(transaction),
                profit + transaction_profit(transaction),
            )
        },
    );
    TransactionStats::from_totals(total_cost, total_profit)
}

pub fn account_stats(account: &Account) -> TransactionStats {
    TransactionStats::combine(account.assets.iter().map(asset_stats))
}

pub fn total_stats(accounts: &[Account]) -> TransactionStats {
    TransactionStats::combine(accounts.iter().map(account_stats))
}

/// Units still held across the asset's lots.
pub fn holding_quantity(asset: &Asset) -> Decimal {
    asset
        .transactions
        .iter()
        .map(Transaction::remaining_quantity)
        .sum()
}

/// Average buy price of the units still held, fees excluded.
///
/// Weighted by open quantity only, so sold slices do not skew it. Zero when
/// nothing is held.
pub fn average_holding_price(asset: &Asset) -> Decimal {
    let (holding_cost, holding_quantity) = asset
        .transactions
        .iter()
        .map(|t| (t.buy_price, t.remaining_quantity()))
        .filter(|(_, open)| *open > Decimal::ZERO)
        .fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(cost, quantity), (price, open)| (cost + price * open, quantity + open),
        );
    holding_cost
        .checked_div(holding_quantity)
        .unwrap_or(Decimal::ZERO)
}

/// Annualized return of the asset's realized sales, weighted by sell value.
///
/// Lots whose weighted share would overflow are left out.
pub fn asset_annualized_return(asset: &Asset) -> Decimal {
    let (weighted, total_value) = asset
        .transactions
        .iter()
        .filter_map(|t| {
            let annual = t.annual_return?;
            let value = t.sell_price? * t.sold_quantity();
            Some((annual.checked_mul(value)?, value))
        })
        .fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(weighted, total_value), (part, value)| match weighted.checked_add(part) {
                Some(next) => (next, total_value + value),
                None => (weighted, total_value),
            },
        );
    weighted.checked_div(total_value).unwrap_or(Decimal::ZERO)
}
