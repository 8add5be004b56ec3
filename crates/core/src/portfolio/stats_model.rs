use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Cost, realized profit and return of a set of lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    /// Cost basis of every lot bought, excluding fees.
    pub total_cost: Decimal,
    /// Realized profit net of buy and sell fees.
    pub total_profit: Decimal,
    /// `total_profit / total_cost * 100`, zero when nothing was bought.
    pub total_return: Decimal,
}

impl TransactionStats {
    pub fn from_totals(total_cost: Decimal, total_profit: Decimal) -> Self {
        let total_return = if total_cost > Decimal::ZERO {
            total_profit
                .checked_div(total_cost)
                .and_then(|ratio| ratio.checked_mul(dec!(100)))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        TransactionStats {
            total_cost,
            total_profit,
            total_return,
        }
    }

    /// Sums cost and profit, then derives the return from the sums.
    pub fn combine<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = TransactionStats>,
    {
        let (cost, profit) = parts
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(cost, profit), stats| {
                (cost + stats.total_cost, profit + stats.total_profit)
            });
        TransactionStats::from_totals(cost, profit)
    }
}
