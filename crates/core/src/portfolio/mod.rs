//! Portfolio module - realized profit and holding rollups.
//!
//! Every function here is pure and recomputes from the lots it is given.
//! Cached snapshots stored on assets are never read back.

mod stats_calculator;
mod stats_model;


pub use stats_calculator::{
    account_stats, asset_annualized_return, asset_stats, average_holding_price,
    holding_quantity, total_stats, transaction_buy_amount, transaction_profit,
};
pub use stats_model::TransactionStats;
