//! Transactions module - lots, partial-sale records and the settlement engine.

mod settlement;
mod transactions_errors;
mod transactions_model;

#[cfg(test)]
mod settlement_tests;


pub use settlement::{
    annualized_return, create_buy_transaction, settle_sale, try_settle_sale, validate_sale,
};
pub use transactions_errors::TransactionError;
pub use transactions_model::{LotStatus, NewBuyTransaction, SellRequest, Transaction};
