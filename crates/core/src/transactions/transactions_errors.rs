use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a buy or sell cannot be applied to a lot.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Cannot sell {requested} units of transaction {transaction_id}: only {remaining} remain open")]
    InvalidSaleQuantity {
        transaction_id: String,
        requested: Decimal,
        remaining: Decimal,
    },

    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Transaction {0} is a partial-sale record and cannot be modified directly")]
    ChildTransaction(String),
}

impl From<TransactionError> for String {
    fn from(error: TransactionError) -> Self {
        error.to_string()
    }
}
