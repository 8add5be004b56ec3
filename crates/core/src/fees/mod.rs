//! Fees module - buy/sell fee schedule and pro-rata buy-fee attribution.

mod fee_calculator;

#[cfg(test)]
mod fee_calculator_tests;

pub use fee_calculator::{buy_fee, proportional_buy_fee, sell_fee};
