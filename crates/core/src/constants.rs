use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Days used to annualize a holding period.
pub const DAYS_PER_YEAR: i64 = 365;

/// Largest quantity accepted for a single lot or sale.
pub const MAX_QUANTITY: Decimal = dec!(1000000000);

/// Largest unit price, per-unit fee rate or minimum fee accepted.
pub const MAX_PRICE: Decimal = dec!(1000000000);

/// Largest magnitude accepted for a stored fee or profit.
///
/// With the quantity and price caps a single lot stays below 1e18, so
/// rollups over any realistic number of lots cannot overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000000000);
