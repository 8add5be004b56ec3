use rust_decimal::Decimal;

use crate::settings::AccountSettings;

/// Fee charged when buying `quantity` units: `max(quantity * per_unit, minimum)`.
///
/// Zero or negative quantities are not rejected here; they simply fall back
/// to the minimum fee.
pub fn buy_fee(quantity: Decimal, settings: &AccountSettings) -> Decimal {
    (quantity * settings.buy_fee_per_unit).max(settings.min_buy_fee)
}

/// Fee charged when selling `quantity` units: `max(quantity * per_unit, minimum)`.
pub fn sell_fee(quantity: Decimal, settings: &AccountSettings) -> Decimal {
    (quantity * settings.sell_fee_per_unit).max(settings.min_sell_fee)
}

/// Share of a lot's buy fee carried by a slice of `sell_quantity` units.
///
/// The buy fee is paid once for the whole lot, so each partial sale takes
/// `original_buy_fee * sell_quantity / original_buy_quantity` of it. Summed
/// over slices that cover the whole lot this gives back the original fee.
/// A zero lot quantity yields zero instead of dividing by zero.
pub fn proportional_buy_fee(
    original_buy_fee: Decimal,
    sell_quantity: Decimal,
    original_buy_quantity: Decimal,
) -> Decimal {
    sell_quantity
        .checked_div(original_buy_quantity)
        .map(|ratio| original_buy_fee * ratio)
        .unwrap_or(Decimal::ZERO)
}
