#[cfg(test)]
mod tests {
    use crate::accounts::AccountType;
    use crate::fees::{buy_fee, proportional_buy_fee, sell_fee};
    use crate::settings::AccountSettings;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn per_unit_settings(per_unit: Decimal, minimum: Decimal) -> AccountSettings {
        AccountSettings {
            buy_fee_per_unit: per_unit,
            sell_fee_per_unit: per_unit,
            min_buy_fee: minimum,
            min_sell_fee: minimum,
            currency: "$".to_string(),
            expand_sub_transactions: true,
        }
    }

    #[test]
    fn test_buy_fee_above_minimum_uses_per_unit_rate() {
        let settings = per_unit_settings(dec!(0.01), dec!(0.35));
        assert_eq!(buy_fee(dec!(100), &settings), dec!(1.00));
    }

    #[test]
    fn test_buy_fee_below_minimum_uses_minimum() {
        let settings = AccountSettings::defaults_for(AccountType::Stock);
        // 10 * 0.0035 = 0.035 < 0.35
        assert_eq!(buy_fee(dec!(10), &settings), dec!(0.35));
    }

    #[test]
    fn test_sell_fee_gold_is_flat_minimum_for_small_trades() {
        let settings = AccountSettings::defaults_for(AccountType::Gold);
        assert_eq!(sell_fee(dec!(0.5), &settings), dec!(4));
        assert_eq!(sell_fee(dec!(3), &settings), dec!(12));
    }

    #[test]
    fn test_zero_and_negative_quantity_fall_back_to_minimum() {
        let settings = per_unit_settings(dec!(0.01), dec!(0.35));
        assert_eq!(buy_fee(Decimal::ZERO, &settings), dec!(0.35));
        assert_eq!(sell_fee(dec!(-5), &settings), dec!(0.35));
    }

    #[test]
    fn test_zero_minimum_and_zero_quantity_is_free() {
        let settings = AccountSettings::fee_free("$");
        assert_eq!(buy_fee(Decimal::ZERO, &settings), Decimal::ZERO);
    }

    #[test]
    fn test_proportional_buy_fee_full_lot_recovers_whole_fee() {
        assert_eq!(proportional_buy_fee(dec!(1), dec!(100), dec!(100)), dec!(1));
        assert_eq!(proportional_buy_fee(dec!(0.35), dec!(3), dec!(3)), dec!(0.35));
    }

    #[test]
    fn test_proportional_buy_fee_zero_slice_is_zero() {
        assert_eq!(proportional_buy_fee(dec!(1), Decimal::ZERO, dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_proportional_buy_fee_partial_slice() {
        assert_eq!(proportional_buy_fee(dec!(1), dec!(40), dec!(100)), dec!(0.4));
        assert_eq!(proportional_buy_fee(dec!(1), dec!(60), dec!(100)), dec!(0.6));
    }

    #[test]
    fn test_proportional_buy_fee_zero_lot_quantity_degrades_to_zero() {
        assert_eq!(proportional_buy_fee(dec!(1), dec!(5), Decimal::ZERO), Decimal::ZERO);
    }
}
