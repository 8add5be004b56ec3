#[cfg(test)]
mod tests {
    use crate::accounts::AccountType;
    use crate::errors::{Error, ValidationError};
    use crate::settings::AccountSettings;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stock_defaults() {
        let settings = AccountSettings::defaults_for(AccountType::Stock);
        assert_eq!(settings.buy_fee_per_unit, dec!(0.0035));
        assert_eq!(settings.sell_fee_per_unit, dec!(0.0035));
        assert_eq!(settings.min_buy_fee, dec!(0.35));
        assert_eq!(settings.min_sell_fee, dec!(0.35));
        assert_eq!(settings.currency, "$");
        assert!(settings.expand_sub_transactions);
    }

    #[test]
    fn test_gold_defaults() {
        let settings = AccountSettings::defaults_for(AccountType::Gold);
        assert_eq!(settings.buy_fee_per_unit, dec!(0));
        assert_eq!(settings.sell_fee_per_unit, dec!(4));
        assert_eq!(settings.min_sell_fee, dec!(4));
        assert_eq!(settings.currency, "¥");
    }

    #[test]
    fn test_validate_rejects_negative_fee() {
        let mut settings = AccountSettings::fee_free("$");
        assert!(settings.validate().is_ok());

        settings.min_sell_fee = dec!(-0.01);
        match settings.validate() {
            Err(Error::Validation(ValidationError::Negative { field, .. })) => {
                assert_eq!(field, "minSellFee");
            }
            other => panic!("expected negative-field error, got {:?}", other),
        }
    }

    #[test]
    fn test_serialization_uses_camel_case_numbers() {
        let settings = AccountSettings::defaults_for(AccountType::Stock);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["buyFeePerUnit"], serde_json::json!(0.0035));
        assert_eq!(json["minSellFee"], serde_json::json!(0.35));
        assert_eq!(json["expandSubTransactions"], serde_json::json!(true));
    }

    #[test]
    fn test_missing_expand_flag_defaults_to_true() {
        let json = r#"{"buyFeePerUnit":0,"sellFeePerUnit":4,"minBuyFee":0,"minSellFee":4,"currency":"¥"}"#;
        let settings: AccountSettings = serde_json::from_str(json).unwrap();
        assert!(settings.expand_sub_transactions);
        assert_eq!(settings.sell_fee_per_unit, dec!(4));
    }
}
