#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::settings::AccountSettings;
    use crate::transactions::{
        annualized_return, create_buy_transaction, settle_sale, try_settle_sale, LotStatus,
        NewBuyTransaction, SellRequest, Transaction, TransactionError,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 0.01 per unit on both sides, no minimum.
    fn cent_per_unit_settings() -> AccountSettings {
        AccountSettings {
            buy_fee_per_unit: dec!(0.01),
            sell_fee_per_unit: dec!(0.01),
            min_buy_fee: Decimal::ZERO,
            min_sell_fee: Decimal::ZERO,
            currency: "$".to_string(),
            expand_sub_transactions: true,
        }
    }

    fn buy(quantity: Decimal, price: Decimal, settings: &AccountSettings) -> Transaction {
        create_buy_transaction(
            &NewBuyTransaction {
                buy_date: date(2024, 1, 2),
                buy_quantity: quantity,
                buy_price: price,
            },
            settings,
        )
        .unwrap()
    }

    fn sell(quantity: Decimal, price: Decimal, on: NaiveDate) -> SellRequest {
        SellRequest {
            sell_date: on,
            sell_quantity: quantity,
            sell_price: price,
        }
    }

    #[test]
    fn test_create_buy_transaction_fixes_buy_fee() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(100), dec!(10), &settings);

        assert_eq!(lot.buy_fee, Some(dec!(1.00)));
        assert_eq!(lot.status(), LotStatus::Open);
        assert_eq!(lot.remaining_quantity(), dec!(100));
        assert!(lot.children.is_empty());
        assert!(lot.sell_quantity.is_none());
    }

    #[test]
    fn test_create_buy_transaction_rejects_non_positive_input() {
        let settings = cent_per_unit_settings();
        let result = create_buy_transaction(
            &NewBuyTransaction {
                buy_date: date(2024, 1, 2),
                buy_quantity: Decimal::ZERO,
                buy_price: dec!(10),
            },
            &settings,
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NonPositive { .. }))
        ));

        let result = create_buy_transaction(
            &NewBuyTransaction {
                buy_date: date(2024, 1, 2),
                buy_quantity: dec!(1),
                buy_price: dec!(-3),
            },
            &settings,
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NonPositive { .. }))
        ));
    }

    #[test]
    fn test_single_full_sale_updates_lot_directly() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(100), dec!(10), &settings);

        let sold = settle_sale(&lot, &sell(dec!(100), dec!(12), date(2024, 6, 1)), &settings);

        assert_eq!(sold.sell_quantity, Some(dec!(100)));
        assert_eq!(sold.sell_price, Some(dec!(12)));
        assert_eq!(sold.sell_fee, Some(dec!(1.00)));
        // 1200 - 1 - 1000 - 1
        assert_eq!(sold.profit, Some(dec!(198)));
        assert_eq!(sold.sell_date, Some(date(2024, 6, 1)));
        assert!(sold.children.is_empty());
        assert_eq!(sold.status(), LotStatus::Closed);
        // Buy side untouched
        assert_eq!(sold.buy_fee, lot.buy_fee);
        assert_eq!(sold.buy_quantity, lot.buy_quantity);
        assert_eq!(sold.id, lot.id);
    }

    #[test]
    fn test_two_partial_sales_create_children_and_average_price() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(100), dec!(10), &settings);

        let after_first = settle_sale(&lot, &sell(dec!(40), dec!(12), date(2024, 3, 1)), &settings);
        assert_eq!(after_first.children.len(), 1);
        assert_eq!(after_first.status(), LotStatus::PartiallyClosed);
        assert_eq!(after_first.sell_date, None);

        let first_child = &after_first.children[0];
        assert_eq!(first_child.buy_quantity, dec!(40));
        assert_eq!(first_child.buy_price, dec!(10));
        assert_eq!(first_child.buy_fee, Some(dec!(0.4)));
        assert_eq!(first_child.sell_fee, Some(dec!(0.40)));
        // 480 - 0.4 - 400 - 0.4
        assert_eq!(first_child.profit, Some(dec!(79.2)));
        assert!(first_child.children.is_empty());

        let closed = settle_sale(
            &after_first,
            &sell(dec!(60), dec!(13), date(2024, 4, 1)),
            &settings,
        );
        assert_eq!(closed.children.len(), 2);
        assert_eq!(closed.sell_quantity, Some(dec!(100)));
        assert_eq!(closed.sell_price, Some(dec!(12.6)));
        assert_eq!(closed.sell_fee, Some(dec!(1.00)));
        // 79.2 + (780 - 0.6 - 600 - 0.6)
        assert_eq!(closed.children[1].profit, Some(dec!(178.8)));
        assert_eq!(closed.profit, Some(dec!(258.0)));
        assert_eq!(closed.remaining_quantity(), Decimal::ZERO);
        assert_eq!(closed.sell_date, Some(date(2024, 4, 1)));
        assert_eq!(closed.status(), LotStatus::Closed);
        // Buy fee is never recomputed
        assert_eq!(closed.buy_fee, Some(dec!(1.00)));
    }

    #[test]
    fn test_partial_sale_leaves_lot_open_for_remainder() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(50), dec!(20), &settings);

        let partial = settle_sale(&lot, &sell(dec!(10), dec!(25), date(2024, 2, 1)), &settings);

        assert_eq!(partial.children.len(), 1);
        assert_eq!(partial.children[0].buy_quantity, dec!(10));
        assert_eq!(partial.sell_quantity, Some(dec!(10)));
        assert_eq!(partial.remaining_quantity(), dec!(40));
        assert_eq!(partial.sell_price, Some(dec!(25)));
        // 250 - 0.1 - 200 - 0.1
        assert_eq!(partial.profit, Some(dec!(49.8)));
        assert_eq!(partial.status(), LotStatus::PartiallyClosed);
    }

    #[test]
    fn test_sale_of_whole_remainder_after_history_still_creates_child() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(10), dec!(5), &settings);

        let first = settle_sale(&lot, &sell(dec!(4), dec!(6), date(2024, 2, 1)), &settings);
        let second = settle_sale(&first, &sell(dec!(6), dec!(6), date(2024, 2, 2)), &settings);

        assert_eq!(second.children.len(), 2);
        assert!(second.is_closed());
        assert_eq!(second.sell_price, Some(dec!(6)));
    }

    #[test]
    fn test_remaining_quantity_never_increases() {
        let settings = cent_per_unit_settings();
        let mut lot = buy(dec!(9), dec!(3), &settings);
        let mut previous = lot.remaining_quantity();

        for (i, quantity) in [dec!(2), dec!(3), dec!(1.5), dec!(2.5)].iter().enumerate() {
            lot = try_settle_sale(
                &lot,
                &sell(*quantity, dec!(4), date(2024, 5, 1 + i as u32)),
                &settings,
            )
            .unwrap();
            let remaining = lot.remaining_quantity();
            assert!(remaining <= previous);
            assert!(remaining >= Decimal::ZERO);
            previous = remaining;
        }
        assert!(lot.is_closed());
        assert_eq!(lot.children.len(), 4);
    }

    #[test]
    fn test_oversell_is_rejected_without_mutation() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(50), dec!(20), &settings);
        let partial = settle_sale(&lot, &sell(dec!(10), dec!(25), date(2024, 2, 1)), &settings);

        let result = try_settle_sale(&partial, &sell(dec!(41), dec!(25), date(2024, 2, 2)), &settings);
        match result {
            Err(Error::Transaction(TransactionError::InvalidSaleQuantity {
                transaction_id,
                requested,
                remaining,
            })) => {
                assert_eq!(transaction_id, partial.id);
                assert_eq!(requested, dec!(41));
                assert_eq!(remaining, dec!(40));
            }
            other => panic!("expected InvalidSaleQuantity, got {:?}", other),
        }
        assert_eq!(partial.children.len(), 1);
    }

    #[test]
    fn test_selling_closed_lot_is_rejected() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(5), dec!(20), &settings);
        let closed = settle_sale(&lot, &sell(dec!(5), dec!(21), date(2024, 2, 1)), &settings);

        let result = try_settle_sale(&closed, &sell(dec!(1), dec!(21), date(2024, 2, 2)), &settings);
        assert!(matches!(
            result,
            Err(Error::Transaction(TransactionError::InvalidSaleQuantity { .. }))
        ));
    }

    #[test]
    fn test_non_positive_sell_price_is_rejected() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(5), dec!(20), &settings);

        let result = try_settle_sale(&lot, &sell(dec!(1), Decimal::ZERO, date(2024, 2, 1)), &settings);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::NonPositive { .. }))
        ));
    }

    #[test]
    fn test_minimum_sell_fee_applies_to_each_partial_sale() {
        let settings = AccountSettings {
            buy_fee_per_unit: Decimal::ZERO,
            sell_fee_per_unit: dec!(4),
            min_buy_fee: Decimal::ZERO,
            min_sell_fee: dec!(4),
            currency: "¥".to_string(),
            expand_sub_transactions: true,
        };
        let lot = buy(dec!(2), dec!(450), &settings);

        let first = settle_sale(&lot, &sell(dec!(0.5), dec!(470), date(2024, 2, 1)), &settings);
        let second = settle_sale(&first, &sell(dec!(0.5), dec!(480), date(2024, 2, 2)), &settings);

        assert_eq!(second.sell_fee, Some(dec!(8)));
        // (235 - 4 - 225) + (240 - 4 - 225)
        assert_eq!(second.profit, Some(dec!(17.0)));
        assert_eq!(second.remaining_quantity(), dec!(1));
    }

    #[test]
    fn test_annualized_return_over_one_year() {
        let result = annualized_return(dec!(100), dec!(1000), date(2023, 1, 1), date(2024, 1, 1));
        assert_eq!(result, dec!(10));
    }

    #[test]
    fn test_annualized_return_counts_at_least_one_day() {
        let same_day = annualized_return(dec!(100), dec!(1000), date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(same_day, dec!(3650));

        let backwards = annualized_return(dec!(100), dec!(1000), date(2024, 1, 5), date(2024, 1, 1));
        assert_eq!(backwards, dec!(3650));
    }

    #[test]
    fn test_annualized_return_zero_cost_base_is_zero() {
        let result = annualized_return(dec!(5), Decimal::ZERO, date(2024, 1, 1), date(2024, 2, 1));
        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn test_settled_sale_records_annual_return() {
        let settings = AccountSettings::fee_free("$");
        let lot = create_buy_transaction(
            &NewBuyTransaction {
                buy_date: date(2023, 1, 1),
                buy_quantity: dec!(10),
                buy_price: dec!(100),
            },
            &settings,
        )
        .unwrap();

        let sold = settle_sale(&lot, &sell(dec!(10), dec!(110), date(2024, 1, 1)), &settings);
        assert_eq!(sold.annual_return, Some(dec!(10)));
    }

    #[test]
    fn test_closing_sale_takes_remaining_buy_fee() {
        let settings = AccountSettings {
            min_buy_fee: dec!(1),
            ..AccountSettings::fee_free("$")
        };
        let lot = buy(dec!(3), dec!(10), &settings);
        assert_eq!(lot.buy_fee, Some(dec!(1)));

        let first = settle_sale(&lot, &sell(dec!(1), dec!(12), date(2024, 2, 1)), &settings);
        let second = settle_sale(&first, &sell(dec!(1), dec!(12), date(2024, 2, 2)), &settings);
        let closed = settle_sale(&second, &sell(dec!(1), dec!(12), date(2024, 2, 3)), &settings);

        assert_eq!(closed.status(), LotStatus::Closed);
        let shares: Decimal = closed.children.iter().map(Transaction::buy_fee_or_zero).sum();
        assert_eq!(shares, dec!(1));
        assert!(closed.children[2].buy_fee_or_zero() > closed.children[0].buy_fee_or_zero());
        assert_eq!(closed.profit, Some(dec!(5)));
    }

    #[test]
    fn test_closing_sale_after_full_history_keeps_fee_whole() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(7), dec!(10), &settings);

        let first = settle_sale(&lot, &sell(dec!(2), dec!(11), date(2024, 2, 1)), &settings);
        let closed = settle_sale(&first, &sell(dec!(5), dec!(11), date(2024, 2, 2)), &settings);

        let shares: Decimal = closed.children.iter().map(Transaction::buy_fee_or_zero).sum();
        assert_eq!(shares, dec!(0.07));
        assert_eq!(closed.sell_date, Some(date(2024, 2, 2)));
    }

    #[test]
    fn test_create_buy_transaction_rejects_huge_input() {
        let settings = cent_per_unit_settings();
        let result = create_buy_transaction(
            &NewBuyTransaction {
                buy_date: date(2024, 1, 2),
                buy_quantity: dec!(100000000000000000000),
                buy_price: dec!(10000000000),
            },
            &settings,
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_huge_sale_is_rejected_before_settling() {
        let settings = cent_per_unit_settings();
        let lot = buy(dec!(100), dec!(10), &settings);

        let result = try_settle_sale(
            &lot,
            &sell(dec!(10), dec!(100000000000000000000), date(2024, 2, 1)),
            &settings,
        );
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::TooLarge { .. }))
        ));
    }
}
