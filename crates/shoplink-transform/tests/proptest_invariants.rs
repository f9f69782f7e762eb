//! Property tests for numeric reconstruction and timestamp normalization.

use proptest::prelude::*;
use shoplink_model::OrderField;
use shoplink_transform::normalization::normalize_timestamp;
use shoplink_transform::{Derivation, NumericTrio, RejectReason, TOTAL_TOLERANCE, reconstruct};

fn cents() -> impl Strategy<Value = f64> {
    (1u32..=100_000).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Prices with up to three decimals, so rounding to cents is exercised.
fn mills() -> impl Strategy<Value = f64> {
    (10u32..=1_000_000).prop_map(|mills| f64::from(mills) / 1000.0)
}

fn to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn assert_within(quantity: i64, price: f64, total: f64, slack: f64) -> Result<(), TestCaseError> {
    prop_assert!(
        (quantity as f64 * price - total).abs() <= slack,
        "{quantity} * {price} != {total}"
    );
    Ok(())
}

proptest! {
    #[test]
    fn missing_total_is_product(quantity in 1i64..1_000, price in mills()) {
        let result = reconstruct(NumericTrio { quantity: Some(quantity), price: Some(price), total: None })
            .unwrap();
        prop_assert_eq!(result.derivation, Derivation::Derived(OrderField::Total));
        prop_assert_eq!(result.price, to_cents(price));
        assert_within(result.quantity, result.price, result.total, TOTAL_TOLERANCE)?;
    }

    #[test]
    fn missing_price_is_quotient(quantity in 1i64..1_000, price in cents()) {
        let total = to_cents(quantity as f64 * price);
        let result = reconstruct(NumericTrio { quantity: Some(quantity), price: None, total: Some(total) })
            .unwrap();
        prop_assert_eq!(result.quantity, quantity);
        // Rounding the derived price may move the product by half a cent per unit.
        let slack = TOTAL_TOLERANCE.max(quantity as f64 * 0.005 + 1e-9);
        assert_within(result.quantity, result.price, result.total, slack)?;
    }

    #[test]
    fn missing_quantity_with_fine_price(quantity in 1i64..1_000, price in mills()) {
        let total = to_cents(quantity as f64 * to_cents(price));
        let result = reconstruct(NumericTrio { quantity: None, price: Some(price), total: Some(total) })
            .unwrap();
        prop_assert_eq!(result.quantity, quantity);
        assert_within(result.quantity, result.price, result.total, TOTAL_TOLERANCE)?;
    }

    #[test]
    fn missing_quantity_is_recovered(quantity in 1i64..1_000, price in cents()) {
        let total = to_cents(quantity as f64 * price);
        let result = reconstruct(NumericTrio { quantity: None, price: Some(price), total: Some(total) })
            .unwrap();
        prop_assert_eq!(result.quantity, quantity);
        assert_within(result.quantity, result.price, result.total, TOTAL_TOLERANCE)?;
    }

    #[test]
    fn zero_divisor_never_panics(total in 0.0f64..10_000.0) {
        let by_price = reconstruct(NumericTrio { quantity: None, price: Some(0.0), total: Some(total) });
        prop_assert_eq!(by_price, Err(RejectReason::DivisionByZero { divisor: OrderField::Price }));
        let by_quantity = reconstruct(NumericTrio { quantity: Some(0), price: None, total: Some(total) });
        prop_assert_eq!(by_quantity, Err(RejectReason::DivisionByZero { divisor: OrderField::Quantity }));
    }

    #[test]
    fn timestamp_normalization_is_idempotent(
        year in 1970i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
        layout in 0usize..4,
    ) {
        let (hour12, meridiem) = match hour {
            0 => (12, "AM"),
            1..=11 => (hour, "AM"),
            12 => (12, "PM"),
            _ => (hour - 12, "PM"),
        };
        let input = match layout {
            0 => format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:17Z"),
            1 => format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"),
            2 => format!("{month:02}/{day:02}/{year:04} {hour12:02}:{minute:02} {meridiem}"),
            _ => format!("{year:04}/{month:02}/{day:02}T{hour:02}:{minute:02}Z"),
        };
        let once = normalize_timestamp(&input).unwrap();
        prop_assert_eq!(
            &once,
            &format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:00Z")
        );
        prop_assert_eq!(normalize_timestamp(&once), Some(once.clone()));
    }
}
