//! Numeric reconstruction for the quantity/price/total trio.
//!
//! Orders carry the relation `total = quantity * price`. When exactly one of the
//! three is missing it is derived from the other two. When all three are given
//! and disagree by more than a cent, the total is recalculated.

use shoplink_model::OrderField;

use crate::normalization::round_2dp;
use crate::validator::RejectReason;

/// Largest gap between `quantity * price` and `total` treated as rounding noise.
pub const TOTAL_TOLERANCE: f64 = 0.01 + 1e-9;

/// Cleaned numeric values; `None` means missing or unparseable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericTrio {
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub total: Option<f64>,
}

impl NumericTrio {
    pub fn present_count(&self) -> usize {
        usize::from(self.quantity.is_some())
            + usize::from(self.price.is_some())
            + usize::from(self.total.is_some())
    }
}

/// How the final numbers were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// All three supplied and consistent.
    Supplied,
    /// The named field was missing and derived from the other two.
    Derived(OrderField),
    /// All three supplied, total replaced by `quantity * price`.
    TotalRecalculated,
}

/// Complete, rounded numeric values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconstructed {
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub derivation: Derivation,
}

/// Fill in the missing member of the trio.
///
/// # Errors
///
/// - [`RejectReason::TooFewNumericValues`] when fewer than two values are present
/// - [`RejectReason::DivisionByZero`] when the divisor is zero
/// - [`RejectReason::UnderivableQuantity`] when `total / price` is not whole
pub fn reconstruct(trio: NumericTrio) -> Result<Reconstructed, RejectReason> {
    // Derivations use the rounded price that ends up on the record.
    let price = trio.price.map(round_2dp);
    let (quantity, price, total, derivation) = match (trio.quantity, price, trio.total) {
        (Some(quantity), Some(price), Some(total)) => {
            let expected = round_2dp(quantity as f64 * price);
            if (expected - total).abs() > TOTAL_TOLERANCE {
                (quantity, price, expected, Derivation::TotalRecalculated)
            } else {
                (quantity, price, total, Derivation::Supplied)
            }
        }
        (Some(quantity), Some(price), None) => (
            quantity,
            price,
            quantity as f64 * price,
            Derivation::Derived(OrderField::Total),
        ),
        (Some(quantity), None, Some(total)) => {
            if quantity == 0 {
                return Err(RejectReason::DivisionByZero {
                    divisor: OrderField::Quantity,
                });
            }
            (
                quantity,
                total / quantity as f64,
                total,
                Derivation::Derived(OrderField::Price),
            )
        }
        (None, Some(price), Some(total)) => {
            if price == 0.0 {
                return Err(RejectReason::DivisionByZero {
                    divisor: OrderField::Price,
                });
            }
            let quantity = derive_quantity(total / price)?;
            (
                quantity,
                price,
                total,
                Derivation::Derived(OrderField::Quantity),
            )
        }
        _ => {
            return Err(RejectReason::TooFewNumericValues {
                present: trio.present_count(),
            });
        }
    };
    Ok(Reconstructed {
        quantity,
        price: round_2dp(price),
        total: round_2dp(total),
        derivation,
    })
}

fn derive_quantity(raw: f64) -> Result<i64, RejectReason> {
    let rounded = round_2dp(raw);
    if !rounded.is_finite() || rounded.fract() != 0.0 || rounded >= i64::MAX as f64 {
        return Err(RejectReason::UnderivableQuantity { value: raw });
    }
    Ok(rounded as i64)
}
