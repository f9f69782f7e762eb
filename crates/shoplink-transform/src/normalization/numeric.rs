//! Numeric coercion for quantity, price and total.
//!
//! Text values are reduced to their ASCII digits and decimal points before
//! parsing, so `"$1,234.50"` becomes `1234.5`. Signs and exponents are stripped
//! along with everything else, which means negative text values cannot survive
//! cleaning.

use shoplink_model::Scalar;

/// Keep only ASCII digits and `.` from a text value.
pub fn strip_to_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Coerce a raw value to a float.
///
/// - Integers and finite floats are returned as floats
/// - Text is stripped with [`strip_to_numeric`] and parsed
/// - Booleans, nulls, composites and unparseable text give `None`
pub fn clean_float(value: &Scalar) -> Option<f64> {
    let cleaned = match value {
        Scalar::Int(int) => Some(*int as f64),
        Scalar::Float(float) => Some(*float),
        Scalar::Text(text) => {
            let stripped = strip_to_numeric(text);
            let parsed = stripped.parse::<f64>().ok();
            if parsed.is_none() {
                tracing::trace!(value = %text, "failed to convert text to float");
            }
            parsed
        }
        other => {
            tracing::trace!(kind = other.kind(), "unsupported type for float cleaning");
            None
        }
    };
    cleaned.filter(|float| float.is_finite())
}

/// Coerce a raw value to an integer.
///
/// - Integers are returned unchanged, booleans become 0/1
/// - Finite floats are truncated toward zero when they fit in `i64`
/// - Text is stripped with [`strip_to_numeric`] and must then parse as an
///   integer, so `"3.0"` gives `None`
pub fn clean_int(value: &Scalar) -> Option<i64> {
    match value {
        Scalar::Int(int) => Some(*int),
        Scalar::Bool(flag) => Some(i64::from(*flag)),
        Scalar::Float(float) => float_to_int(*float),
        Scalar::Text(text) => {
            let parsed = strip_to_numeric(text).parse::<i64>().ok();
            if parsed.is_none() {
                tracing::trace!(value = %text, "failed to convert text to int");
            }
            parsed
        }
        other => {
            tracing::trace!(kind = other.kind(), "unsupported type for int cleaning");
            None
        }
    }
}

/// Round half away from zero to 2 decimal places.
///
/// Values too large to scale are already integral and are returned unchanged.
pub fn round_2dp(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}

fn float_to_int(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which itself does not fit.
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_to_numeric() {
        assert_eq!(strip_to_numeric("$1,234.50"), "1234.50");
        assert_eq!(strip_to_numeric("-3 units"), "3");
        assert_eq!(strip_to_numeric("abc"), "");
    }

    #[test]
    fn test_clean_float_numeric_input() {
        assert_eq!(clean_float(&Scalar::Int(4)), Some(4.0));
        assert_eq!(clean_float(&Scalar::Float(2.5)), Some(2.5));
        assert_eq!(clean_float(&Scalar::Float(f64::NAN)), None);
    }

    #[test]
    fn test_clean_float_text() {
        assert_eq!(clean_float(&Scalar::from("2.50")), Some(2.5));
        assert_eq!(clean_float(&Scalar::from(" USD 19.99 ")), Some(19.99));
        assert_eq!(clean_float(&Scalar::from(".5")), Some(0.5));
        assert_eq!(clean_float(&Scalar::from("")), None);
        assert_eq!(clean_float(&Scalar::from("n/a")), None);
        assert_eq!(clean_float(&Scalar::from("1.2.3")), None);
    }

    #[test]
    fn test_clean_float_other_types() {
        assert_eq!(clean_float(&Scalar::Bool(true)), None);
        assert_eq!(clean_float(&Scalar::Null), None);
        assert_eq!(clean_float(&Scalar::Composite("[1]".to_string())), None);
    }

    #[test]
    fn test_clean_int() {
        assert_eq!(clean_int(&Scalar::Int(3)), Some(3));
        assert_eq!(clean_int(&Scalar::Bool(true)), Some(1));
        assert_eq!(clean_int(&Scalar::Bool(false)), Some(0));
        assert_eq!(clean_int(&Scalar::Float(2.9)), Some(2));
        assert_eq!(clean_int(&Scalar::Float(f64::INFINITY)), None);
        assert_eq!(clean_int(&Scalar::Float(1e20)), None);
        assert_eq!(clean_int(&Scalar::from("3 pcs")), Some(3));
        assert_eq!(clean_int(&Scalar::from("3.0")), None);
        assert_eq!(clean_int(&Scalar::from("three")), None);
        assert_eq!(clean_int(&Scalar::Null), None);
    }

    #[test]
    fn test_round_2dp() {
        assert_eq!(round_2dp(2.499), 2.5);
        assert_eq!(round_2dp(7.5), 7.5);
        assert_eq!(round_2dp(0.125), 0.13);
        assert_eq!(round_2dp(1e307), 1e307);
    }
}
