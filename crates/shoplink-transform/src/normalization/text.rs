//! Text coercion.

use shoplink_model::Scalar;

/// Borrow the text of a raw value; every non-text value gives `None`.
///
/// Trimming and casing are left to the caller because fields differ in what
/// they need (identifiers are only trimmed, labels are also lower-cased).
pub fn normalize_string(value: &Scalar) -> Option<&str> {
    value.as_text()
}

/// Trimmed, lower-cased text; `None` for non-text or blank values.
pub fn normalize_label(value: &Scalar) -> Option<String> {
    let label = normalize_string(value)?.trim().to_lowercase();
    (!label.is_empty()).then_some(label)
}
