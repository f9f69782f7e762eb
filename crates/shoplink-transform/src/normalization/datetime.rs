//! Order timestamp normalization.
//!
//! Order exports mix several timestamp layouts. Each accepted layout is tried in
//! a fixed order against the whole (trimmed) input; the first that parses wins.
//! The result is always rendered as `YYYY-MM-DDTHH:MM:00Z`, dropping any
//! seconds, so the canonical form is itself an accepted input and normalization
//! is idempotent.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// Output layout; seconds are always written as `00`.
pub const CANONICAL_LAYOUT: &str = "%Y-%m-%dT%H:%M:00Z";

/// Accepted input layouts, in match order.
pub const INPUT_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%SZ", // 2024-01-05T10:30:15Z
    "%Y-%m-%d %H:%M",     // 2024-01-05 10:30
    "%m/%d/%Y %I:%M %p",  // 01/05/2024 10:30 AM
    "%Y/%m/%dT%H:%MZ",    // 2024/01/05T10:30Z
];

/// Input shape for each entry of [`INPUT_LAYOUTS`], same order.
///
/// chrono's `%Y` also takes short and signed years; these require exactly four
/// unsigned digits.
static LAYOUT_SHAPES: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}T[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}Z$",
        r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2} [0-9]{1,2}:[0-9]{1,2}$",
        r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4} [0-9]{1,2}:[0-9]{1,2} (?i:am|pm)$",
        r"^[0-9]{4}/[0-9]{1,2}/[0-9]{1,2}T[0-9]{1,2}:[0-9]{1,2}Z$",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid timestamp shape"))
});

/// Parse a timestamp using the first matching layout.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    INPUT_LAYOUTS
        .iter()
        .zip(LAYOUT_SHAPES.iter())
        .filter(|(_, shape)| shape.is_match(trimmed))
        .find_map(|(layout, _)| NaiveDateTime::parse_from_str(trimmed, layout).ok())
}

/// Normalize a timestamp to [`CANONICAL_LAYOUT`].
pub fn normalize_timestamp(text: &str) -> Option<String> {
    match parse_timestamp(text) {
        Some(parsed) => Some(parsed.format(CANONICAL_LAYOUT).to_string()),
        None => {
            tracing::trace!(value = %text, "no timestamp layout matched");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_with_seconds_drops_seconds() {
        assert_eq!(
            normalize_timestamp("2024-01-05T10:30:45Z"),
            Some("2024-01-05T10:30:00Z".to_string())
        );
    }

    #[test]
    fn test_space_separated() {
        assert_eq!(
            normalize_timestamp("2024-01-05 10:30"),
            Some("2024-01-05T10:30:00Z".to_string())
        );
    }

    #[test]
    fn test_slash_twelve_hour_clock() {
        assert_eq!(
            normalize_timestamp("01/05/2024 10:30 PM"),
            Some("2024-01-05T22:30:00Z".to_string())
        );
        assert_eq!(
            normalize_timestamp("1/5/2024 12:05 am"),
            Some("2024-01-05T00:05:00Z".to_string())
        );
    }

    #[test]
    fn test_slash_iso_like() {
        assert_eq!(
            normalize_timestamp("2024/01/05T10:30Z"),
            Some("2024-01-05T10:30:00Z".to_string())
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            normalize_timestamp("  2024-01-05 10:30 "),
            Some("2024-01-05T10:30:00Z".to_string())
        );
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let once = normalize_timestamp("01/05/2024 09:15 AM").unwrap();
        assert_eq!(normalize_timestamp(&once), Some(once.clone()));
    }

    #[test]
    fn test_year_needs_four_digits() {
        assert_eq!(normalize_timestamp("01/05/24 10:30 AM"), None);
        assert_eq!(normalize_timestamp("24-01-05 10:30"), None);
        assert_eq!(normalize_timestamp("+2024-01-05 10:30"), None);
        assert_eq!(normalize_timestamp("02024-01-05 10:30"), None);
        assert_eq!(
            normalize_timestamp("0024/01/05T10:30Z"),
            Some("0024-01-05T10:30:00Z".to_string())
        );
    }

    #[test]
    fn test_unmatched_layouts() {
        assert_eq!(normalize_timestamp(""), None);
        assert_eq!(normalize_timestamp("yesterday"), None);
        assert_eq!(normalize_timestamp("2024-01-05"), None);
        assert_eq!(normalize_timestamp("2024-13-05 10:30"), None);
        assert_eq!(normalize_timestamp("2024-01-05 10:30 trailing"), None);
        assert_eq!(normalize_timestamp("01/05/2024 13:30 PM"), None);
    }
}
