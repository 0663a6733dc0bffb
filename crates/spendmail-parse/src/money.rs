//! Amount token parsing.

/// Parses an amount token into whole Vietnamese Dong.
///
/// Both `,` and `.` appear as thousands separators in the supported emails
/// ("120,000 VND", "120.000₫") and VND has no fractional unit, so every
/// separator is treated as grouping and stripped before parsing.
///
/// Returns `None` for empty input, non-numeric leftovers, zero, or values
/// that overflow `u64`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace([',', '.'], "");
    if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = cleaned.parse::<u64>().ok()?;
    (value > 0).then_some(value)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_comma_grouping() {
        assert_eq!(parse_amount("120,000"), Some(120_000));
        assert_eq!(parse_amount("1,250,000"), Some(1_250_000));
    }

    #[test]
    fn test_period_grouping() {
        assert_eq!(parse_amount("120.000"), Some(120_000));
        assert_eq!(parse_amount("55.000"), Some(55_000));
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_amount("45000"), Some(45_000));
        assert_eq!(parse_amount(" 45000 "), Some(45_000));
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("0,000"), None);
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12a000"), None);
        assert_eq!(parse_amount("-5000"), None);
        assert_eq!(parse_amount(","), None);
    }

    proptest! {
        #[test]
        fn prop_grouped_digits_roundtrip(value in 1u64..1_000_000_000) {
            // Render with comma grouping the way the bank does and parse back.
            let mut rendered = String::new();
            for (i, ch) in value.to_string().chars().rev().enumerate() {
                if i > 0 && i % 3 == 0 {
                    rendered.push(',');
                }
                rendered.push(ch);
            }
            let rendered: String = rendered.chars().rev().collect();
            prop_assert_eq!(parse_amount(&rendered), Some(value));
        }

        #[test]
        fn prop_never_panics(raw in ".*") {
            let _ = parse_amount(&raw);
        }
    }
}
