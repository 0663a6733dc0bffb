//! Parsed transaction model types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Spending category assigned to a parsed transaction.
///
/// A closed set: every transaction maps to exactly one category, with
/// [`Other`](Self::Other) as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Restaurants, cafes, and food delivery.
    Food,
    /// Ride-hailing, taxis, and other transport services.
    Transport,
    /// Marts, retail, and general stores.
    Shopping,
    /// Movies, games, and subscriptions.
    Entertainment,
    /// Utilities, internet, and phone bills.
    Bills,
    /// Hospitals, pharmacies, and clinics.
    Health,
    /// Anything that matched no other category.
    #[default]
    Other,
}

impl Category {
    /// All categories, in classification order.
    pub const ALL: [Self; 7] = [
        Self::Food,
        Self::Transport,
        Self::Shopping,
        Self::Entertainment,
        Self::Bills,
        Self::Health,
        Self::Other,
    ];

    /// Parse from database string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "shopping" => Self::Shopping,
            "entertainment" => Self::Entertainment,
            "bills" => Self::Bills,
            "health" => Self::Health,
            _ => Self::Other,
        }
    }

    /// Convert to database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sender template produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionSource {
    /// VIB bank transaction alert email.
    VibEmail,
    /// Grab receipt email.
    GrabEmail,
}

impl TransactionSource {
    /// Parse from database string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vib_email" => Some(Self::VibEmail),
            "grab_email" => Some(Self::GrabEmail),
            _ => None,
        }
    }

    /// Convert to database string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VibEmail => "vib_email",
            Self::GrabEmail => "grab_email",
        }
    }
}

impl std::fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One expense extracted from a transaction email.
///
/// A record is only ever built once amount, merchant, and timestamp have all
/// been extracted; templates return `None` instead of a partial record. The
/// record is immutable after construction and handed to the persistence
/// layer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Amount in whole Vietnamese Dong. Always positive.
    pub amount: u64,
    /// 3-letter currency code. `"VND"` for all supported templates.
    pub currency: String,
    /// Merchant text, trimmed of whitespace and trailing punctuation.
    pub merchant: String,
    /// Local wall-clock time of the transaction (emails carry no zone).
    pub transaction_date: NaiveDateTime,
    /// Sub-kind label within a template (e.g. "Card Payment", "GrabFood").
    /// Free text, not stable across templates.
    pub transaction_type: String,
    /// Spending category derived from the type and merchant.
    pub category: Category,
    /// Template that produced this record.
    pub source: TransactionSource,
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
    use chrono::NaiveDate;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), category);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("FOOD"), Category::Food);
        assert_eq!(Category::parse("transport"), Category::Transport);
    }

    #[test]
    fn test_category_parse_unknown_falls_back_to_other() {
        assert_eq!(Category::parse("groceries"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
    }

    #[test]
    fn test_source_roundtrip() {
        for source in [TransactionSource::VibEmail, TransactionSource::GrabEmail] {
            assert_eq!(TransactionSource::parse(source.as_str()), Some(source));
        }
        assert_eq!(TransactionSource::parse("sms"), None);
    }

    #[test]
    fn test_record_serde_shape() {
        let record = TransactionRecord {
            amount: 120_000,
            currency: "VND".to_string(),
            merchant: "Circle K Nguyen Hue".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2025, 11, 8)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            transaction_type: "Card Payment".to_string(),
            category: Category::Shopping,
            source: TransactionSource::VibEmail,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["amount"], 120_000);
        assert_eq!(json["currency"], "VND");
        assert_eq!(json["category"], "Shopping");
        assert_eq!(json["source"], "VibEmail");

        let back: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
