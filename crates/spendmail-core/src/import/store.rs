//! Record store seam for parsed transactions.

use async_trait::async_trait;
use spendmail_parse::TransactionRecord;

/// Error surfaced by a backing record store.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    /// Human-readable description from the backing store.
    pub message: String,
}

impl StoreError {
    /// Wraps a store failure description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Default dedupe identity for a parsed transaction.
///
/// Derived from timestamp, merchant, and amount so the same alert fetched
/// twice maps to the same key. Merchant text is lowercased; everything else
/// is already normalized by the parser.
#[must_use]
pub fn dedupe_key(record: &TransactionRecord) -> String {
    format!(
        "{}|{}|{}",
        record.transaction_date.format("%Y-%m-%dT%H:%M:%S"),
        record.merchant.to_lowercase(),
        record.amount
    )
}

/// Backing store able to insert a transaction at most once per dedupe key.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Inserts `record` unless `dedupe_key` was already imported.
    ///
    /// Returns whether a new row was written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing store fails; dedupe hits
    /// are not errors.
    async fn insert_if_not_exists(
        &self,
        record: &TransactionRecord,
        dedupe_key: &str,
    ) -> Result<bool, StoreError>;
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
    use spendmail_parse::{Category, TransactionSource};

    fn record(merchant: &str, amount: u64) -> TransactionRecord {
        TransactionRecord {
            amount,
            currency: "VND".to_string(),
            merchant: merchant.to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2025, 11, 8)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            transaction_type: "Card Payment".to_string(),
            category: Category::Other,
            source: TransactionSource::VibEmail,
        }
    }

    #[test]
    fn test_dedupe_key_is_stable() {
        let a = record("Circle K", 120_000);
        assert_eq!(dedupe_key(&a), dedupe_key(&a.clone()));
        assert_eq!(dedupe_key(&a), "2025-11-08T14:30:00|circle k|120000");
    }

    #[test]
    fn test_dedupe_key_ignores_merchant_case() {
        assert_eq!(
            dedupe_key(&record("CIRCLE K", 120_000)),
            dedupe_key(&record("circle k", 120_000))
        );
    }

    #[test]
    fn test_dedupe_key_separates_distinct_transactions() {
        assert_ne!(
            dedupe_key(&record("Circle K", 120_000)),
            dedupe_key(&record("Circle K", 125_000))
        );
        assert_ne!(
            dedupe_key(&record("Circle K", 120_000)),
            dedupe_key(&record("WinMart", 120_000))
        );
    }
}
