//! Batch import of fetched transaction emails.

use tracing::{debug, info};

use spendmail_parse::EmailTemplate;

use super::store::{StoreError, TransactionStore, dedupe_key};

/// A raw message handed over by the mailbox client.
#[derive(Debug, Clone)]
pub struct FetchedEmail {
    /// Sender address, bare or in `Name <address>` form.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Outcome counters for one import batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Newly persisted transactions.
    pub imported: usize,
    /// Parsed transactions already present under their dedupe key.
    pub duplicates: usize,
    /// Emails skipped: untrusted sender or not a completed transaction.
    pub skipped: usize,
}

/// Imports a batch of fetched emails into the record store.
///
/// Each email is dispatched by trusted sender to its template and parsed;
/// anything that is not a completed transaction is counted as skipped and
/// never treated as an error. Store failures abort the batch and propagate.
///
/// # Errors
///
/// Returns the first [`StoreError`] raised by the backing store.
pub async fn import_emails<S: TransactionStore>(
    store: &S,
    emails: &[FetchedEmail],
) -> Result<ImportSummary, StoreError> {
    let mut summary = ImportSummary::default();

    for email in emails {
        let Some(template) = EmailTemplate::for_sender(&email.sender) else {
            debug!("Skipping email from untrusted sender {}", email.sender);
            summary.skipped += 1;
            continue;
        };

        let Some(record) = template.parse(&email.subject, &email.body) else {
            summary.skipped += 1;
            continue;
        };

        let key = dedupe_key(&record);
        if store.insert_if_not_exists(&record, &key).await? {
            debug!(
                "Imported {} transaction of {} {}",
                template.id(),
                record.amount,
                record.currency
            );
            summary.imported += 1;
        } else {
            summary.duplicates += 1;
        }
    }

    info!(
        "Import finished: {} imported, {} duplicates, {} skipped",
        summary.imported, summary.duplicates, summary.skipped
    );
    Ok(summary)
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
    use async_trait::async_trait;
    use spendmail_parse::TransactionRecord;
    use std::sync::Mutex;

    /// In-memory store keyed on the dedupe key.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<(String, TransactionRecord)>>,
        fail: bool,
    }

    #[async_trait]
    impl TransactionStore for MemoryStore {
        async fn insert_if_not_exists(
            &self,
            record: &TransactionRecord,
            dedupe_key: &str,
        ) -> Result<bool, StoreError> {
            if self.fail {
                return Err(StoreError::new("connection lost"));
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|(key, _)| key == dedupe_key) {
                return Ok(false);
            }
            rows.push((dedupe_key.to_string(), record.clone()));
            Ok(true)
        }
    }

    fn vib_email() -> FetchedEmail {
        FetchedEmail {
            sender: "VIB <noreply@vib.com.vn>".to_string(),
            subject: "VIB - Thông báo giao dịch thẻ".to_string(),
            body: "Giá trị: 120,000 VND\nVào lúc: 14:30 08/11/2025\nTại Circle K Nguyen Hue"
                .to_string(),
        }
    }

    fn grab_pending_email() -> FetchedEmail {
        FetchedEmail {
            sender: "no-reply@grab.com".to_string(),
            subject: "Your GrabFood order".to_string(),
            body: "Your order is pending confirmation.\nĐặt từ: Bun Cha 34\nTổng cộng: ₫86.000\n08 Nov 25, 12:05"
                .to_string(),
        }
    }

    fn untrusted_email() -> FetchedEmail {
        FetchedEmail {
            sender: "offers@shopnow.example".to_string(),
            subject: "Big sale".to_string(),
            body: "Giá trị: 120,000 VND\nVào lúc: 14:30 08/11/2025\nTại Circle K".to_string(),
        }
    }

    #[tokio::test]
    async fn test_imports_trusted_transaction() {
        let store = MemoryStore::default();
        let summary = import_emails(&store, &[vib_email()]).await.unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                duplicates: 0,
                skipped: 0
            }
        );
        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.amount, 120_000);
    }

    #[tokio::test]
    async fn test_refetched_email_dedupes() {
        let store = MemoryStore::default();
        import_emails(&store, &[vib_email()]).await.unwrap();
        let summary = import_emails(&store, &[vib_email()]).await.unwrap();

        assert_eq!(summary.imported, 0);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_untrusted_sender_is_skipped() {
        let store = MemoryStore::default();
        let summary = import_emails(&store, &[untrusted_email()]).await.unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pending_order_is_skipped_not_error() {
        let store = MemoryStore::default();
        let summary = import_emails(&store, &[grab_pending_email()])
            .await
            .unwrap();

        assert_eq!(summary.skipped, 1);
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let err = import_emails(&store, &[vib_email()]).await.unwrap_err();
        assert!(err.to_string().contains("connection lost"));
    }

    #[tokio::test]
    async fn test_mixed_batch_counts_everything() {
        let store = MemoryStore::default();
        let batch = [
            vib_email(),
            vib_email(),
            grab_pending_email(),
            untrusted_email(),
        ];
        let summary = import_emails(&store, &batch).await.unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                duplicates: 1,
                skipped: 2
            }
        );
    }
}
