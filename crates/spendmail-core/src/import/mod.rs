//! Transaction email import.
//!
//! Wires trusted-sender dispatch, parsing, and dedupe-insert together for a
//! batch of already-fetched messages. Mailbox access itself (IMAP, sender
//! filtering at the wire, rate limiting) stays with the caller.

mod store;
mod sync;

pub use store::{StoreError, TransactionStore, dedupe_key};
pub use sync::{FetchedEmail, ImportSummary, import_emails};
