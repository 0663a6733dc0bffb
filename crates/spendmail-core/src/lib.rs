//! # spendmail-core
//!
//! Core services for `SpendMail` expense tracking.
//!
//! This crate provides:
//! - Configuration from the environment, including the credential-cipher
//!   passphrase
//! - Mail sync settings with the app password encrypted at rest
//! - The record-store seam and batch import service that turn fetched
//!   transaction emails into persisted expense records
//!
//! Parsing lives in [`spendmail_parse`], encryption in [`spendmail_crypto`];
//! this crate wires them to the outside world. The mailbox client and the
//! actual database are the caller's: they plug in through
//! [`FetchedEmail`] batches and the [`TransactionStore`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod import;
pub mod settings;

pub use config::{Config, SECRET_KEY_VAR};
pub use error::{Error, Result};
pub use import::{
    FetchedEmail, ImportSummary, StoreError, TransactionStore, dedupe_key, import_emails,
};
pub use settings::{DEFAULT_IMAP_PORT, MailSettings};
