//! # spendmail-parse
//!
//! Transaction email parsing and categorization for `SpendMail`.
//!
//! This crate turns the subject and body of a trusted transaction email
//! (VIB bank alerts, Grab receipts) into at most one structured
//! [`TransactionRecord`]:
//!
//! - **Templates**: a closed set of per-sender extraction rulesets with one
//!   shared contract ([`EmailTemplate`])
//! - **Field extraction**: anchor-phrase matching for amount, merchant, and
//!   timestamp; any missing required field rejects the whole email
//! - **Categorization**: deterministic ordered keyword rules
//!   ([`map_to_category`])
//!
//! Parsing never fails loudly: malformed or non-matching mail yields `None`
//! and the caller simply skips it. Everything here is pure, synchronous, and
//! safe to call concurrently.
//!
//! ## Quick Start
//!
//! ```
//! use spendmail_parse::{Category, EmailTemplate};
//!
//! let body = "Giá trị: 120,000 VND\n\
//!             Vào lúc: 14:30 08/11/2025\n\
//!             Tại Circle K Nguyen Hue";
//!
//! let record = EmailTemplate::Vib
//!     .parse("VIB - Thông báo giao dịch", body)
//!     .unwrap();
//! assert_eq!(record.amount, 120_000);
//! assert_eq!(record.merchant, "Circle K Nguyen Hue");
//!
//! // Pending orders and bodies missing a required field parse to None.
//! assert!(EmailTemplate::Grab.parse("Receipt", "no amounts here").is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod category;
pub mod datetime;
pub mod money;
pub mod record;
pub mod template;

pub use category::map_to_category;
pub use record::{Category, TransactionRecord, TransactionSource};
pub use template::{EmailTemplate, parse_email};
