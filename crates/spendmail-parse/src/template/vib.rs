//! VIB bank transaction alert template.
//!
//! VIB alert bodies are bilingual line-oriented text. The fields this
//! template anchors on:
//!
//! ```text
//! Giá trị: 120,000 VND
//! Vào lúc: 14:30 08/11/2025
//! Tại Circle K Nguyen Hue
//! ```
//!
//! The date token also circulates in a short `17 Nov 25` layout on some
//! alert variants; both are accepted.

use std::sync::LazyLock;

use regex::Regex;

use crate::category::map_to_category;
use crate::record::{TransactionRecord, TransactionSource};
use crate::template::{CURRENCY, clean_merchant};
use crate::{datetime, money};

/// Sender domains VIB alerts arrive from.
pub(crate) const SENDER_DOMAINS: &[&str] = &["vib.com.vn"];

#[allow(clippy::unwrap_used)]
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Giá trị|Số tiền|Amount)\s*:?\s*([0-9][0-9.,]*)\s*(?:VND|₫|đ)").unwrap()
});

#[allow(clippy::unwrap_used)]
static MERCHANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:Tại|At)\b\s*:?\s*([^\r\n]+)").unwrap());

/// Parses a VIB transaction alert.
///
/// All of amount, merchant, and timestamp must extract; otherwise `None`.
pub(crate) fn parse(subject: &str, body: &str) -> Option<TransactionRecord> {
    let amount = AMOUNT_RE
        .captures(body)
        .and_then(|caps| money::parse_amount(&caps[1]))?;

    let merchant = MERCHANT_RE.captures(body).map(|caps| clean_merchant(&caps[1]))?;
    if merchant.is_empty() {
        return None;
    }

    let transaction_date = datetime::find_datetime(body)?;

    let transaction_type = classify_type(subject, body);
    let category = map_to_category(&transaction_type, &merchant);

    Some(TransactionRecord {
        amount,
        currency: CURRENCY.to_string(),
        merchant,
        transaction_date,
        transaction_type,
        category,
        source: TransactionSource::VibEmail,
    })
}

/// Distinguishes alert sub-kinds by literal substring checks.
fn classify_type(subject: &str, body: &str) -> String {
    let haystack = format!("{} {}", subject.to_lowercase(), body.to_lowercase());
    let label = if haystack.contains("chuyển khoản") || haystack.contains("transfer") {
        "Transfer"
    } else if haystack.contains("rút tiền") || haystack.contains("atm") {
        "ATM Withdrawal"
    } else {
        "Card Payment"
    };
    label.to_string()
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
    use crate::record::{Category, TransactionSource};
    use chrono::NaiveDate;

    const SUBJECT: &str = "VIB - Thông báo giao dịch thẻ";

    fn alert_body() -> String {
        [
            "Quý khách vừa thực hiện giao dịch:",
            "Giá trị: 120,000 VND",
            "Vào lúc: 14:30 08/11/2025",
            "Tại Circle K Nguyen Hue.",
        ]
        .join("\n")
    }

    #[test]
    fn test_parses_full_alert() {
        let record = parse(SUBJECT, &alert_body()).unwrap();
        assert_eq!(record.amount, 120_000);
        assert_eq!(record.currency, "VND");
        assert!(record.merchant.contains("Circle K"));
        assert_eq!(
            record.transaction_date,
            NaiveDate::from_ymd_opt(2025, 11, 8)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
        assert_eq!(record.transaction_type, "Card Payment");
        assert_eq!(record.source, TransactionSource::VibEmail);
    }

    #[test]
    fn test_merchant_drives_category() {
        let record = parse(SUBJECT, &alert_body()).unwrap();
        // "Circle K" matches no keyword; "Card Payment" matches none either.
        assert_eq!(record.category, Category::Other);

        let body = alert_body().replace("Circle K Nguyen Hue", "WinMart Thao Dien");
        let record = parse(SUBJECT, &body).unwrap();
        assert_eq!(record.category, Category::Shopping);
    }

    #[test]
    fn test_english_locale_anchors() {
        let body = [
            "A transaction was made on your card:",
            "Amount: 55,000 VND",
            "At: Highlands Coffee Landmark",
            "17 Nov 25 09:15",
        ]
        .join("\n");
        let record = parse("VIB - Card transaction notice", &body).unwrap();
        assert_eq!(record.amount, 55_000);
        assert_eq!(record.merchant, "Highlands Coffee Landmark");
        assert_eq!(
            record.transaction_date,
            NaiveDate::from_ymd_opt(2025, 11, 17)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap()
        );
        assert_eq!(record.category, Category::Food);
    }

    #[test]
    fn test_transfer_type() {
        let body = [
            "Quý khách vừa thực hiện giao dịch chuyển khoản:",
            "Số tiền: 2.000.000 VND",
            "Vào lúc: 20:01 01/12/2025",
            "Tại VIB Online",
        ]
        .join("\n");
        let record = parse("VIB - Thông báo chuyển khoản", &body).unwrap();
        assert_eq!(record.transaction_type, "Transfer");
        assert_eq!(record.amount, 2_000_000);
    }

    #[test]
    fn test_missing_amount_rejects() {
        let body = "Vào lúc: 14:30 08/11/2025\nTại Circle K Nguyen Hue";
        assert_eq!(parse(SUBJECT, body), None);
    }

    #[test]
    fn test_missing_merchant_rejects() {
        let body = "Giá trị: 120,000 VND\nVào lúc: 14:30 08/11/2025";
        assert_eq!(parse(SUBJECT, body), None);
    }

    #[test]
    fn test_empty_merchant_after_cleanup_rejects() {
        let body = "Giá trị: 120,000 VND\nVào lúc: 14:30 08/11/2025\nTại .";
        assert_eq!(parse(SUBJECT, body), None);
    }

    #[test]
    fn test_missing_date_rejects() {
        let body = "Giá trị: 120,000 VND\nTại Circle K Nguyen Hue";
        assert_eq!(parse(SUBJECT, body), None);
    }

    #[test]
    fn test_zero_amount_rejects() {
        let body = "Giá trị: 0 VND\nVào lúc: 14:30 08/11/2025\nTại Circle K";
        assert_eq!(parse(SUBJECT, body), None);
    }

    #[test]
    fn test_garbage_body_is_none_not_panic() {
        assert_eq!(parse("", ""), None);
        assert_eq!(parse(SUBJECT, "Giá trị: VND Tại"), None);
    }
}
