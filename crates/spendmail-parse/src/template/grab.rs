//! Grab receipt template.
//!
//! Covers ride-hailing (GrabCar/GrabBike), food delivery (GrabFood), and the
//! other Grab verticals. Receipts are line-oriented, bilingual, and quote
//! totals with the ₫ symbol:
//!
//! ```text
//! Tổng cộng: ₫86.000
//! Đặt từ: Bun Cha 34
//! 08 Nov 25, 12:05
//! ```
//!
//! Emails announcing a pending or scheduled order are not completed
//! transactions and never produce a record, even when every other field
//! would extract.

use std::sync::LazyLock;

use regex::Regex;

use crate::category::map_to_category;
use crate::record::{TransactionRecord, TransactionSource};
use crate::template::{CURRENCY, clean_merchant};
use crate::{datetime, money};

/// Sender domains Grab receipts arrive from.
pub(crate) const SENDER_DOMAINS: &[&str] = &["grab.com"];

#[allow(clippy::unwrap_used)]
static PENDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pending|scheduled|for later|đang chờ|đặt trước|hẹn giờ").unwrap()
});

#[allow(clippy::unwrap_used)]
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Tổng cộng|Total)\s*:?\s*(?:₫|đ|VND)?\s*([0-9][0-9.,]*)").unwrap()
});

#[allow(clippy::unwrap_used)]
static AMOUNT_SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"₫\s*([0-9][0-9.,]*)").unwrap());

#[allow(clippy::unwrap_used)]
static MERCHANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:Đặt từ|Ordered from|From)\b\s*:?\s*([^\r\n]+)").unwrap()
});

/// Parses a Grab receipt.
///
/// Pending/scheduled orders are rejected outright; otherwise all of amount,
/// merchant, and timestamp must extract.
pub(crate) fn parse(subject: &str, body: &str) -> Option<TransactionRecord> {
    if PENDING_RE.is_match(body) {
        return None;
    }

    let amount = AMOUNT_RE
        .captures(body)
        .or_else(|| AMOUNT_SYMBOL_RE.captures(body))
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
        source: TransactionSource::GrabEmail,
    })
}

/// Distinguishes Grab verticals by literal substring checks.
fn classify_type(subject: &str, body: &str) -> String {
    let haystack = format!("{} {}", subject.to_lowercase(), body.to_lowercase());
    let label = if haystack.contains("grabfood") || haystack.contains("grab food") {
        "GrabFood"
    } else if haystack.contains("grabmart") || haystack.contains("grab mart") {
        "GrabMart"
    } else if haystack.contains("grabexpress") || haystack.contains("grab express") {
        "GrabExpress"
    } else if haystack.contains("grabbike") || haystack.contains("grab bike") {
        "GrabBike"
    } else if haystack.contains("grabcar")
        || haystack.contains("grab car")
        || haystack.contains("your ride")
    {
        "GrabCar"
    } else {
        "Grab"
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

    fn food_body() -> String {
        [
            "Cảm ơn bạn đã đặt GrabFood!",
            "Đặt từ: Bun Cha 34",
            "Tổng cộng: ₫86.000",
            "08 Nov 25, 12:05",
        ]
        .join("\n")
    }

    #[test]
    fn test_parses_food_receipt() {
        let record = parse("Biên nhận GrabFood của bạn", &food_body()).unwrap();
        assert_eq!(record.amount, 86_000);
        assert_eq!(record.currency, "VND");
        assert_eq!(record.merchant, "Bun Cha 34");
        assert_eq!(
            record.transaction_date,
            NaiveDate::from_ymd_opt(2025, 11, 8)
                .unwrap()
                .and_hms_opt(12, 5, 0)
                .unwrap()
        );
        assert_eq!(record.transaction_type, "GrabFood");
        assert_eq!(record.category, Category::Food);
        assert_eq!(record.source, TransactionSource::GrabEmail);
    }

    #[test]
    fn test_parses_car_receipt() {
        let body = [
            "Your GrabCar ride receipt",
            "From: Grab",
            "Total: 52,000₫",
            "14:45 21/10/2025",
        ]
        .join("\n");
        let record = parse("Your GrabCar E-Receipt", &body).unwrap();
        assert_eq!(record.amount, 52_000);
        assert_eq!(record.merchant, "Grab");
        assert_eq!(record.transaction_type, "GrabCar");
        assert_eq!(record.category, Category::Transport);
    }

    #[test]
    fn test_mart_order_classifies_transport() {
        let body = [
            "Your GrabMart order has been delivered",
            "Ordered from: WinMart+ Thao Dien",
            "Total: ₫310.000",
            "05/11/2025 18:22",
        ]
        .join("\n");
        let record = parse("Your GrabMart E-Receipt", &body).unwrap();
        assert_eq!(record.transaction_type, "GrabMart");
        // Generic Grab marker outranks the shopping keywords.
        assert_eq!(record.category, Category::Transport);
    }

    #[test]
    fn test_pending_order_rejects() {
        let body = format!("{}\nYour order is pending confirmation.", food_body());
        assert_eq!(parse("Biên nhận GrabFood của bạn", &body), None);
    }

    #[test]
    fn test_scheduled_order_rejects() {
        let body = food_body().replace(
            "Cảm ơn bạn đã đặt GrabFood!",
            "Your GrabFood order is scheduled for later.",
        );
        assert_eq!(parse("GrabFood order confirmation", &body), None);
    }

    #[test]
    fn test_vietnamese_pending_wording_rejects() {
        let body = format!("{}\nĐơn hàng đang chờ xác nhận.", food_body());
        assert_eq!(parse("Biên nhận GrabFood của bạn", &body), None);
    }

    #[test]
    fn test_missing_amount_rejects() {
        let body = "Đặt từ: Bun Cha 34\n08 Nov 25, 12:05";
        assert_eq!(parse("Biên nhận GrabFood của bạn", body), None);
    }

    #[test]
    fn test_missing_merchant_rejects() {
        let body = "Tổng cộng: ₫86.000\n08 Nov 25, 12:05";
        assert_eq!(parse("Biên nhận GrabFood của bạn", body), None);
    }

    #[test]
    fn test_missing_timestamp_rejects() {
        let body = "Đặt từ: Bun Cha 34\nTổng cộng: ₫86.000";
        assert_eq!(parse("Biên nhận GrabFood của bạn", body), None);
    }

    #[test]
    fn test_bike_subject_classifies_bike() {
        let body = [
            "Your ride is complete.",
            "From: Grab",
            "Total: ₫28.000",
            "09:10 03/12/2025",
        ]
        .join("\n");
        let record = parse("Your GrabBike E-Receipt", &body).unwrap();
        assert_eq!(record.transaction_type, "GrabBike");
        assert_eq!(record.category, Category::Transport);
    }

    #[test]
    fn test_amount_symbol_fallback() {
        let body = [
            "Thanh toán thành công ₫45.000",
            "Đặt từ: Phuc Long Coffee",
            "12:00 02/01/2026",
        ]
        .join("\n");
        let record = parse("Grab receipt", &body).unwrap();
        assert_eq!(record.amount, 45_000);
        assert_eq!(record.category, Category::Food);
    }
}
