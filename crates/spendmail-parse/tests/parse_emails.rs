//! End-to-end parsing tests over realistic email fixtures.

#![allow(clippy::unwrap_used)]

use chrono::{Datelike, NaiveDate};
use spendmail_parse::{Category, EmailTemplate, TransactionSource, parse_email};

const VIB_SUBJECT: &str = "VIB - Thông báo giao dịch thẻ";

const VIB_CARD_BODY: &str = "\
Kính gửi Quý khách,

Ngân hàng Quốc Tế (VIB) thông báo thẻ của Quý khách vừa phát sinh giao dịch:

Loại giao dịch: Thanh toán thẻ / Card payment
Giá trị: 120,000 VND
Vào lúc: 14:30 08/11/2025
Tại Circle K Nguyen Hue

Nếu Quý khách không thực hiện giao dịch này, vui lòng liên hệ hotline.
";

const GRAB_FOOD_SUBJECT: &str = "Your GrabFood order with Bun Cha 34";

const GRAB_FOOD_BODY: &str = "\
Cảm ơn bạn đã sử dụng GrabFood!

Chi tiết đơn hàng / Order details
Đặt từ: Bun Cha 34
Phí giao hàng: ₫15.000
Tổng cộng: ₫86.000

08 Nov 25, 12:05
Mã đơn hàng: GF-552901
";

#[test]
fn vib_card_payment_parses_to_full_record() {
    let record = parse_email(EmailTemplate::Vib, VIB_SUBJECT, VIB_CARD_BODY).unwrap();

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
fn grab_food_receipt_parses_and_classifies_food() {
    let record = parse_email(EmailTemplate::Grab, GRAB_FOOD_SUBJECT, GRAB_FOOD_BODY).unwrap();

    assert_eq!(record.amount, 86_000);
    assert_eq!(record.merchant, "Bun Cha 34");
    assert_eq!(record.transaction_type, "GrabFood");
    assert_eq!(record.category, Category::Food);
    assert_eq!(record.source, TransactionSource::GrabEmail);
    assert_eq!(
        record.transaction_date,
        NaiveDate::from_ymd_opt(2025, 11, 8)
            .unwrap()
            .and_hms_opt(12, 5, 0)
            .unwrap()
    );
}

#[test]
fn grab_pending_order_is_not_a_transaction() {
    let body = GRAB_FOOD_BODY.replace(
        "Cảm ơn bạn đã sử dụng GrabFood!",
        "Your GrabFood order is pending confirmation.",
    );
    assert!(parse_email(EmailTemplate::Grab, GRAB_FOOD_SUBJECT, &body).is_none());
}

#[test]
fn template_dispatch_by_identifier() {
    let template = EmailTemplate::from_id("VIB").unwrap();
    let record = template.parse(VIB_SUBJECT, VIB_CARD_BODY).unwrap();
    assert_eq!(record.source, TransactionSource::VibEmail);

    let template = EmailTemplate::from_id("grab").unwrap();
    let record = template.parse(GRAB_FOOD_SUBJECT, GRAB_FOOD_BODY).unwrap();
    assert_eq!(record.source, TransactionSource::GrabEmail);
}

#[test]
fn wrong_template_for_body_declines() {
    // A Grab receipt fed through the VIB template has no VIB anchors.
    assert!(parse_email(EmailTemplate::Vib, GRAB_FOOD_SUBJECT, GRAB_FOOD_BODY).is_none());
}

#[test]
fn body_without_amount_anchor_declines() {
    let body = VIB_CARD_BODY.replace("Giá trị: 120,000 VND\n", "");
    assert!(parse_email(EmailTemplate::Vib, VIB_SUBJECT, &body).is_none());
}

#[test]
fn two_digit_year_resolves_to_current_century() {
    let body = "\
Amount: 45,000 VND
At: Pho Thin Lo Duc
17 Nov 25 19:40
";
    let record = parse_email(EmailTemplate::Vib, "VIB - Card transaction notice", body).unwrap();
    assert_eq!(record.transaction_date.date().year_ce(), (true, 2025));
    assert_eq!(
        record.transaction_date,
        NaiveDate::from_ymd_opt(2025, 11, 17)
            .unwrap()
            .and_hms_opt(19, 40, 0)
            .unwrap()
    );
}

#[test]
fn parser_never_panics_on_junk() {
    for template in EmailTemplate::ALL {
        assert!(template.parse("", "").is_none());
        assert!(template.parse("☂☂☂", "\0\0::\n\n₫").is_none());
        assert!(
            template
                .parse("subject", &"Giá trị: ".repeat(1000))
                .is_none()
        );
    }
}
