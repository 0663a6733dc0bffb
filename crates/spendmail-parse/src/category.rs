//! Keyword-based spending category classification.
//!
//! Cheap, deterministic substring matching rather than a trained model: the
//! merchant vocabulary coming out of bank and ride-hailing emails is narrow
//! and stable. Rules are evaluated top to bottom and the first match wins,
//! which is load-bearing for overlapping keywords: "GrabFood" must classify
//! as [`Category::Food`] while "GrabMart" still falls to the generic Grab
//! rule and classifies as [`Category::Transport`].

use crate::record::Category;

/// Ordered `(category, keywords)` rules. First rule whose keyword appears in
/// the transaction type or merchant wins.
///
/// The generic "grab" marker sits *below* the food keywords so that food
/// orders placed through ride-hailing apps stay in Food, and *above* the
/// shopping keywords so a "GrabMart" run counts as Transport.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Transport,
        &["grabcar", "grab car", "grabbike", "grab bike", "taxi", "ride"],
    ),
    (Category::Food, &["food", "restaurant", "cafe", "coffee"]),
    (Category::Transport, &["grab"]),
    (Category::Shopping, &["shopping", "mart", "retail", "store"]),
    (Category::Entertainment, &["movie", "game", "subscription"]),
    (Category::Bills, &["bill", "utility", "internet", "phone"]),
    (Category::Health, &["hospital", "pharmacy", "medical", "clinic"]),
];

/// Classifies a transaction from its type label and merchant text.
///
/// Pure and total: same inputs always yield the same category, unknown
/// inputs yield [`Category::Other`], and matching is case-insensitive.
///
/// # Example
///
/// ```
/// use spendmail_parse::{Category, map_to_category};
///
/// assert_eq!(map_to_category("GrabFood", "Bun Cha 34"), Category::Food);
/// assert_eq!(map_to_category("GrabCar", "Grab"), Category::Transport);
/// assert_eq!(map_to_category("Card Payment", "WinMart"), Category::Shopping);
/// ```
#[must_use]
pub fn map_to_category(transaction_type: &str, merchant: &str) -> Category {
    let transaction_type = transaction_type.to_lowercase();
    let merchant = merchant.to_lowercase();

    for (category, keywords) in RULES {
        let matched = keywords
            .iter()
            .any(|kw| transaction_type.contains(kw) || merchant.contains(kw));
        if matched {
            return *category;
        }
    }
    Category::Other
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
    fn test_grab_food_is_food() {
        assert_eq!(map_to_category("GrabFood", "Unknown"), Category::Food);
    }

    #[test]
    fn test_grab_car_is_transport() {
        assert_eq!(map_to_category("GrabCar", "Grab"), Category::Transport);
    }

    #[test]
    fn test_grab_bike_is_transport() {
        assert_eq!(map_to_category("GrabBike", "Grab"), Category::Transport);
    }

    #[test]
    fn test_mart_purchase_is_shopping() {
        assert_eq!(
            map_to_category("Mart Purchase", "Circle K"),
            Category::Shopping
        );
    }

    #[test]
    fn test_grab_mart_wins_transport_over_shopping() {
        // Overlapping keywords: "GrabMart" contains both "grab" and "mart".
        // The generic grab rule sits above the shopping rule.
        assert_eq!(map_to_category("GrabMart", "WinMart"), Category::Transport);
    }

    #[test]
    fn test_unknown_inputs_are_other() {
        assert_eq!(
            map_to_category("Unknown Type", "Unknown Merchant"),
            Category::Other
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(map_to_category("GRABFOOD", "KFC"), Category::Food);
        assert_eq!(map_to_category("taxi", "ABC"), Category::Transport);
        assert_eq!(map_to_category("Card Payment", "PHARMACITY PHARMACY"), Category::Health);
    }

    #[test]
    fn test_merchant_alone_can_classify() {
        assert_eq!(
            map_to_category("Card Payment", "Highlands Coffee"),
            Category::Food
        );
        assert_eq!(
            map_to_category("Card Payment", "FPT Internet"),
            Category::Bills
        );
        assert_eq!(
            map_to_category("Card Payment", "CGV Movie Ticket"),
            Category::Entertainment
        );
    }

    proptest! {
        #[test]
        fn prop_total_and_deterministic(transaction_type in ".*", merchant in ".*") {
            let first = map_to_category(&transaction_type, &merchant);
            let second = map_to_category(&transaction_type, &merchant);
            prop_assert_eq!(first, second);
            prop_assert!(Category::ALL.contains(&first));
        }
    }
}
