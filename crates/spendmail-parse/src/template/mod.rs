//! Sender templates: one extraction ruleset per trusted email format.
//!
//! Templates are a closed set of tagged variants sharing one contract: given
//! a subject and body, produce at most one [`TransactionRecord`]. Adding a
//! bank means adding a variant and its module; dispatch, identifiers, and
//! sender mapping all live here so the set stays additive.

pub mod grab;
pub mod vib;

use tracing::debug;

use crate::record::{TransactionRecord, TransactionSource};

/// Currency code shared by every supported template.
pub(crate) const CURRENCY: &str = "VND";

/// A named extraction ruleset for one email sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailTemplate {
    /// VIB bank transaction alerts.
    Vib,
    /// Grab ride-hailing and food-delivery receipts.
    Grab,
}

impl EmailTemplate {
    /// All registered templates.
    pub const ALL: [Self; 2] = [Self::Vib, Self::Grab];

    /// Resolves a template from its identifier, case-insensitively.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "vib" => Some(Self::Vib),
            "grab" => Some(Self::Grab),
            _ => None,
        }
    }

    /// The template's identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Vib => "VIB",
            Self::Grab => "Grab",
        }
    }

    /// The source tag stamped onto records this template produces.
    #[must_use]
    pub const fn source(&self) -> TransactionSource {
        match self {
            Self::Vib => TransactionSource::VibEmail,
            Self::Grab => TransactionSource::GrabEmail,
        }
    }

    /// Sender domains this template accepts mail from.
    #[must_use]
    pub const fn sender_domains(&self) -> &'static [&'static str] {
        match self {
            Self::Vib => vib::SENDER_DOMAINS,
            Self::Grab => grab::SENDER_DOMAINS,
        }
    }

    /// Maps a sender address to the template trusted for it.
    ///
    /// Accepts a bare address or a `Name <address>` form; matching is on the
    /// domain part, including subdomains ("alerts.grab.com").
    #[must_use]
    pub fn for_sender(address: &str) -> Option<Self> {
        let address = address.trim();
        let address = match (address.rfind('<'), address.rfind('>')) {
            (Some(start), Some(end)) if start < end => &address[start + 1..end],
            _ => address,
        };
        let (_, domain) = address.rsplit_once('@')?;
        let domain = domain.trim().to_lowercase();

        Self::ALL.into_iter().find(|template| {
            template
                .sender_domains()
                .iter()
                .any(|d| domain == *d || domain.ends_with(&format!(".{d}")))
        })
    }

    /// Parses one email into a transaction record.
    ///
    /// Returns `None` for anything that is not a completed transaction:
    /// non-matching bodies, pending/scheduled orders, or bodies missing any
    /// of amount, merchant, or timestamp. Never panics on malformed input.
    #[must_use]
    pub fn parse(&self, subject: &str, body: &str) -> Option<TransactionRecord> {
        let record = match self {
            Self::Vib => vib::parse(subject, body),
            Self::Grab => grab::parse(subject, body),
        };
        if record.is_none() {
            debug!("{} email did not yield a completed transaction", self.id());
        }
        record
    }
}

/// Parses one email with the given template.
///
/// Free-function form of [`EmailTemplate::parse`].
///
/// # Example
///
/// ```
/// use spendmail_parse::{EmailTemplate, parse_email};
///
/// let body = "Giá trị: 120,000 VND\nVào lúc: 14:30 08/11/2025\nTại Circle K Nguyen Hue";
/// let record = parse_email(EmailTemplate::Vib, "Thông báo giao dịch", body).unwrap();
/// assert_eq!(record.amount, 120_000);
/// ```
#[must_use]
pub fn parse_email(
    template: EmailTemplate,
    subject: &str,
    body: &str,
) -> Option<TransactionRecord> {
    template.parse(subject, body)
}

/// Strips surrounding whitespace and trailing punctuation from merchant text.
pub(crate) fn clean_merchant(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', ',', ';', ':', '!', '-'])
        .trim()
        .to_string()
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

    #[test]
    fn test_from_id_is_case_insensitive() {
        assert_eq!(EmailTemplate::from_id("VIB"), Some(EmailTemplate::Vib));
        assert_eq!(EmailTemplate::from_id("vib"), Some(EmailTemplate::Vib));
        assert_eq!(EmailTemplate::from_id("Grab"), Some(EmailTemplate::Grab));
        assert_eq!(EmailTemplate::from_id("GRAB"), Some(EmailTemplate::Grab));
        assert_eq!(EmailTemplate::from_id("acb"), None);
    }

    #[test]
    fn test_id_roundtrip() {
        for template in EmailTemplate::ALL {
            assert_eq!(EmailTemplate::from_id(template.id()), Some(template));
        }
    }

    #[test]
    fn test_for_sender_matches_domain() {
        assert_eq!(
            EmailTemplate::for_sender("noreply@vib.com.vn"),
            Some(EmailTemplate::Vib)
        );
        assert_eq!(
            EmailTemplate::for_sender("no-reply@grab.com"),
            Some(EmailTemplate::Grab)
        );
    }

    #[test]
    fn test_for_sender_matches_subdomain_and_display_name() {
        assert_eq!(
            EmailTemplate::for_sender("Grab <receipts@alerts.grab.com>"),
            Some(EmailTemplate::Grab)
        );
        assert_eq!(
            EmailTemplate::for_sender("VIB Bank <alerts@mail.vib.com.vn>"),
            Some(EmailTemplate::Vib)
        );
    }

    #[test]
    fn test_for_sender_rejects_untrusted_and_lookalike() {
        assert_eq!(EmailTemplate::for_sender("spam@example.com"), None);
        // Suffix must be a whole domain label, not a string suffix.
        assert_eq!(EmailTemplate::for_sender("x@notgrab.com"), None);
        assert_eq!(EmailTemplate::for_sender("not-an-address"), None);
    }

    #[test]
    fn test_clean_merchant() {
        assert_eq!(clean_merchant("  Circle K Nguyen Hue.\n"), "Circle K Nguyen Hue");
        assert_eq!(clean_merchant("Bun Cha 34,"), "Bun Cha 34");
        assert_eq!(clean_merchant("   "), "");
    }
}
