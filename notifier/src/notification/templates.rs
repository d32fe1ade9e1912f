//! Localized title/body copy per payment direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payment::Direction;

/// Language used for notification copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    /// Parse a `NOTIFICATION_LOCALE` value. Only the exact codes are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "hi" => Some(Self::Hindi),
            "en" => Some(Self::English),
            _ => None,
        }
    }

    fn unknown_sender(self) -> &'static str {
        match self {
            Self::Hindi => "अज्ञात",
            Self::English => "someone",
        }
    }
}

/// Render `(title, body)` for a payment.
pub fn render(locale: Locale, direction: Direction, amount: Decimal, sender: &str) -> (String, String) {
    let amount = amount.normalize();
    let sender = match sender.trim() {
        "" => locale.unknown_sender(),
        s => s,
    };

    match (locale, direction) {
        (Locale::Hindi, Direction::Credit) => (
            "💰 पैसे प्राप्त हुए".to_string(),
            format!("{sender} से ₹{amount} प्राप्त हुए"),
        ),
        (Locale::Hindi, Direction::Debit) => (
            "💸 पैसे भेजे गए".to_string(),
            format!("{sender} को ₹{amount} भेजे गए"),
        ),
        (Locale::English, Direction::Credit) => (
            "💰 Payment received".to_string(),
            format!("₹{amount} received from {sender}"),
        ),
        (Locale::English, Direction::Debit) => (
            "💸 Payment sent".to_string(),
            format!("₹{amount} sent to {sender}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hindi_credit_interpolates_amount_and_sender() {
        let (title, body) = render(Locale::Hindi, Direction::Credit, Decimal::from(500), "Ravi");
        assert_eq!(title, "💰 पैसे प्राप्त हुए");
        assert_eq!(body, "Ravi से ₹500 प्राप्त हुए");
    }

    #[test]
    fn english_debit_interpolates_amount_and_sender() {
        let (title, body) =
            render(Locale::English, Direction::Debit, Decimal::new(12050, 2), "Asha");
        assert_eq!(title, "💸 Payment sent");
        assert_eq!(body, "₹120.5 sent to Asha");
    }

    #[test]
    fn blank_sender_uses_placeholder() {
        let (_, body) = render(Locale::Hindi, Direction::Debit, Decimal::from(1), "  ");
        assert_eq!(body, "अज्ञात को ₹1 भेजे गए");
    }

    #[test]
    fn locale_codes_are_exact() {
        assert_eq!(Locale::from_code("en"), Some(Locale::English));
        assert_eq!(Locale::from_code("hi"), Some(Locale::Hindi));
        assert_eq!(Locale::from_code("EN"), None);
        assert_eq!(Locale::from_code("english"), None);
        assert_eq!(Locale::from_code(""), None);
    }
}
