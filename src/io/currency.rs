use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use crate::domain::format_amount;

use super::win_ansi;

/// How amounts are labelled in exported reports. Display only; amounts are never converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Currency {
    /// Prefix shown before amounts, e.g. "₹"
    pub symbol: String,
    /// ISO 4217 code, used where the symbol cannot be rendered
    pub code: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            code: "INR".to_string(),
        }
    }
}

impl Currency {
    pub fn new(symbol: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            code: code.into(),
        }
    }

    /// "₹50.00"
    pub fn format(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol, format_amount(amount))
    }

    /// Prefix for documents set in a standard PDF font. Symbols that font
    /// cannot show, such as ₹, fall back to the currency code.
    pub fn document_prefix(&self) -> String {
        if win_ansi::is_encodable(&self.symbol) {
            self.symbol.clone()
        } else {
            format!("{} ", self.code)
        }
    }

    /// "INR 50.00" or "$50.00", for PDF output.
    pub fn format_for_document(&self, amount: Decimal) -> String {
        format!("{}{}", self.document_prefix(), format_amount(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format() {
        let rupee = Currency::default();
        assert_eq!(rupee.format(dec!(50)), "₹50.00");
        assert_eq!(rupee.format(dec!(-12)), "₹-12.00");
        assert_eq!(rupee.format_for_document(dec!(50)), "INR 50.00");

        let dollar = Currency::new("$", "USD");
        assert_eq!(dollar.format_for_document(dec!(19.99)), "$19.99");
        assert_eq!(dollar.format(dec!(10.125)), "$10.13");
    }
}
