use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use rust_decimal::Decimal;

use super::{ValidationError, amount_from_json, deserialize_amount};

pub type TransactionId = i64;

/// Whether money came in or went out. The amount itself is never signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// Capitalized label used in exported reports.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// Sign shown in front of an amount of this type.
    pub fn sign(&self) -> char {
        match self {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single dated income or expense entry in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Non-negative magnitude; direction comes from `kind`
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "deserialize_amount"
    )]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction took effect
    pub date: DateTime<Utc>,
    /// When the row was inserted
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Amount with the sign implied by its type.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// Unvalidated create/update payload, as it arrives from a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInput {
    pub description: Option<String>,
    pub amount: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// The mutable fields of a transaction after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionType,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<serde_json::Value>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            amount: Some(amount.into()),
            kind: Some(kind.into()),
        }
    }

    /// Check required fields, then the type tag, then the amount.
    pub fn validate(self) -> Result<TransactionDraft, ValidationError> {
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let amount = self.amount.filter(|a| !a.is_null());
        let kind = self.kind.filter(|k| !k.trim().is_empty());

        let mut missing = Vec::new();
        if description.is_none() {
            missing.push("description");
        }
        if amount.is_none() {
            missing.push("amount");
        }
        if kind.is_none() {
            missing.push("type");
        }

        match (description, amount, kind) {
            (Some(description), Some(amount), Some(kind)) => {
                let kind = TransactionType::from_str(kind.trim())
                    .ok_or(ValidationError::InvalidType(kind))?;
                let amount = amount_from_json(&amount)?;
                Ok(TransactionDraft {
                    description,
                    amount,
                    kind,
                })
            }
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_validate_accepts_complete_input() {
        let draft = TransactionInput::new("Salary", json!(1500.5), "income")
            .validate()
            .unwrap();
        assert_eq!(draft.description, "Salary");
        assert_eq!(draft.amount, dec!(1500.5));
        assert_eq!(draft.kind, TransactionType::Income);
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let err = TransactionInput::default().validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec!["description", "amount", "type"])
        );
        assert_eq!(
            err.to_string(),
            "Missing required fields: description, amount, type"
        );
    }

    #[test]
    fn test_validate_treats_blank_and_null_as_missing() {
        let input = TransactionInput {
            description: Some("   ".into()),
            amount: Some(serde_json::Value::Null),
            kind: Some("expense".into()),
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::MissingFields(vec!["description", "amount"])
        );
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let err = TransactionInput::new("Gift", json!(10), "transfer")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidType("transfer".into()));
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let draft = TransactionInput::new("Free sample", json!(0), "expense")
            .validate()
            .unwrap();
        assert_eq!(draft.amount, Decimal::ZERO);
    }

    #[test]
    fn test_validate_keeps_sub_cent_precision() {
        let draft = TransactionInput::new("Fuel", json!(10.125), "expense")
            .validate()
            .unwrap();
        assert_eq!(draft.amount, dec!(10.125));
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = Transaction {
            id: 7,
            description: "Coffee".into(),
            amount: dec!(4.5),
            kind: TransactionType::Expense,
            date: "2024-03-05T10:00:00Z".parse().unwrap(),
            created_at: "2024-03-05T10:00:01Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["amount"], json!(4.5));
        assert_eq!(value["type"], json!("expense"));
        assert_eq!(value["id"], json!(7));
        assert_eq!(tx.signed_amount(), dec!(-4.5));

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, tx);
    }
}
