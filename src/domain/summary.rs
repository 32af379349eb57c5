use rust_decimal::Decimal;
use serde::Serialize;

use super::{Transaction, TransactionType};

/// Total income, total expenses and the balance between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub income: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub expenses: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

impl Summary {
    pub fn new(income: Decimal, expenses: Decimal) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// Exact totals over typed amounts. `None` if a total leaves the `Decimal` range.
    pub fn from_amounts(
        amounts: impl IntoIterator<Item = (TransactionType, Decimal)>,
    ) -> Option<Self> {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for (kind, amount) in amounts {
            match kind {
                TransactionType::Income => income = income.checked_add(amount)?,
                TransactionType::Expense => expenses = expenses.checked_add(amount)?,
            }
        }
        // Both totals are non-negative, so the difference cannot overflow
        Some(Self::new(income, expenses))
    }

    pub fn from_transactions<'a>(
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Option<Self> {
        Self::from_amounts(transactions.into_iter().map(|tx| (tx.kind, tx.amount)))
    }
}
