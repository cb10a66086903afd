//! Per-session income and expense ledger.
//!
//! DESIGN
//! ======
//! Transactions live in the session workspace only. Incomes and expenses
//! share one record type and one validation path; listing is newest first
//! and the dashboard summary is derived on demand rather than cached.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Number of entries in the dashboard's recent history.
pub const RECENT_HISTORY_LEN: usize = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("All fields are required!")]
    MissingFields,
    #[error("Amount must be a positive number!")]
    InvalidAmount,
    #[error("transaction not found: {0}")]
    NotFound(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// One logged income or expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Unvalidated form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionDraft {
    pub title: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<Date>,
}

fn required(field: Option<String>) -> Result<String, LedgerError> {
    field
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(LedgerError::MissingFields)
}

impl TransactionDraft {
    fn validate(self, kind: TransactionKind, created_at: OffsetDateTime) -> Result<Transaction, LedgerError> {
        let title = required(self.title)?;
        let category = required(self.category)?;
        let description = required(self.description)?;
        let date = self.date.ok_or(LedgerError::MissingFields)?;
        let amount = self.amount.ok_or(LedgerError::MissingFields)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LedgerError::InvalidAmount);
        }

        Ok(Transaction { id: Uuid::new_v4(), kind, title, amount, category, description, date, created_at })
    }
}

/// Smallest and largest amount of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub recent_history: Vec<Transaction>,
    pub income_range: Option<AmountRange>,
    pub expense_range: Option<AmountRange>,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Insertion order; newest last.
    entries: Vec<Transaction>,
}

impl Ledger {
    /// Validate and record a transaction.
    ///
    /// # Errors
    ///
    /// Returns `MissingFields` when a field is absent or blank and
    /// `InvalidAmount` when the amount is not a finite positive number.
    pub fn add(&mut self, kind: TransactionKind, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        self.add_at(kind, draft, OffsetDateTime::now_utc())
    }

    fn add_at(
        &mut self,
        kind: TransactionKind,
        draft: TransactionDraft,
        now: OffsetDateTime,
    ) -> Result<Transaction, LedgerError> {
        let tx = draft.validate(kind, now)?;
        self.entries.push(tx.clone());
        Ok(tx)
    }

    /// Transactions of one kind, newest first.
    #[must_use]
    pub fn list(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.entries
            .iter()
            .rev()
            .filter(|tx| tx.kind == kind)
            .cloned()
            .collect()
    }

    /// Remove a transaction of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transaction of that kind has the id.
    pub fn delete(&mut self, kind: TransactionKind, id: Uuid) -> Result<Transaction, LedgerError> {
        let pos = self
            .entries
            .iter()
            .position(|tx| tx.id == id && tx.kind == kind)
            .ok_or(LedgerError::NotFound(id))?;
        Ok(self.entries.remove(pos))
    }

    #[must_use]
    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.amounts(kind).sum()
    }

    #[must_use]
    pub fn summary(&self) -> LedgerSummary {
        let total_income = self.total(TransactionKind::Income);
        let total_expenses = self.total(TransactionKind::Expense);
        LedgerSummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            recent_history: self.entries.iter().rev().take(RECENT_HISTORY_LEN).cloned().collect(),
            income_range: self.range(TransactionKind::Income),
            expense_range: self.range(TransactionKind::Expense),
        }
    }

    fn amounts(&self, kind: TransactionKind) -> impl Iterator<Item = f64> + '_ {
        self.entries
            .iter()
            .filter(move |tx| tx.kind == kind)
            .map(|tx| tx.amount)
    }

    fn range(&self, kind: TransactionKind) -> Option<AmountRange> {
        self.amounts(kind).fold(None, |acc, amount| match acc {
            None => Some(AmountRange { min: amount, max: amount }),
            Some(r) => Some(AmountRange { min: r.min.min(amount), max: r.max.max(amount) }),
        })
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
