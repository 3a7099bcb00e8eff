//! Core types and data structures for bank statement reconciliation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One line from an imported bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransaction {
    /// Unique identifier within one reconciliation run
    pub id: String,
    /// Statement-local calendar date
    pub date: NaiveDate,
    /// Free-text description from the statement
    pub description: String,
    /// Signed amount in currency units (negative = outflow)
    pub amount: BigDecimal,
    /// Optional classification label
    pub category: Option<String>,
    /// Optional import-batch grouping key
    pub source_file_id: Option<String>,
}

impl BankTransaction {
    /// Create a new bank transaction
    pub fn new(id: String, date: NaiveDate, description: String, amount: BigDecimal) -> Self {
        Self {
            id,
            date,
            description,
            amount,
            category: None,
            source_file_id: None,
        }
    }
}

/// Provenance of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// An already-posted transaction
    Transaction,
    /// A single journal line
    JournalLine,
}

/// One internal accounting record to reconcile against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier within one reconciliation run
    pub id: String,
    /// Posting date; entries without a date never satisfy the date dimension
    pub date: Option<NaiveDate>,
    /// Description of the entry
    pub description: String,
    /// Signed amount in currency units
    pub amount: BigDecimal,
    /// Optional account the entry was posted to
    pub account_name: Option<String>,
    /// Provenance tag; not consulted by the matching algorithm
    pub entry_kind: EntryKind,
}

impl LedgerEntry {
    /// Create a new ledger entry
    pub fn new(
        id: String,
        date: Option<NaiveDate>,
        description: String,
        amount: BigDecimal,
        entry_kind: EntryKind,
    ) -> Self {
        Self {
            id,
            date,
            description,
            amount,
            account_name: None,
            entry_kind,
        }
    }
}

/// Numeric tolerance applied when comparing amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountTolerance {
    /// Amounts must be identical
    Exact,
    /// Amounts within 0.01 currency units are close
    Cents,
    /// Amounts within 1% of the statement amount are close
    Percent,
}

/// Matching policy for one reconciliation run
///
/// A disabled dimension is treated as "always matches" and cannot block a
/// pairing. The default policy matches on amount and date with a three-day
/// date tolerance and exact amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSettings {
    /// Whether the amount dimension participates in matching
    pub match_by_amount: bool,
    /// Whether the date dimension participates in matching
    pub match_by_date: bool,
    /// Whether the description dimension participates in matching
    pub match_by_description: bool,
    /// Maximum day gap for a date to still count as close
    pub date_tolerance_days: u32,
    /// Tolerance applied to amount comparison
    pub amount_tolerance: AmountTolerance,
    /// Reserved for AI-assisted matching; not consulted by the engine
    pub ai_matching: bool,
}

impl Default for ReconciliationSettings {
    fn default() -> Self {
        Self {
            match_by_amount: true,
            match_by_date: true,
            match_by_description: false,
            date_tolerance_days: 3,
            amount_tolerance: AmountTolerance::Exact,
            ai_matching: false,
        }
    }
}

/// Errors that can occur during reconciliation
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
