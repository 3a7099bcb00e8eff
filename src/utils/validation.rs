//! Input validation utilities

use std::collections::HashSet;

use crate::types::*;

/// Validate a statement-side input collection
///
/// Every transaction must carry a non-empty identifier that is unique within
/// the collection.
pub fn validate_statement(transactions: &[BankTransaction]) -> ReconcileResult<()> {
    let mut seen = HashSet::new();
    for transaction in transactions {
        if transaction.id.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Bank transaction ID cannot be empty".to_string(),
            ));
        }
        if !seen.insert(transaction.id.as_str()) {
            return Err(ReconcileError::Validation(format!(
                "Duplicate bank transaction ID: {}",
                transaction.id
            )));
        }
    }
    Ok(())
}

/// Validate a ledger-side input collection
pub fn validate_ledger(entries: &[LedgerEntry]) -> ReconcileResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.id.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Ledger entry ID cannot be empty".to_string(),
            ));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(ReconcileError::Validation(format!(
                "Duplicate ledger entry ID: {}",
                entry.id
            )));
        }
    }
    Ok(())
}
