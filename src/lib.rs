//! # Reconciliation Core
//!
//! A bank statement reconciliation engine: deterministic, tolerance-based
//! matching of imported statement transactions against internal ledger
//! records, with a full taxonomy of discrepancy flags.
//!
//! ## Features
//!
//! - **Two-pass greedy matching**: exact and near-exact pairing in input
//!   order, then missing-record detection on both sides
//! - **Configurable policy**: per-dimension toggles for amount, date, and
//!   description matching, day-based date tolerance, and cent or percent
//!   amount tolerances
//! - **Discrepancy taxonomy**: missing records, amount mismatches with signed
//!   differences, date mismatches with day gaps, and duplicate detection
//! - **Aggregate figures**: match rate, total discrepancy, and the net
//!   unreconciled difference between statement and ledger totals
//! - **Pure computation**: no I/O and no shared state; inputs are never
//!   mutated and identical inputs always produce identical results
//!
//! ## Quick Start
//!
//! ```rust
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//! use reconciliation_core::{
//!     BankTransaction, EntryKind, LedgerEntry, ReconciliationEngine,
//! };
//!
//! let statement = vec![BankTransaction::new(
//!     "s1".to_string(),
//!     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//!     "Office Rent".to_string(),
//!     BigDecimal::from(-100),
//! )];
//! let ledger = vec![LedgerEntry::new(
//!     "l1".to_string(),
//!     NaiveDate::from_ymd_opt(2024, 1, 5),
//!     "Office Rent".to_string(),
//!     BigDecimal::from(-100),
//!     EntryKind::Transaction,
//! )];
//!
//! let engine = ReconciliationEngine::default();
//! let result = engine.reconcile(&statement, &ledger).unwrap();
//! assert_eq!(result.match_rate_percent, 100.0);
//! assert!(result.flags.is_empty());
//! ```

pub mod reconciliation;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use reconciliation::*;
pub use types::*;
