//! Reconciliation of imported bank statements against internal ledger records
//!
//! The engine pairs statement transactions with ledger entries under a
//! configurable tolerance policy and classifies everything that does not
//! cleanly pair: missing records on either side, amount or date mismatches,
//! and statement-side duplicates.

pub mod compare;
pub mod engine;

pub use engine::*;
