//! Two-pass greedy matching of statement transactions against ledger entries

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reconciliation::compare;
use crate::types::*;
use crate::utils::rounding::{round_decimal, round_rate};
use crate::utils::validation::{validate_ledger, validate_statement};

/// A statement transaction paired with the ledger entry judged equivalent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedItem {
    pub statement_id: String,
    pub statement_date: NaiveDate,
    pub statement_description: String,
    /// Absolute statement amount
    pub statement_amount: BigDecimal,
    pub ledger_entry_id: String,
    pub ledger_date: Option<NaiveDate>,
    pub ledger_description: String,
    /// Absolute ledger amount
    pub ledger_amount: BigDecimal,
}

/// Classification of a record that did not cleanly match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    /// Statement transaction with no ledger counterpart
    MissingInLedger,
    /// Ledger entry with no statement counterpart
    MissingInStatement,
    /// Paired records whose amounts differ within tolerance
    AmountMismatch,
    /// Paired records whose dates differ within tolerance
    DateMismatch,
    /// Statement transactions sharing date, amount, and description
    Duplicate,
}

/// A statement transaction or ledger entry flagged during reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedItem {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Absolute amount of the flagged record
    pub amount: BigDecimal,
    pub flag: FlagKind,
    /// Counterpart ledger entry, for mismatch flags
    pub ledger_entry_id: Option<String>,
    /// Absolute counterpart amount, for mismatch flags
    pub ledger_amount: Option<BigDecimal>,
    pub ledger_date: Option<NaiveDate>,
    /// Statement minus ledger amount, for amount mismatches
    pub signed_difference: Option<BigDecimal>,
    /// Day gap between the paired records, for date mismatches
    pub days_difference: Option<i64>,
    /// Group size, for duplicate flags
    pub occurrence_count: Option<usize>,
}

impl FlaggedItem {
    fn new(
        id: String,
        date: Option<NaiveDate>,
        description: String,
        amount: BigDecimal,
        flag: FlagKind,
    ) -> Self {
        Self {
            id,
            date,
            description,
            amount,
            flag,
            ledger_entry_id: None,
            ledger_amount: None,
            ledger_date: None,
            signed_difference: None,
            days_difference: None,
            occurrence_count: None,
        }
    }

    fn missing_in_ledger(transaction: &BankTransaction) -> Self {
        Self::new(
            transaction.id.clone(),
            Some(transaction.date),
            transaction.description.clone(),
            transaction.amount.abs(),
            FlagKind::MissingInLedger,
        )
    }

    fn missing_in_statement(entry: &LedgerEntry) -> Self {
        Self::new(
            entry.id.clone(),
            entry.date,
            entry.description.clone(),
            entry.amount.abs(),
            FlagKind::MissingInStatement,
        )
    }

    fn amount_mismatch(
        transaction: &BankTransaction,
        entry: &LedgerEntry,
        difference: BigDecimal,
    ) -> Self {
        let mut flag = Self::new(
            transaction.id.clone(),
            Some(transaction.date),
            transaction.description.clone(),
            transaction.amount.abs(),
            FlagKind::AmountMismatch,
        );
        flag.ledger_entry_id = Some(entry.id.clone());
        flag.ledger_amount = Some(entry.amount.abs());
        flag.ledger_date = entry.date;
        flag.signed_difference = Some(difference);
        flag
    }

    fn date_mismatch(transaction: &BankTransaction, entry: &LedgerEntry, days: i64) -> Self {
        let mut flag = Self::new(
            transaction.id.clone(),
            Some(transaction.date),
            transaction.description.clone(),
            transaction.amount.abs(),
            FlagKind::DateMismatch,
        );
        flag.ledger_entry_id = Some(entry.id.clone());
        flag.ledger_amount = Some(entry.amount.abs());
        flag.ledger_date = entry.date;
        flag.days_difference = Some(days);
        flag
    }

    fn duplicate(transaction: &BankTransaction, occurrences: usize) -> Self {
        let mut flag = Self::new(
            transaction.id.clone(),
            Some(transaction.date),
            transaction.description.clone(),
            transaction.amount.abs(),
            FlagKind::Duplicate,
        );
        flag.occurrence_count = Some(occurrences);
        flag
    }
}

/// Complete output of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Share of statement transactions exactly matched, 0-100, one decimal
    pub match_rate_percent: f64,
    /// Sum of absolute amount-mismatch differences, two decimals
    pub total_discrepancy: BigDecimal,
    /// Matched pairs in statement order
    pub matched: Vec<MatchedItem>,
    /// Flags in emission order: mismatches, missing records, duplicates
    pub flags: Vec<FlaggedItem>,
    /// Signed statement total minus signed ledger total, two decimals
    pub unreconciled_difference: BigDecimal,
}

/// Reconciliation engine configured with one matching policy
///
/// Matching is greedy and first-fit in input order: for each statement
/// transaction the first unconsumed ledger entry that satisfies a rule wins,
/// so pairings are reproducible for a given input order. Amounts are compared
/// by absolute value; direction is implicit in which collection a record
/// belongs to.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    settings: ReconciliationSettings,
}

impl ReconciliationEngine {
    /// Create an engine with the given matching policy
    pub fn new(settings: ReconciliationSettings) -> Self {
        Self { settings }
    }

    /// The matching policy this engine applies
    pub fn settings(&self) -> &ReconciliationSettings {
        &self.settings
    }

    /// Match a bank statement against ledger entries.
    ///
    /// Inputs are never mutated and "no match found" is an expected outcome
    /// reported through flags, not an error. Validation rejects empty or
    /// duplicated identifiers within either collection.
    pub fn reconcile(
        &self,
        statement: &[BankTransaction],
        ledger: &[LedgerEntry],
    ) -> ReconcileResult<ReconciliationResult> {
        validate_statement(statement)?;
        validate_ledger(ledger)?;

        let settings = &self.settings;
        let mut matched = Vec::new();
        let mut flags = Vec::new();
        let mut consumed_statement: HashSet<&str> = HashSet::new();
        let mut consumed_ledger: HashSet<&str> = HashSet::new();
        let mut total_discrepancy = BigDecimal::zero();

        // Pass 1: exact and near-exact pairing, first fit in input order
        for transaction in statement {
            let statement_amount = transaction.amount.abs();

            for entry in ledger {
                if consumed_ledger.contains(entry.id.as_str()) {
                    continue;
                }
                if !compare::descriptions(&transaction.description, &entry.description, settings) {
                    continue;
                }

                let amount = compare::amounts(&statement_amount, &entry.amount.abs(), settings);
                let date = compare::dates(Some(transaction.date), entry.date, settings);

                if amount.exact && date.exact {
                    matched.push(MatchedItem {
                        statement_id: transaction.id.clone(),
                        statement_date: transaction.date,
                        statement_description: transaction.description.clone(),
                        statement_amount: statement_amount.clone(),
                        ledger_entry_id: entry.id.clone(),
                        ledger_date: entry.date,
                        ledger_description: entry.description.clone(),
                        ledger_amount: entry.amount.abs(),
                    });
                } else if amount.close && !amount.exact && date.exact {
                    total_discrepancy += amount.difference.abs();
                    flags.push(FlaggedItem::amount_mismatch(
                        transaction,
                        entry,
                        amount.difference,
                    ));
                } else if amount.exact && date.close && !date.exact {
                    flags.push(FlaggedItem::date_mismatch(transaction, entry, date.days));
                } else {
                    continue;
                }

                consumed_statement.insert(transaction.id.as_str());
                consumed_ledger.insert(entry.id.as_str());
                break;
            }
        }

        // Pass 2: whatever was not consumed is missing on the other side
        for transaction in statement {
            if !consumed_statement.contains(transaction.id.as_str()) {
                flags.push(FlaggedItem::missing_in_ledger(transaction));
            }
        }
        for entry in ledger {
            if !consumed_ledger.contains(entry.id.as_str()) {
                flags.push(FlaggedItem::missing_in_statement(entry));
            }
        }

        // Pass 3: statement-side duplicates, independent of match status
        self.flag_duplicates(statement, &mut flags);

        let match_rate_percent = if statement.is_empty() {
            0.0
        } else {
            round_rate(100.0 * matched.len() as f64 / statement.len() as f64)
        };
        let statement_total: BigDecimal = statement.iter().map(|t| &t.amount).sum();
        let ledger_total: BigDecimal = ledger.iter().map(|e| &e.amount).sum();

        Ok(ReconciliationResult {
            match_rate_percent,
            total_discrepancy: round_decimal(&total_discrepancy, 2),
            matched,
            flags,
            unreconciled_difference: round_decimal(&(statement_total - ledger_total), 2),
        })
    }

    /// Group statement transactions by date, absolute two-decimal amount, and
    /// normalized description; each group of two or more emits one flag
    /// referencing its first member.
    fn flag_duplicates(&self, statement: &[BankTransaction], flags: &mut Vec<FlaggedItem>) {
        type GroupKey = (NaiveDate, String, String);

        let mut first_seen: Vec<GroupKey> = Vec::new();
        let mut groups: HashMap<GroupKey, (usize, usize)> = HashMap::new();

        for (index, transaction) in statement.iter().enumerate() {
            let key = (
                transaction.date,
                round_decimal(&transaction.amount.abs(), 2).to_string(),
                transaction.description.trim().to_lowercase(),
            );
            match groups.entry(key) {
                Entry::Occupied(mut group) => group.get_mut().1 += 1,
                Entry::Vacant(slot) => {
                    first_seen.push(slot.key().clone());
                    slot.insert((index, 1));
                }
            }
        }

        for key in &first_seen {
            let (first_index, count) = groups[key];
            if count > 1 {
                flags.push(FlaggedItem::duplicate(&statement[first_index], count));
            }
        }
    }
}

/// Match a bank statement against ledger entries under the given policy.
///
/// Convenience wrapper over [`ReconciliationEngine`] for one-off runs.
pub fn reconcile(
    statement: &[BankTransaction],
    ledger: &[LedgerEntry],
    settings: &ReconciliationSettings,
) -> ReconcileResult<ReconciliationResult> {
    ReconciliationEngine::new(settings.clone()).reconcile(statement, ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn txn(id: &str, day: u32, description: &str, amount: &str) -> BankTransaction {
        BankTransaction::new(id.to_string(), date(day), description.to_string(), dec(amount))
    }

    fn entry(id: &str, day: u32, description: &str, amount: &str) -> LedgerEntry {
        LedgerEntry::new(
            id.to_string(),
            Some(date(day)),
            description.to_string(),
            dec(amount),
            EntryKind::Transaction,
        )
    }

    #[test]
    fn test_exact_match_consumes_both_sides() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Office Rent", "-100.00")],
                &[entry("l1", 5, "Office Rent", "-100.00")],
            )
            .unwrap();

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].statement_id, "s1");
        assert_eq!(result.matched[0].ledger_entry_id, "l1");
        assert_eq!(result.matched[0].statement_amount, dec("100.00"));
        assert!(result.flags.is_empty());
        assert_eq!(result.match_rate_percent, 100.0);
    }

    #[test]
    fn test_greedy_first_fit_takes_first_candidate() {
        // Two ledger entries both qualify; input order decides the pairing.
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Payment", "250.00")],
                &[
                    entry("l1", 5, "First candidate", "250.00"),
                    entry("l2", 5, "Second candidate", "250.00"),
                ],
            )
            .unwrap();

        assert_eq!(result.matched[0].ledger_entry_id, "l1");
        assert_eq!(result.flags.len(), 1);
        assert_eq!(result.flags[0].flag, FlagKind::MissingInStatement);
        assert_eq!(result.flags[0].id, "l2");
    }

    #[test]
    fn test_amount_mismatch_within_cents_tolerance() {
        let engine = ReconciliationEngine::new(ReconciliationSettings {
            amount_tolerance: AmountTolerance::Cents,
            ..Default::default()
        });
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Rent", "-100.00")],
                &[entry("l1", 5, "Rent", "-100.01")],
            )
            .unwrap();

        assert!(result.matched.is_empty());
        assert_eq!(result.flags.len(), 1);
        let flag = &result.flags[0];
        assert_eq!(flag.flag, FlagKind::AmountMismatch);
        assert_eq!(flag.ledger_entry_id.as_deref(), Some("l1"));
        assert_eq!(flag.signed_difference, Some(dec("-0.01")));
        assert_eq!(result.total_discrepancy, dec("0.01"));
        assert_eq!(result.match_rate_percent, 0.0);
    }

    #[test]
    fn test_date_mismatch_within_tolerance() {
        let engine = ReconciliationEngine::default(); // 3-day tolerance
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Rent", "-100.00")],
                &[entry("l1", 7, "Rent", "-100.00")],
            )
            .unwrap();

        assert!(result.matched.is_empty());
        assert_eq!(result.flags.len(), 1);
        assert_eq!(result.flags[0].flag, FlagKind::DateMismatch);
        assert_eq!(result.flags[0].days_difference, Some(2));
    }

    #[test]
    fn test_no_rule_satisfied_yields_missing_flags() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Rent", "-100.00")],
                &[entry("l1", 20, "Utilities", "-42.00")],
            )
            .unwrap();

        assert!(result.matched.is_empty());
        assert_eq!(result.flags.len(), 2);
        assert_eq!(result.flags[0].flag, FlagKind::MissingInLedger);
        assert_eq!(result.flags[0].id, "s1");
        assert_eq!(result.flags[1].flag, FlagKind::MissingInStatement);
        assert_eq!(result.flags[1].id, "l1");
    }

    #[test]
    fn test_ledger_entry_without_date_never_close() {
        let engine = ReconciliationEngine::default();
        let undated = LedgerEntry::new(
            "l1".to_string(),
            None,
            "Rent".to_string(),
            dec("-100.00"),
            EntryKind::JournalLine,
        );
        let result = engine
            .reconcile(&[txn("s1", 5, "Rent", "-100.00")], &[undated])
            .unwrap();

        assert!(result.matched.is_empty());
        assert_eq!(result.flags[0].flag, FlagKind::MissingInLedger);
    }

    #[test]
    fn test_disabled_date_dimension_cannot_block() {
        let engine = ReconciliationEngine::new(ReconciliationSettings {
            match_by_date: false,
            ..Default::default()
        });
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Rent", "-100.00")],
                &[entry("l1", 25, "Rent", "-100.00")],
            )
            .unwrap();

        assert_eq!(result.matched.len(), 1);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_description_dimension_blocks_when_enabled() {
        let engine = ReconciliationEngine::new(ReconciliationSettings {
            match_by_description: true,
            ..Default::default()
        });
        let result = engine
            .reconcile(
                &[txn("s1", 5, "Office Rent", "-100.00")],
                &[entry("l1", 5, "Fuel refill", "-100.00")],
            )
            .unwrap();

        assert!(result.matched.is_empty());
        assert_eq!(result.flags[0].flag, FlagKind::MissingInLedger);
    }

    #[test]
    fn test_duplicates_are_additive_to_match_status() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile(
                &[
                    txn("s1", 5, "Coffee", "-4.50"),
                    txn("s2", 5, "Coffee", "-4.50"),
                ],
                &[entry("l1", 5, "Coffee", "-4.50")],
            )
            .unwrap();

        // s1 matches, s2 is missing, and the pair still counts as duplicates
        assert_eq!(result.matched.len(), 1);
        let kinds: Vec<FlagKind> = result.flags.iter().map(|f| f.flag).collect();
        assert_eq!(kinds, vec![FlagKind::MissingInLedger, FlagKind::Duplicate]);
        assert_eq!(result.flags[1].id, "s1");
        assert_eq!(result.flags[1].occurrence_count, Some(2));
    }

    #[test]
    fn test_duplicate_key_normalizes_description_and_scale() {
        let engine = ReconciliationEngine::default();
        let result = engine
            .reconcile(
                &[
                    txn("s1", 5, "  COFFEE ", "-4.5"),
                    txn("s2", 5, "coffee", "-4.50"),
                ],
                &[],
            )
            .unwrap();

        let duplicates: Vec<_> = result
            .flags
            .iter()
            .filter(|f| f.flag == FlagKind::Duplicate)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].occurrence_count, Some(2));
    }

    #[test]
    fn test_validation_rejects_duplicate_ids() {
        let engine = ReconciliationEngine::default();
        let result = engine.reconcile(
            &[txn("s1", 5, "a", "1"), txn("s1", 6, "b", "2")],
            &[],
        );
        assert!(matches!(result, Err(ReconcileError::Validation(_))));
    }

    #[test]
    fn test_free_function_matches_engine() {
        let statement = [txn("s1", 5, "Rent", "-100.00")];
        let ledger = [entry("l1", 5, "Rent", "-100.00")];
        let settings = ReconciliationSettings::default();

        let via_fn = reconcile(&statement, &ledger, &settings).unwrap();
        let via_engine = ReconciliationEngine::new(settings)
            .reconcile(&statement, &ledger)
            .unwrap();
        assert_eq!(via_fn, via_engine);
    }
}
