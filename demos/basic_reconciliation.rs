//! Basic reconciliation usage example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::{
    AmountTolerance, BankTransaction, EntryKind, LedgerEntry, ReconciliationEngine,
    ReconciliationSettings,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconciliation Core - Basic Example\n");

    // 1. A small imported bank statement
    let statement = vec![
        transaction("s1", (2024, 1, 5), "Office Rent January", "-1200.00"),
        transaction("s2", (2024, 1, 8), "AWS Cloud Services", "-89.50"),
        transaction("s3", (2024, 1, 12), "Client Payment Invoice 42", "2500.00"),
        transaction("s4", (2024, 1, 15), "Coffee Supplies", "-18.40"),
        transaction("s5", (2024, 1, 15), "Coffee Supplies", "-18.40"),
    ];

    // 2. Internal ledger entries for the same period
    let ledger = vec![
        entry("l1", (2024, 1, 5), "Office Rent January", "-1200.00"),
        entry("l2", (2024, 1, 9), "AWS Cloud Services", "-89.50"),
        entry("l3", (2024, 1, 12), "Client Payment Invoice 42", "2500.01"),
        entry("l4", (2024, 1, 20), "Accountant Fee", "-300.00"),
    ];

    // 3. Run with a cents amount tolerance and the default 3-day date window
    let settings = ReconciliationSettings {
        amount_tolerance: AmountTolerance::Cents,
        ..Default::default()
    };
    let engine = ReconciliationEngine::new(settings);
    let result = engine.reconcile(&statement, &ledger)?;

    println!("📊 Match rate: {}%", result.match_rate_percent);
    println!("💰 Total discrepancy: {}", result.total_discrepancy);
    println!("⚖️  Unreconciled difference: {}\n", result.unreconciled_difference);

    println!("✅ Matched pairs:");
    for item in &result.matched {
        println!(
            "  {} ↔ {} — {} ({})",
            item.statement_id, item.ledger_entry_id, item.statement_description, item.statement_amount
        );
    }

    println!("\n🚩 Flags:");
    for flag in &result.flags {
        println!("  [{:?}] {} — {} ({})", flag.flag, flag.id, flag.description, flag.amount);
    }

    Ok(())
}

fn transaction(id: &str, date: (i32, u32, u32), description: &str, amount: &str) -> BankTransaction {
    BankTransaction::new(
        id.to_string(),
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        description.to_string(),
        amount.parse::<BigDecimal>().unwrap(),
    )
}

fn entry(id: &str, date: (i32, u32, u32), description: &str, amount: &str) -> LedgerEntry {
    LedgerEntry::new(
        id.to_string(),
        NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        description.to_string(),
        amount.parse::<BigDecimal>().unwrap(),
        EntryKind::Transaction,
    )
}
