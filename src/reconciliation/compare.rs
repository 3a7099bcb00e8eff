//! Comparison primitives for the matching dimensions
//!
//! Each primitive reports how two values relate on one dimension. A dimension
//! disabled in the settings is bypassed and reported as an exact match, so it
//! can never block a pairing.

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;

use crate::types::{AmountTolerance, ReconciliationSettings};

/// Day difference reported when either side has no usable date
pub const MISSING_DATE_DAYS: i64 = 999;

/// Outcome of comparing two absolute amounts
#[derive(Debug, Clone, PartialEq)]
pub struct AmountComparison {
    /// The amounts are identical
    pub exact: bool,
    /// The amounts are within the configured tolerance (exact implies close)
    pub close: bool,
    /// Signed difference, first amount minus second
    pub difference: BigDecimal,
}

/// Outcome of comparing two dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComparison {
    /// The dates are the same day
    pub exact: bool,
    /// The day gap is within the configured tolerance (exact implies close)
    pub close: bool,
    /// Absolute day gap, or [`MISSING_DATE_DAYS`] when a side has no date
    pub days: i64,
}

/// Compare two absolute amounts under the configured tolerance.
///
/// With the percent tolerance the first amount is the baseline; the check
/// `|diff| / a <= 1%` is evaluated as `100 * |diff| <= a` to stay exact in
/// decimal arithmetic.
pub fn amounts(
    a: &BigDecimal,
    b: &BigDecimal,
    settings: &ReconciliationSettings,
) -> AmountComparison {
    if !settings.match_by_amount {
        return AmountComparison {
            exact: true,
            close: true,
            difference: BigDecimal::zero(),
        };
    }

    let difference = a - b;
    let abs_diff = difference.abs();
    let exact = abs_diff.is_zero();

    let close = match settings.amount_tolerance {
        AmountTolerance::Exact => exact,
        AmountTolerance::Cents => &abs_diff * BigDecimal::from(100) <= BigDecimal::from(1),
        AmountTolerance::Percent => {
            *a > BigDecimal::zero() && &abs_diff * BigDecimal::from(100) <= *a
        }
    };

    AmountComparison {
        exact,
        close: exact || close,
        difference,
    }
}

/// Compare two dates under the configured day tolerance.
///
/// A missing date on either side reports the sentinel day gap and is neither
/// exact nor close.
pub fn dates(
    a: Option<NaiveDate>,
    b: Option<NaiveDate>,
    settings: &ReconciliationSettings,
) -> DateComparison {
    if !settings.match_by_date {
        return DateComparison {
            exact: true,
            close: true,
            days: 0,
        };
    }

    match (a, b) {
        (Some(d1), Some(d2)) => {
            let days = d1.signed_duration_since(d2).num_days().abs();
            DateComparison {
                exact: days == 0,
                close: days <= i64::from(settings.date_tolerance_days),
                days,
            }
        }
        _ => DateComparison {
            exact: false,
            close: false,
            days: MISSING_DATE_DAYS,
        },
    }
}

/// Compare two descriptions; boolean only, no "close" tier.
///
/// Case-insensitive and trimmed. Matches on equality, either-way containment,
/// or when at least half of the shorter side's significant words (longer than
/// two characters) have a substring relationship with some word on the other
/// side. Empty descriptions never match.
pub fn descriptions(a: &str, b: &str, settings: &ReconciliationSettings) -> bool {
    if !settings.match_by_description {
        return true;
    }

    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b || a.contains(&b) || b.contains(&a) {
        return true;
    }

    let words_a = significant_words(&a);
    let words_b = significant_words(&b);
    if words_a.is_empty() || words_b.is_empty() {
        return false;
    }

    let (shorter, longer) = if words_a.len() <= words_b.len() {
        (&words_a, &words_b)
    } else {
        (&words_b, &words_a)
    };
    let matching = shorter
        .iter()
        .filter(|word| {
            longer
                .iter()
                .any(|other| word.contains(*other) || other.contains(**word))
        })
        .count();

    // At least half of the shorter side's significant words must overlap
    matching * 2 >= shorter.len()
}

fn significant_words(text: &str) -> Vec<&str> {
    text.split_whitespace().filter(|w| w.len() > 2).collect()
}
