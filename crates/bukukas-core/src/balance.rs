//! Running-balance computation (saldo berjalan)
//!
//! The engine is pure: it never mutates its input, never allocates state
//! beyond the output rows and never fails. Fields it cannot make sense of
//! degrade (dates sort last, amounts count as zero) instead of aborting the
//! whole view, because a display must always render whatever the book holds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Memo of the synthesized first row of a period ledger.
pub const OPENING_BALANCE_MEMO: &str = "Opening Balance";

/// One display row: the entry columns plus the cumulative balance split
/// across the two saldo columns. At most one of the saldo columns is
/// nonzero and both are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Transaction date as recorded (possibly unparsable text)
    pub date: String,
    /// Entry description
    pub memo: String,
    /// Debit column
    pub debit: f64,
    /// Kredit column
    pub kredit: f64,
    /// Cumulative balance when positive
    pub saldo_debit: f64,
    /// Absolute cumulative balance when negative
    pub saldo_kredit: f64,
}

/// Compute chronological running balances over a set of entries.
///
/// Entries are sorted ascending by date with a stable sort: rows sharing a
/// date keep their relative insertion order, and rows whose date cannot be
/// parsed go last, also in insertion order. One output row per input row.
pub fn running_balance(entries: &[Entry]) -> Vec<BalanceRow> {
    balance_rows(sorted_for_display(entries), 0.0)
}

/// Compute a period-bounded ledger with opening-balance carry-forward.
///
/// Entries dated before `start` are folded into a single opening balance
/// row dated `start`; entries between `start` and `end` (inclusive) get
/// running balances seeded with that opening amount. Entries with an
/// unparsable date belong to neither side and are left out of the period
/// view. The opening row is always emitted, so the result has at least one
/// row even over an empty store.
pub fn period_ledger(entries: &[Entry], start: NaiveDate, end: NaiveDate) -> Vec<BalanceRow> {
    let mut opening = 0.0;
    let mut within: Vec<&Entry> = Vec::new();
    for entry in entries {
        match entry.date_naive() {
            Some(d) if d < start => opening += leg(entry.debit) - leg(entry.kredit),
            Some(d) if d <= end => within.push(entry),
            _ => {}
        }
    }

    let mut rows = vec![BalanceRow {
        date: start.format("%Y-%m-%d").to_string(),
        memo: OPENING_BALANCE_MEMO.to_string(),
        debit: 0.0,
        kredit: 0.0,
        saldo_debit: opening.max(0.0),
        saldo_kredit: (-opening).max(0.0),
    }];
    within.sort_by_key(|e| sort_key(e));
    rows.extend(balance_rows(within, opening));
    rows
}

/// Column totals over a set of entries, for the TOTAL display row.
pub fn totals(entries: &[Entry]) -> (f64, f64) {
    entries.iter().fold((0.0, 0.0), |(debit, kredit), e| {
        (debit + leg(e.debit), kredit + leg(e.kredit))
    })
}

fn sorted_for_display(entries: &[Entry]) -> Vec<&Entry> {
    let mut rows: Vec<&Entry> = entries.iter().collect();
    rows.sort_by_key(|e| sort_key(e));
    rows
}

/// Unparsable dates compare greater than every real date; `sort_by_key` is
/// stable, which keeps same-day rows in insertion order.
fn sort_key(entry: &Entry) -> (bool, NaiveDate) {
    match entry.date_naive() {
        Some(d) => (false, d),
        None => (true, NaiveDate::MAX),
    }
}

fn balance_rows(sorted: Vec<&Entry>, opening: f64) -> Vec<BalanceRow> {
    let mut running = opening;
    sorted
        .into_iter()
        .map(|entry| {
            let debit = leg(entry.debit);
            let kredit = leg(entry.kredit);
            running += debit - kredit;
            BalanceRow {
                date: entry.date.clone(),
                memo: entry.memo.clone(),
                debit,
                kredit,
                saldo_debit: running.max(0.0),
                saldo_kredit: (-running).max(0.0),
            }
        })
        .collect()
}

fn leg(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

// ==================== Tests ====================
