//! Core bookkeeping: journal entries, per-account ledgers and running
//! balances.
//!
//! This crate holds the in-memory model only. Serialization of the full
//! book and any talking to storage live in `bukukas-store`; the
//! collaborator-facing session sits in `bukukas-session`.

pub mod balance;
pub mod entry;
pub mod error;
pub mod journal;
pub mod ledger;

pub use balance::{period_ledger, running_balance, totals, BalanceRow, OPENING_BALANCE_MEMO};
pub use entry::Entry;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use journal::Journal;
pub use ledger::{LedgerIndex, DEFAULT_ACCOUNTS};
