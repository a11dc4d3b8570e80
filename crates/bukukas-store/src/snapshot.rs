//! Snapshot codec: the serialized root of journal + ledgers
//!
//! Encoding is a plain serde serialization. Decoding is deliberately not:
//! startup must never hard-fail on bad prior data, so the decoder walks the
//! JSON tree by hand and degrades anything with the wrong shape to an empty
//! piece of state, logging instead of erroring.

use bukukas_core::{Entry, Journal, LedgerIndex};
use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Serializable root of the full book state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// General-journal entries in journal order
    pub jurnal: Vec<Entry>,
    /// Per-account entries in display order
    pub accounts: IndexMap<String, Vec<Entry>>,
    /// Capture time (RFC 3339). Informational only; never used to detect
    /// staleness.
    pub last_update: String,
}

impl Snapshot {
    /// Capture the current state of journal and ledgers.
    pub fn capture(journal: &Journal, ledgers: &LedgerIndex) -> Self {
        Self {
            jurnal: journal.entries().to_vec(),
            accounts: ledgers
                .iter()
                .map(|(name, store)| (name.clone(), store.entries().to_vec()))
                .collect(),
            last_update: Utc::now().to_rfc3339(),
        }
    }

    /// Serialize to a JSON tree.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Rebuild journal and ledger index from a decoded snapshot value.
///
/// Never fails. A snapshot that is not an object yields a fresh empty
/// state; a `jurnal` or `accounts` field of the wrong shape is treated as
/// absent; malformed entry rows degrade field by field (see
/// [`Entry::from_record`]). Default accounts are always present in the
/// result, defaults first, extra loaded accounts after them.
pub fn decode(value: &serde_json::Value) -> (Journal, LedgerIndex) {
    let Some(map) = value.as_object() else {
        log::warn!("snapshot is not an object, starting from an empty book");
        return (Journal::new(), LedgerIndex::new());
    };

    let journal = match map.get("jurnal").and_then(|v| v.as_array()) {
        Some(rows) => Journal::from_records(rows),
        None => {
            if map.contains_key("jurnal") {
                log::warn!("snapshot field 'jurnal' has the wrong shape, ignoring it");
            }
            Journal::new()
        }
    };

    let mut loaded: IndexMap<String, Vec<Entry>> = IndexMap::new();
    match map.get("accounts").and_then(|v| v.as_object()) {
        Some(accounts) => {
            for (name, rows) in accounts {
                let entries = match rows.as_array() {
                    Some(rows) => rows
                        .iter()
                        .map(|row| {
                            let mut entry = Entry::from_record(row);
                            entry.account.get_or_insert_with(|| name.clone());
                            entry
                        })
                        .collect(),
                    None => {
                        log::warn!("account {name:?} has a non-list entry set, ignoring it");
                        Vec::new()
                    }
                };
                loaded.insert(name.clone(), entries);
            }
        }
        None => {
            if map.contains_key("accounts") {
                log::warn!("snapshot field 'accounts' has the wrong shape, ignoring it");
            }
        }
    }

    log::debug!(
        "decoded snapshot: {} journal rows, {} accounts (last_update: {})",
        journal.len(),
        loaded.len(),
        map.get("last_update")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
    );

    (journal, LedgerIndex::from_accounts(loaded))
}

// ==================== Tests ====================
