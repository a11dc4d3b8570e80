//! Account index for the general ledger (buku besar)

use indexmap::IndexMap;

use crate::entry::Entry;
use crate::error::{CoreError, CoreResult};
use crate::journal::Journal;

/// Account names every book starts with.
///
/// These are always present after initialization; a loaded snapshot can add
/// accounts on top of them but never removes one of these permanently.
pub const DEFAULT_ACCOUNTS: [&str; 11] = [
    "Kas",
    "Peralatan",
    "Perlengkapan",
    "Modal",
    "Pendapatan",
    "Beban sewa",
    "Beban BBM",
    "Beban gaji",
    "Beban listrik",
    "Beban perawatan",
    "Beban prive",
];

/// Maps an account name to its own entry store.
///
/// Keys are stored case-sensitively but deduplicated case-insensitively on
/// a whitespace-normalized form, so "Kas" and " kas " are the same account
/// from the user's point of view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerIndex {
    accounts: IndexMap<String, Journal>,
}

impl LedgerIndex {
    /// Create an index populated with the default accounts
    pub fn new() -> Self {
        let mut index = Self::default();
        index.ensure_defaults();
        index
    }

    /// Insert every missing default account with an empty store. Existing
    /// accounts are never overwritten; calling this repeatedly is a no-op.
    pub fn ensure_defaults(&mut self) {
        for name in DEFAULT_ACCOUNTS {
            if !self.accounts.contains_key(name) {
                self.accounts.insert(name.to_string(), Journal::new());
            }
        }
    }

    /// Union of loaded accounts and the default set, defaults first.
    ///
    /// Each default account takes its loaded entries when present; extra
    /// loaded accounts follow in their original order. Used when a snapshot
    /// is decoded.
    pub fn from_accounts(mut loaded: IndexMap<String, Vec<Entry>>) -> Self {
        let mut accounts = IndexMap::new();
        for name in DEFAULT_ACCOUNTS {
            let entries = loaded.shift_remove(name).unwrap_or_default();
            accounts.insert(name.to_string(), Journal::from_entries(entries));
        }
        for (name, entries) in loaded {
            accounts.insert(name, Journal::from_entries(entries));
        }
        Self { accounts }
    }

    /// Post an entry to an account, creating the account on first use.
    ///
    /// An empty or whitespace-only account name is rejected: it means the
    /// caller never selected one. The entry is validated like any journal
    /// append and tagged with the account it lands in.
    pub fn post(&mut self, account: &str, mut entry: Entry) -> CoreResult<()> {
        let name = account.trim();
        if name.is_empty() {
            return Err(CoreError::UnknownAccount {
                name: account.to_string(),
            });
        }
        entry.account = Some(name.to_string());
        // validate before the implicit create, so a rejected entry cannot
        // leave a brand-new empty account behind
        entry.validate()?;
        self.accounts
            .entry(name.to_string())
            .or_default()
            .append(entry)
    }

    /// Create an empty account.
    ///
    /// The name is whitespace-normalized (trimmed, internal runs collapsed)
    /// and the duplicate check is case-insensitive on that form, so
    /// `create_account(" kas ")` after `create_account("Kas")` fails.
    pub fn create_account(&mut self, name: &str) -> CoreResult<()> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return Err(CoreError::Validation {
                message: "Account name must not be empty".to_string(),
            });
        }
        let folded = normalized.to_lowercase();
        if self.accounts.keys().any(|k| k.to_lowercase() == folded) {
            return Err(CoreError::DuplicateAccount { name: normalized });
        }
        self.accounts.insert(normalized, Journal::new());
        Ok(())
    }

    /// Remove an account and its entries.
    ///
    /// Default accounts can be removed for the rest of the session but come
    /// back on the next load or `ensure_defaults` call.
    pub fn remove_account(&mut self, name: &str) -> CoreResult<()> {
        match self.accounts.shift_remove(name.trim()) {
            Some(_) => Ok(()),
            None => Err(CoreError::UnknownAccount {
                name: name.to_string(),
            }),
        }
    }

    /// Look up an account's entry store
    pub fn get(&self, name: &str) -> Option<&Journal> {
        self.accounts.get(name.trim())
    }

    /// Account names in display order
    pub fn names(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }

    /// Iterate accounts in display order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Journal)> {
        self.accounts.iter()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Check if the index has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Collapse internal whitespace runs and trim the ends.
fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ==================== Tests ====================
