//! Application session: the state struct behind the UI layer
//!
//! A [`Session`] owns the general journal, the ledger index and the
//! persistence gateway, and exposes exactly the operations a front end
//! needs. There is no other mutable state: a collaborator holds one
//! session per running instance and calls into it synchronously.
//!
//! Every mutating operation persists the full snapshot in the same step.
//! A remote problem never blocks the mutation; it only shows up in the
//! returned [`SaveLocation`], which the collaborator renders as a "saved
//! locally instead" notice. The single hard persistence error is a failed
//! local write, because nothing can catch the data after that.

use bukukas_config::Config;
use bukukas_core::{
    period_ledger, running_balance, totals, BalanceRow, CoreError, Entry, Journal, LedgerIndex,
};
use bukukas_store::{
    decode, Gateway, GitHubStore, LoadSource, LocalStore, RemoteStore, SaveLocation, Snapshot,
    StoreError,
};
use chrono::NaiveDate;
use thiserror::Error;

/// Session error: a core rejection or a fatal persistence failure.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type with SessionError
pub type SessionResult<T> = Result<T, SessionError>;

/// One user's book for the lifetime of the process.
pub struct Session {
    config: Config,
    journal: Journal,
    ledgers: LedgerIndex,
    gateway: Gateway,
}

impl Session {
    /// Build a session from configuration. The remote store is only wired
    /// up when an access token is configured; otherwise the session runs
    /// local-only from the start.
    pub fn new(config: Config) -> Self {
        let remote = GitHubStore::from_config(&config.remote)
            .map(|store| Box::new(store) as Box<dyn RemoteStore>);
        if remote.is_none() {
            log::info!("no access token configured, running local-only");
        }
        let gateway = Gateway::new(remote, LocalStore::new(config.storage.local_dir.clone()));
        Self::with_gateway(config, gateway)
    }

    /// Build a session around an existing gateway. This is the seam the
    /// tests use to swap in scripted remote stores.
    pub fn with_gateway(config: Config, gateway: Gateway) -> Self {
        Self {
            config,
            journal: Journal::new(),
            ledgers: LedgerIndex::new(),
            gateway,
        }
    }

    // ==================== Persistence ====================

    /// Load the snapshot: remote, else local, else a fresh empty book.
    /// Default accounts exist afterwards in every case. Returns where the
    /// data came from, or `None` for a fresh start.
    pub fn load_snapshot(&mut self) -> Option<LoadSource> {
        match self.gateway.load(&self.config.storage.snapshot_file) {
            Some((value, source)) => {
                let (journal, ledgers) = decode(&value);
                self.journal = journal;
                self.ledgers = ledgers;
                self.ledgers.ensure_defaults();
                Some(source)
            }
            None => {
                self.journal = Journal::new();
                self.ledgers = LedgerIndex::new();
                None
            }
        }
    }

    /// Persist the current state as one full snapshot.
    pub fn save_snapshot(&self) -> SessionResult<SaveLocation> {
        let snapshot = Snapshot::capture(&self.journal, &self.ledgers);
        Ok(self
            .gateway
            .save(&self.config.storage.snapshot_file, &snapshot.to_value())?)
    }

    // ==================== Journal operations ====================

    /// Append a validated entry to the general journal and persist.
    pub fn post_journal_entry(&mut self, entry: Entry) -> SessionResult<SaveLocation> {
        self.journal.append(entry)?;
        self.save_snapshot()
    }

    /// Delete a journal row (1-indexed) and persist.
    pub fn delete_journal_row(&mut self, row: usize) -> SessionResult<SaveLocation> {
        self.journal.delete_row(row)?;
        self.save_snapshot()
    }

    /// Remove every journal row and persist.
    pub fn clear_journal(&mut self) -> SessionResult<SaveLocation> {
        self.journal.clear();
        self.save_snapshot()
    }

    /// The general journal with running balances.
    pub fn journal_view(&self) -> Vec<BalanceRow> {
        running_balance(self.journal.entries())
    }

    /// Debit/kredit column totals of the general journal.
    pub fn journal_totals(&self) -> (f64, f64) {
        totals(self.journal.entries())
    }

    /// Direct read access to the journal
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    // ==================== Ledger operations ====================

    /// Post an entry to a ledger account (creating it on first use) and
    /// persist. Defaults are re-ensured first, so a ledger posting always
    /// sees the full account set.
    pub fn post_ledger_entry(&mut self, account: &str, entry: Entry) -> SessionResult<SaveLocation> {
        self.ledgers.ensure_defaults();
        self.ledgers.post(account, entry)?;
        self.save_snapshot()
    }

    /// One ledger account with running balances.
    pub fn ledger_view(&self, account: &str) -> SessionResult<Vec<BalanceRow>> {
        let store = self.ledgers.get(account).ok_or(CoreError::UnknownAccount {
            name: account.to_string(),
        })?;
        Ok(running_balance(store.entries()))
    }

    /// Debit/kredit column totals of one ledger account.
    pub fn ledger_totals(&self, account: &str) -> SessionResult<(f64, f64)> {
        let store = self.ledgers.get(account).ok_or(CoreError::UnknownAccount {
            name: account.to_string(),
        })?;
        Ok(totals(store.entries()))
    }

    /// Period-bounded view with opening-balance carry-forward, over the
    /// general journal or one account.
    pub fn period_view(
        &self,
        account: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SessionResult<Vec<BalanceRow>> {
        let entries = match account {
            None => self.journal.entries(),
            Some(name) => self
                .ledgers
                .get(name)
                .ok_or(CoreError::UnknownAccount {
                    name: name.to_string(),
                })?
                .entries(),
        };
        Ok(period_ledger(entries, start, end))
    }

    // ==================== Account management ====================

    /// Account names in display order.
    pub fn list_accounts(&self) -> Vec<String> {
        self.ledgers.names()
    }

    /// Create an empty account and persist.
    pub fn create_account(&mut self, name: &str) -> SessionResult<SaveLocation> {
        self.ledgers.create_account(name)?;
        self.save_snapshot()
    }

    /// Remove an account and persist. A removed default account comes back
    /// on the next load.
    pub fn remove_account(&mut self, name: &str) -> SessionResult<SaveLocation> {
        self.ledgers.remove_account(name)?;
        self.save_snapshot()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use bukukas_core::DEFAULT_ACCOUNTS;
    use bukukas_store::StoreResult;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct FailingRemote;

    impl RemoteStore for FailingRemote {
        fn read(&self, _filename: &str) -> StoreResult<Option<String>> {
            Err(StoreError::remote("status 500"))
        }
        fn write(&self, _filename: &str, _json: &str) -> StoreResult<()> {
            Err(StoreError::remote("status 500"))
        }
        fn describe(&self) -> String {
            "failing remote".to_string()
        }
    }

    #[derive(Default)]
    struct MemoryRemote {
        files: RefCell<Vec<(String, String)>>,
    }

    impl RemoteStore for MemoryRemote {
        fn read(&self, filename: &str) -> StoreResult<Option<String>> {
            Ok(self
                .files
                .borrow()
                .iter()
                .rev()
                .find(|(name, _)| name == filename)
                .map(|(_, json)| json.clone()))
        }
        fn write(&self, filename: &str, json: &str) -> StoreResult<()> {
            self.files
                .borrow_mut()
                .push((filename.to_string(), json.to_string()));
            Ok(())
        }
        fn describe(&self) -> String {
            "memory remote".to_string()
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bukukas-session-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn local_session(tag: &str) -> Session {
        let mut config = Config::default();
        config.storage.local_dir = scratch_dir(tag);
        let gateway = Gateway::new(None, LocalStore::new(config.storage.local_dir.clone()));
        Session::with_gateway(config, gateway)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fresh_session_has_default_accounts() {
        let session = local_session("defaults");
        assert_eq!(session.list_accounts().len(), DEFAULT_ACCOUNTS.len());
        assert!(session.journal_view().is_empty());
    }

    #[test]
    fn test_journal_end_to_end() {
        let mut session = local_session("end-to-end");
        session.load_snapshot();

        session
            .post_journal_entry(Entry::new(date(2025, 1, 5), "Modal awal", 1_000_000.0, 0.0))
            .unwrap();
        session
            .post_journal_entry(Entry::new(date(2025, 1, 3), "Beli alat", 0.0, 200_000.0))
            .unwrap();

        let rows = session.journal_view();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2025-01-03");
        assert_eq!(rows[0].saldo_kredit, 200_000.0);
        assert_eq!(rows[0].saldo_debit, 0.0);
        assert_eq!(rows[1].date, "2025-01-05");
        assert_eq!(rows[1].saldo_debit, 800_000.0);
        assert_eq!(rows[1].saldo_kredit, 0.0);

        assert_eq!(session.journal_totals(), (1_000_000.0, 200_000.0));
    }

    #[test]
    fn test_validation_error_blocks_mutation_and_save() {
        let mut session = local_session("validation");
        let err = session
            .post_journal_entry(Entry::new(date(2025, 1, 1), "", 100.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, SessionError::Core(_)));
        assert!(session.journal().is_empty());

        let err = session
            .post_journal_entry(Entry::new(date(2025, 1, 1), "Campur", 100.0, 50.0))
            .unwrap_err();
        assert!(matches!(err, SessionError::Core(_)));
    }

    #[test]
    fn test_state_survives_reload_through_local_store() {
        let dir = scratch_dir("reload");
        let mut config = Config::default();
        config.storage.local_dir = dir.clone();

        let gateway = Gateway::new(None, LocalStore::new(dir.clone()));
        let mut session = Session::with_gateway(config.clone(), gateway);
        session
            .post_journal_entry(Entry::new(date(2025, 2, 1), "Pendapatan", 400_000.0, 0.0))
            .unwrap();
        session
            .post_ledger_entry("Kas", Entry::new(date(2025, 2, 1), "Kas masuk", 400_000.0, 0.0))
            .unwrap();

        let gateway = Gateway::new(None, LocalStore::new(dir));
        let mut reloaded = Session::with_gateway(config, gateway);
        let source = reloaded.load_snapshot();
        assert_eq!(source, Some(LoadSource::Local));
        assert_eq!(reloaded.journal().len(), 1);
        assert_eq!(reloaded.ledger_view("Kas").unwrap().len(), 1);
        assert_eq!(reloaded.list_accounts().len(), DEFAULT_ACCOUNTS.len());
    }

    #[test]
    fn test_remote_failure_saves_locally_with_full_snapshot() {
        let dir = scratch_dir("remote-500");
        let mut config = Config::default();
        config.storage.local_dir = dir.clone();

        let gateway = Gateway::new(Some(Box::new(FailingRemote)), LocalStore::new(dir.clone()));
        let mut session = Session::with_gateway(config, gateway);

        let location = session
            .post_journal_entry(Entry::new(date(2025, 1, 5), "Modal awal", 1_000_000.0, 0.0))
            .unwrap();
        assert!(matches!(location, SaveLocation::Local(_)));
        // the mutation survived the remote failure
        assert_eq!(session.journal().len(), 1);

        let written = std::fs::read_to_string(dir.join("snapshot.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        let snapshot = Snapshot::capture(session.journal(), &LedgerIndex::new());
        assert_eq!(value["jurnal"], snapshot.to_value()["jurnal"]);
        assert_eq!(
            value["accounts"].as_object().unwrap().len(),
            DEFAULT_ACCOUNTS.len()
        );
    }

    #[test]
    fn test_save_prefers_remote_when_available() {
        let dir = scratch_dir("remote-ok");
        let mut config = Config::default();
        config.storage.local_dir = dir.clone();

        let gateway = Gateway::new(
            Some(Box::new(MemoryRemote::default())),
            LocalStore::new(dir.clone()),
        );
        let mut session = Session::with_gateway(config, gateway);

        let location = session
            .post_journal_entry(Entry::new(date(2025, 1, 5), "Modal awal", 1_000_000.0, 0.0))
            .unwrap();
        assert_eq!(location, SaveLocation::Remote);
        assert!(!dir.join("snapshot.json").exists());
    }

    #[test]
    fn test_delete_and_clear_persist() {
        let mut session = local_session("delete");
        session
            .post_journal_entry(Entry::new(date(2025, 1, 1), "satu", 100.0, 0.0))
            .unwrap();
        session
            .post_journal_entry(Entry::new(date(2025, 1, 2), "dua", 200.0, 0.0))
            .unwrap();

        session.delete_journal_row(1).unwrap();
        assert_eq!(session.journal().len(), 1);
        assert!(session.delete_journal_row(5).is_err());

        session.clear_journal().unwrap();
        assert!(session.journal().is_empty());
    }

    #[test]
    fn test_ledger_views_and_unknown_account() {
        let mut session = local_session("ledger-view");
        session
            .post_ledger_entry("Kas", Entry::new(date(2025, 3, 1), "Setoran", 75_000.0, 0.0))
            .unwrap();

        let rows = session.ledger_view("Kas").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].saldo_debit, 75_000.0);
        assert_eq!(session.ledger_totals("Kas").unwrap(), (75_000.0, 0.0));

        assert!(session.ledger_view("Tidak ada").is_err());
    }

    #[test]
    fn test_period_view_over_journal() {
        let mut session = local_session("period");
        session
            .post_journal_entry(Entry::new(date(2024, 12, 1), "Modal awal", 500_000.0, 0.0))
            .unwrap();
        session
            .post_journal_entry(Entry::new(date(2025, 1, 15), "Pendapatan", 250_000.0, 0.0))
            .unwrap();

        let rows = session
            .period_view(None, date(2025, 1, 1), date(2025, 1, 31))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].saldo_debit, 500_000.0);
        assert_eq!(rows[1].saldo_debit, 750_000.0);
    }

    #[test]
    fn test_account_management_round_trip() {
        let mut session = local_session("accounts");
        session.create_account("Piutang usaha").unwrap();
        assert!(session.list_accounts().contains(&"Piutang usaha".to_string()));
        assert!(matches!(
            session.create_account(" piutang USAHA "),
            Err(SessionError::Core(CoreError::DuplicateAccount { .. }))
        ));

        session.remove_account("Piutang usaha").unwrap();
        assert!(!session.list_accounts().contains(&"Piutang usaha".to_string()));
    }
}
