//! bukukas entry point
//!
//! A thin command-line collaborator around the session facade: one
//! subcommand per user action, output rendered the way the book is meant
//! to be read (DD-MM-YYYY dates, whole-Rupiah amounts, a TOTAL row).

use anyhow::Context;
use bukukas_config::Config;
use bukukas_core::{BalanceRow, Entry};
use bukukas_session::Session;
use bukukas_store::{LoadSource, SaveLocation};
use bukukas_utils::format_rupiah;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bukukas")]
#[command(version = "0.1.0")]
#[command(about = "Pembukuan sederhana: jurnal umum, buku besar dan backup otomatis", long_about = None)]
struct Args {
    /// Configuration file path; environment variables apply on top
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a transaction in the general journal
    Add {
        /// Transaction date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Description (keterangan)
        #[arg(long)]
        memo: String,
        /// Debit amount in Rupiah
        #[arg(long, default_value_t = 0.0)]
        debit: f64,
        /// Kredit amount in Rupiah
        #[arg(long, default_value_t = 0.0)]
        kredit: f64,
    },
    /// Record a transaction in a ledger account
    Post {
        /// Target account (created on first use)
        #[arg(long)]
        account: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        memo: String,
        #[arg(long, default_value_t = 0.0)]
        debit: f64,
        #[arg(long, default_value_t = 0.0)]
        kredit: f64,
    },
    /// Show the general journal with running balances
    Journal,
    /// Show one ledger account with running balances
    Ledger { account: String },
    /// Show a period ledger with its opening balance
    Period {
        /// Account to report on; the general journal when omitted
        #[arg(long)]
        account: Option<String>,
        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day of the period, inclusive (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },
    /// Delete one journal row (1-indexed, as displayed)
    Delete { row: usize },
    /// Delete every journal row
    Clear,
    /// List ledger accounts
    Accounts,
    /// Create a new ledger account
    NewAccount { name: String },
    /// Remove a ledger account
    RemoveAccount { name: String },
    /// Force-save the current snapshot
    Backup,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path.clone()).context("failed to load configuration")?,
        None => {
            let config = Config::from_env();
            config.validate()?;
            config
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    let mut session = Session::new(config);
    match session.load_snapshot() {
        Some(LoadSource::Remote) => log::info!("snapshot loaded from GitHub"),
        Some(LoadSource::Local) => log::info!("snapshot loaded from local backup"),
        None => log::info!("no snapshot found, starting a fresh book"),
    }

    match args.command {
        Command::Add {
            date,
            memo,
            debit,
            kredit,
        } => {
            let location = session.post_journal_entry(Entry::new(date, &memo, debit, kredit))?;
            println!("Transaksi berhasil ditambahkan ke Jurnal Umum!");
            report_save(&location);
        }
        Command::Post {
            account,
            date,
            memo,
            debit,
            kredit,
        } => {
            let location =
                session.post_ledger_entry(&account, Entry::new(date, &memo, debit, kredit))?;
            println!("Transaksi ditambahkan ke akun {account}!");
            report_save(&location);
        }
        Command::Journal => {
            print_rows(
                "Jurnal Umum",
                &session.journal_view(),
                Some(session.journal_totals()),
            );
        }
        Command::Ledger { account } => {
            let rows = session.ledger_view(&account)?;
            let totals = session.ledger_totals(&account)?;
            print_rows(&format!("Buku Besar: {account}"), &rows, Some(totals));
        }
        Command::Period { account, from, to } => {
            let rows = session.period_view(account.as_deref(), from, to)?;
            let title = match &account {
                Some(name) => format!("Buku Besar: {name} ({from} s/d {to})"),
                None => format!("Jurnal Umum ({from} s/d {to})"),
            };
            print_rows(&title, &rows, None);
        }
        Command::Delete { row } => {
            let location = session.delete_journal_row(row)?;
            println!("Baris {row} berhasil dihapus!");
            report_save(&location);
        }
        Command::Clear => {
            let location = session.clear_journal()?;
            println!("Semua baris jurnal berhasil dihapus!");
            report_save(&location);
        }
        Command::Accounts => {
            for name in session.list_accounts() {
                println!("{name}");
            }
        }
        Command::NewAccount { name } => {
            let location = session.create_account(&name)?;
            println!("Akun {name} dibuat.");
            report_save(&location);
        }
        Command::RemoveAccount { name } => {
            let location = session.remove_account(&name)?;
            println!("Akun {name} dihapus.");
            report_save(&location);
        }
        Command::Backup => {
            let location = session.save_snapshot()?;
            report_save(&location);
        }
    }

    Ok(())
}

fn report_save(location: &SaveLocation) {
    match location {
        SaveLocation::Remote => println!("Backup tersimpan di GitHub."),
        SaveLocation::Local(path) => println!(
            "Backup disimpan secara lokal ({}). (GitHub tidak tersedia)",
            path.display()
        ),
    }
}

/// Display a stored date as DD-MM-YYYY, keeping unparsable text verbatim.
fn fmt_tgl(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d-%m-%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn print_rows(title: &str, rows: &[BalanceRow], totals: Option<(f64, f64)>) {
    println!("{title}");
    if rows.is_empty() {
        println!("Belum ada data transaksi.");
        return;
    }

    println!(
        "{:>3}  {:<12} {:<28} {:>16} {:>16} {:>16} {:>16}",
        "No", "Tanggal", "Keterangan", "Debit", "Kredit", "Saldo Debit", "Saldo Kredit"
    );
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<12} {:<28} {:>16} {:>16} {:>16} {:>16}",
            i + 1,
            fmt_tgl(&row.date),
            row.memo,
            format_rupiah(row.debit),
            format_rupiah(row.kredit),
            format_rupiah(row.saldo_debit),
            format_rupiah(row.saldo_kredit)
        );
    }
    if let Some((debit, kredit)) = totals {
        println!(
            "{:>3}  {:<12} {:<28} {:>16} {:>16}",
            "",
            "",
            "TOTAL",
            format_rupiah(debit),
            format_rupiah(kredit)
        );
    }
}
