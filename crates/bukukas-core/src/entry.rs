//! Transaction entry model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One transaction line.
///
/// Dates are stored as `YYYY-MM-DD` strings and parsed on demand, so rows
/// imported from an old or hand-edited backup always load; anything
/// unparsable is kept verbatim and reported as `None` by [`date_naive`].
///
/// [`date_naive`]: Entry::date_naive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Transaction date (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
    /// Free-text description (keterangan)
    #[serde(default)]
    pub memo: String,
    /// Debit amount in Rupiah
    #[serde(default)]
    pub debit: f64,
    /// Credit amount in Rupiah
    #[serde(default)]
    pub kredit: f64,
    /// Owning ledger account; absent for general-journal rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl Entry {
    /// Create a general-journal entry. Validation happens when the entry is
    /// appended to a store, not here.
    pub fn new(date: NaiveDate, memo: &str, debit: f64, kredit: f64) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            memo: memo.trim().to_string(),
            debit,
            kredit,
            account: None,
        }
    }

    /// Get the entry date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Signed amount of this entry (debit minus kredit)
    pub fn amount(&self) -> f64 {
        self.debit - self.kredit
    }

    /// Check if this is a debit entry
    pub fn is_debit(&self) -> bool {
        self.debit > 0.0
    }

    /// Check if this is a credit entry
    pub fn is_kredit(&self) -> bool {
        self.kredit > 0.0
    }

    /// Check the posting invariants: non-empty memo, non-negative amounts,
    /// and exactly one of debit/kredit strictly positive.
    pub fn validate(&self) -> CoreResult<()> {
        if self.memo.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "Keterangan (memo) must not be empty".to_string(),
            });
        }
        if !self.debit.is_finite()
            || !self.kredit.is_finite()
            || self.debit < 0.0
            || self.kredit < 0.0
        {
            return Err(CoreError::Validation {
                message: "Amounts must be non-negative numbers".to_string(),
            });
        }
        match (self.debit > 0.0, self.kredit > 0.0) {
            (true, false) | (false, true) => Ok(()),
            (true, true) => Err(CoreError::Validation {
                message: "An entry carries either a debit or a kredit, not both".to_string(),
            }),
            (false, false) => Err(CoreError::Validation {
                message: "Amount must be greater than zero".to_string(),
            }),
        }
    }

    /// Rebuild an entry from a loose JSON record.
    ///
    /// Missing fields default to empty/zero, unknown fields are ignored and
    /// amounts coerce from numbers or numeric strings. The Indonesian column
    /// names used by older backups (`Tanggal`, `Keterangan`, `Debit`,
    /// `Kredit`) are accepted as fallbacks. The result is not validated:
    /// imported rows are tolerated read-only.
    pub fn from_record(value: &serde_json::Value) -> Self {
        let text = |keys: &[&str]| -> String {
            keys.iter()
                .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
                .unwrap_or_default()
                .to_string()
        };
        let amount = |keys: &[&str]| -> f64 {
            keys.iter()
                .find_map(|k| value.get(*k))
                .map(bukukas_utils::coerce_amount)
                .unwrap_or(0.0)
        };

        let account = match text(&["account", "Akun"]) {
            s if s.trim().is_empty() => None,
            s => Some(s),
        };

        Self {
            date: text(&["date", "Tanggal"]),
            memo: text(&["memo", "Keterangan"]),
            debit: amount(&["debit", "Debit"]),
            kredit: amount(&["kredit", "Kredit"]),
            account,
        }
    }

    /// Serialize to a JSON record
    pub fn to_record(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_trims_memo() {
        let entry = Entry::new(date(2025, 1, 5), "  Modal awal ", 1_000_000.0, 0.0);
        assert_eq!(entry.memo, "Modal awal");
        assert_eq!(entry.date, "2025-01-05");
        assert!(entry.is_debit());
        assert!(!entry.is_kredit());
        assert_eq!(entry.amount(), 1_000_000.0);
    }

    #[test]
    fn test_date_naive() {
        let entry = Entry::new(date(2025, 3, 14), "Beli alat", 0.0, 50_000.0);
        assert_eq!(entry.date_naive(), Some(date(2025, 3, 14)));

        let mut broken = entry.clone();
        broken.date = "14/03/2025".to_string();
        assert_eq!(broken.date_naive(), None);
    }

    #[test]
    fn test_validate_accepts_single_leg() {
        assert!(Entry::new(date(2025, 1, 1), "Kas masuk", 500.0, 0.0)
            .validate()
            .is_ok());
        assert!(Entry::new(date(2025, 1, 1), "Kas keluar", 0.0, 500.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_memo() {
        let entry = Entry::new(date(2025, 1, 1), "   ", 500.0, 0.0);
        let err = entry.validate().unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ValidationError);
    }

    #[test]
    fn test_validate_rejects_mixed_and_zero_amounts() {
        assert!(Entry::new(date(2025, 1, 1), "Campur", 100.0, 50.0)
            .validate()
            .is_err());
        assert!(Entry::new(date(2025, 1, 1), "Kosong", 0.0, 0.0)
            .validate()
            .is_err());
        assert!(Entry::new(date(2025, 1, 1), "Negatif", -100.0, 0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_record_defaults_missing_fields() {
        let entry = Entry::from_record(&serde_json::json!({}));
        assert_eq!(entry.date, "");
        assert_eq!(entry.memo, "");
        assert_eq!(entry.debit, 0.0);
        assert_eq!(entry.kredit, 0.0);
        assert_eq!(entry.account, None);
    }

    #[test]
    fn test_from_record_ignores_unknown_fields() {
        let entry = Entry::from_record(&serde_json::json!({
            "date": "2025-02-01",
            "memo": "Pendapatan jasa",
            "debit": 0,
            "kredit": 750000,
            "warna": "hijau"
        }));
        assert_eq!(entry.memo, "Pendapatan jasa");
        assert_eq!(entry.kredit, 750_000.0);
    }

    #[test]
    fn test_from_record_reads_legacy_columns() {
        let entry = Entry::from_record(&serde_json::json!({
            "Tanggal": "2024-12-31",
            "Keterangan": "Beban listrik",
            "Debit": "150000",
            "Kredit": 0
        }));
        assert_eq!(entry.date, "2024-12-31");
        assert_eq!(entry.memo, "Beban listrik");
        assert_eq!(entry.debit, 150_000.0);
    }

    #[test]
    fn test_record_round_trip() {
        let entry = Entry::new(date(2025, 1, 5), "Modal awal", 1_000_000.0, 0.0);
        let back = Entry::from_record(&entry.to_record());
        assert_eq!(back, entry);
    }
}
