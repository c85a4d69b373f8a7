//! Transaction record emitted by every statement extractor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money movement relative to the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    Debit,
    Credit,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Debit => "Debit",
            TxnType::Credit => "Credit",
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconstructed statement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Canonical `DD/MM/YYYY` when the source date was recognized.
    pub date: String,
    pub narration: String,
    /// Always positive; direction lives in `txn_type`.
    pub amount: f64,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
}

impl TransactionRecord {
    pub fn new(date: impl Into<String>, narration: impl Into<String>, amount: f64, txn_type: TxnType) -> Self {
        Self {
            date: date.into(),
            narration: narration.into(),
            amount,
            txn_type,
        }
    }

    /// Calendar date, if `date` is canonical and names a real day.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%d/%m/%Y").ok()
    }

    /// Records without a positive amount never leave an extractor.
    pub fn has_amount(&self) -> bool {
        self.amount > 0.0
    }
}
