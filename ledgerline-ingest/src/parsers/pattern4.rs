//! Particulars-column statements with `DD-MM-YYYY` rows.
//!
//! Expected text rows:
//!   Tran Date    Chq No   Particulars                        Debit       Credit      Balance    Init. Br
//!   01-04-2024            UPI/P2M/409112345678/BIGBASKET     1,250.00                48,750.00  1234
//!                         NEFT/SALARY/ACME CORP
//!   02-04-2024            NEFT/N123456/ACME                              50,000.00   98,750.00  0456
//!
//! Wrapped narration text is printed *above* the row it belongs to, so a
//! non-dated line is held back and prefixed onto the next dated row.

use ledgerline_core::{TransactionRecord, TxnType, clean_narr, ddmmyyyy, trim};
use once_cell::sync::Lazy;
use regex::Regex;

use super::flush;

static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Tran Date|OPENING BALANCE").expect("Valid regex"));
static ROW_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]{2}-[0-9]{2}-[0-9]{4})").expect("Valid regex"));
static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{1,5}(?:,[0-9]{3})*\.[0-9]{2}\b").expect("Valid regex"));
static BRANCH_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]{3,4}\s*$").expect("Valid regex"));

/// Amounts printed left of this fraction of the row width (in characters)
/// sit in the debit column.
const DEBIT_COLUMN_CUTOFF: f64 = 0.6;

/// Parse particulars-column statement text into transactions.
pub fn parse_pattern4_text(text: &str) -> Vec<TransactionRecord> {
    let mut out = Vec::new();
    let mut cur: Option<TransactionRecord> = None;
    let mut pending: Option<String> = None;

    for line in text.lines() {
        if NOISE.is_match(line) {
            continue;
        }

        let Some(m) = ROW_DATE.captures(line).and_then(|c| c.get(1)) else {
            if !line.trim().is_empty() {
                let held = BRANCH_CODE.replace(line.trim(), "");
                if !held.is_empty() {
                    pending = Some(clean_narr(&held));
                }
            }
            continue;
        };

        flush(&mut out, cur.take());

        let after_date = line[m.end()..].trim();
        let amounts: Vec<&str> = AMOUNT.find_iter(after_date).map(|a| a.as_str()).collect();
        if amounts.len() < 2 {
            continue;
        }

        // Last amount is the running balance; the one before it is the transaction.
        let chosen = amounts[amounts.len() - 2];
        let amount: f64 = chosen.replace(',', "").parse().unwrap_or(0.0);

        let mut narration = after_date.to_string();
        for amt in &amounts {
            narration = narration.replacen(*amt, "", 1);
        }
        let mut narration = trim(&BRANCH_CODE.replace(&narration, ""));

        if let Some(prefix) = pending.take().filter(|p| !p.is_empty()) {
            narration = format!("{prefix} {narration}");
        }

        let position = after_date
            .find(chosen)
            .map_or(0, |at| after_date[..at].chars().count()) as f64;
        let width = after_date.chars().count() as f64;
        let txn_type = if position < width * DEBIT_COLUMN_CUTOFF {
            TxnType::Debit
        } else {
            TxnType::Credit
        };

        cur = Some(TransactionRecord::new(
            ddmmyyyy(m.as_str()),
            clean_narr(&narration),
            amount,
            txn_type,
        ));
    }

    flush(&mut out, cur);
    out
}
