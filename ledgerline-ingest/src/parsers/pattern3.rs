//! Entry-date statements with `DD-Mon-YYYY` rows and UPI style narrations.
//!
//! Expected text rows:
//!   Entry Date   Value Date   Description                            Chq No/Ref No   Debit    Balance
//!   01-Feb-2024  01-Feb-2024  UPI/DR/403212345678/ZOMATO/YESB/zomato  403212345678  250.00  750.00
//!
//! A row needs at least two decimal amounts (transaction + balance).

use ledgerline_core::{TransactionRecord, TxnType, clean_narr, ddmmyyyy, trim};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{append_narration, flush};

static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Entry Date|Opening Balance").expect("Valid regex"));
static ROW_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]{2}-[A-Za-z]{3}-[0-9]{4})").expect("Valid regex"));
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9]+\.[0-9]{2}\b").expect("Valid regex"));
static LEADING_NARRATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+[0-9]+\.[0-9]{2}").expect("Valid regex"));
static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{12}$").expect("Valid regex"));
static EMBEDDED_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{12}\b").expect("Valid regex"));
static EMBEDDED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}-[A-Za-z]{3}-[0-9]{4}").expect("Valid regex"));
static BARE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{12}$|^[0-9]{2}-[A-Za-z]{3}-[0-9]{4}$").expect("Valid regex"));

/// Remove every repeat of the first 12-digit reference, keeping its first occurrence.
fn keep_first_reference(narration: &str) -> String {
    let mut matches = EMBEDDED_REFERENCE.find_iter(narration);
    let Some(first) = matches.next() else {
        return narration.to_string();
    };

    let mut out = String::with_capacity(narration.len());
    let mut last = 0;
    for m in matches.filter(|m| m.as_str() == first.as_str()) {
        out.push_str(&narration[last..m.start()]);
        last = m.end();
    }
    out.push_str(&narration[last..]);
    out
}

fn row_narration(after_date: &str) -> String {
    let narration = LEADING_NARRATION
        .captures(after_date)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    // A trailing reference column is dropped outright.
    let parts: Vec<&str> = narration.split_whitespace().collect();
    let trailing_ref = parts.len() > 1 && REFERENCE.is_match(parts[parts.len() - 1]);
    let narration = if trailing_ref { parts[..parts.len() - 1].join(" ") } else { narration };

    let narration = EMBEDDED_DATE.replace_all(&narration, "");
    trim(&keep_first_reference(&narration))
}

/// Parse entry-date statement text into transactions.
pub fn parse_pattern3_text(text: &str) -> Vec<TransactionRecord> {
    let mut out = Vec::new();
    let mut cur: Option<TransactionRecord> = None;

    for line in text.lines() {
        if NOISE.is_match(line) {
            continue;
        }

        if let Some(m) = ROW_DATE.captures(line).and_then(|c| c.get(1)) {
            // Rows without a balance column (wrapped value dates, notices)
            // leave the open record in place for the lines that follow.
            let after_date = &line[m.end()..];
            let amounts: Vec<&str> = DECIMAL.find_iter(after_date).map(|a| a.as_str()).collect();
            if amounts.len() < 2 {
                continue;
            }
            let Ok(amount) = amounts[0].parse::<f64>() else {
                continue;
            };

            let narration = row_narration(after_date);
            let txn_type = if narration.contains("UPI/DR") { TxnType::Debit } else { TxnType::Credit };

            flush(&mut out, cur.take());
            cur = Some(TransactionRecord::new(
                ddmmyyyy(m.as_str()),
                clean_narr(&narration),
                amount,
                txn_type,
            ));
        } else if let Some(rec) = cur.as_mut() {
            let trimmed = line.trim();
            if trimmed.is_empty() || BARE_TOKEN.is_match(trimmed) {
                continue;
            }
            let cleaned = EMBEDDED_DATE.replace_all(trimmed, "");
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                append_narration(rec, &clean_narr(cleaned));
            }
        }
    }

    flush(&mut out, cur);
    out
}
