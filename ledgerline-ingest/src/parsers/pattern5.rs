//! Numbered-row statements with signed amounts.
//!
//! Expected text rows:
//!   TRANSACTION DATE  VALUE DATE  TRANSACTION DETAILS  CHQ / REF NO.  DEBIT/CREDIT(₹)  BALANCE(₹)
//!   1  01 Jul 2024  01 Jul 2024  10:15 AM UPI-ZOMATO-ORDER  UPI-418312345678  -450.00  9,550.00
//!   418312345678
//!   ZOMATO ORDER
//!
//! A row owns every following non-blank line up to the next numbered row.
//! Identical (date, amount, type) rows are reported once.

use std::collections::HashSet;

use ledgerline_core::{TransactionRecord, TxnType, clean_narr, ddmmyyyy, to_float, trim};
use once_cell::sync::Lazy;
use regex::Regex;

static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)TRANSACTION DATE|^#").expect("Valid regex"));
static NUMBERED_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[0-9]+\s+([0-9]{2}\s+[0-9A-Za-z_]{3}\s+[0-9]{4})").expect("Valid regex"));
static SIGNED_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-])([0-9,]+\.[0-9]{2})").expect("Valid regex"));
static ROW_DATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]+\s+[0-9]{2}\s+[0-9A-Za-z_]{3}\s+[0-9]{4}\s+[0-9]{2}\s+[0-9A-Za-z_]{3}\s+[0-9]{4}\s+")
        .expect("Valid regex")
});
static ROW_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+[A-Za-z0-9-]+\s+([+-])[0-9,]+\.[0-9]{2}\s+[0-9,]+\.[0-9]{2}\s*$").expect("Valid regex")
});
static ROW_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}:[0-9]{2}\s*(AM|PM)?\s*").expect("Valid regex"));
static NOISE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{10,}$|^FCM-[0-9A-Za-z_]+$|^UPI-[0-9]+$|^[0-9]{2}:[0-9]{2}\s*(AM|PM)?$|^240701BCZ9JN$")
        .expect("Valid regex")
});
static ANY_SIGNED_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-][0-9,]+\.[0-9]{2}").expect("Valid regex"));
static ANY_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[0-9,]+\.[0-9]{2}\b").expect("Valid regex"));
static HYPHENATED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z]+-[A-Za-z0-9]+)\s+").expect("Valid regex"));
static SPLIT_REPAYMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"Repayme\s+nt").expect("Valid regex"));

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Collapse `UPI-1234 UPI-1234` style doubled tokens into one.
fn collapse_repeated_tokens(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = 0;

    while search < text.len() {
        let Some(caps) = HYPHENATED_TOKEN.captures_at(text, search) else {
            break;
        };
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let repeat_end = whole.end() + token.len();
        let repeated = text[whole.end()..].starts_with(token.as_str())
            && bytes.get(repeat_end).is_none_or(|b| !is_word_byte(*b));

        if repeated {
            out.push_str(&text[copied..token.end()]);
            copied = repeat_end;
            search = repeat_end;
        } else {
            // Token starts with an ASCII letter, so the next byte is a char boundary.
            search = whole.start() + 1;
        }
    }

    out.push_str(&text[copied..]);
    out
}

fn header_narration(line: &str) -> String {
    let line = ROW_DATES.replace(line, "");
    let line = ROW_TAIL.replace(&line, "");
    let line = ROW_TIME.replace(&line, "");
    line.trim().to_string()
}

fn continuation_narration(line: &str) -> Option<String> {
    let line = line.trim();
    if NOISE_LINE.is_match(line) {
        return None;
    }
    let line = ANY_SIGNED_AMOUNT.replace_all(line, "");
    let line = ANY_AMOUNT.replace_all(&line, "");
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_string())
}

fn merge_narration(parts: &[String]) -> String {
    let merged = collapse_repeated_tokens(&parts.join(" "));
    let merged = SPLIT_REPAYMENT.replace_all(&merged, "Repayment");
    trim(&merged)
}

/// Parse numbered-row statement text into transactions.
pub fn parse_pattern5_text(text: &str) -> Vec<TransactionRecord> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();
    let mut seen: HashSet<(String, u64, TxnType)> = HashSet::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if NOISE.is_match(line) {
            i += 1;
            continue;
        }

        let Some(date) = NUMBERED_ROW.captures(line).map(|c| ddmmyyyy(&c[1])) else {
            i += 1;
            continue;
        };

        let signed = SIGNED_AMOUNT.captures(line);
        let amount = signed.as_ref().and_then(|c| to_float(&c[2])).filter(|a| *a > 0.0);
        let txn_type = match signed.as_ref().map(|c| &c[1]) {
            Some("+") => TxnType::Credit,
            _ => TxnType::Debit,
        };

        let mut j = i + 1;
        while j < lines.len() && !NUMBERED_ROW.is_match(lines[j]) && !lines[j].trim().is_empty() {
            j += 1;
        }

        let mut parts: Vec<String> = Vec::new();
        let head = header_narration(line);
        if !head.is_empty() {
            parts.push(head);
        }
        parts.extend(lines[i + 1..j].iter().filter_map(|l| continuation_narration(l)));

        let narration = merge_narration(&parts);

        if let Some(amount) = amount {
            if !narration.is_empty() && seen.insert((date.clone(), amount.to_bits(), txn_type)) {
                out.push(TransactionRecord::new(date, clean_narr(&narration), amount, txn_type));
            }
        }

        i = j;
    }

    out
}
