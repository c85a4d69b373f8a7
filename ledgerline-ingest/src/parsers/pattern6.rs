//! Withdrawal/deposit "Amt." statements with `DD/MM/YY` rows.
//!
//! Expected text rows:
//!   Date      Narration                         Chq./Ref.No.       Value Dt   Withdrawal Amt.   Closing Balance
//!   01/07/24  UPI-SWIGGY-SWIGGY8@YBL-YESB000001  0000418312345678  01/07/24   349.00            9,651.00
//!             -PAYMENT FROM PHONE
//!
//! Wrapped narration continues mid-token on the next line, so continuation
//! text is glued on without a separator.

use ledgerline_core::{TransactionRecord, TxnType, ddmmyyyy, trim};
use once_cell::sync::Lazy;
use regex::Regex;

use super::flush;

static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Date\s+Narration").expect("Valid regex"));
static ROW_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]{2}/[0-9]{2}/[0-9]{2})").expect("Valid regex"));
static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{1,3}(?:,[0-9]{3})*\.[0-9]{2}").expect("Valid regex"));
static ZERO_PADDED_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b0+[0-9]{12,}\b").expect("Valid regex"));
static SHORT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}/[0-9]{2}/[0-9]{2}").expect("Valid regex"));

fn strip_refs_and_dates(text: &str) -> String {
    let text = ZERO_PADDED_REF.replace_all(text, "");
    let text = SHORT_DATE.replace_all(&text, "");
    trim(&text)
}

/// Parse "Amt." column statement text into (debit) transactions.
pub fn parse_pattern6_text(text: &str) -> Vec<TransactionRecord> {
    let mut out = Vec::new();
    let mut cur: Option<TransactionRecord> = None;

    for line in text.lines() {
        if NOISE.is_match(line) {
            continue;
        }

        if let Some(m) = ROW_DATE.captures(line).and_then(|c| c.get(1)) {
            flush(&mut out, cur.take());

            let after_date = line[m.end()..].trim();
            let amount = AMOUNT
                .find(after_date)
                .and_then(|a| a.as_str().replace(',', "").parse::<f64>().ok());
            let narration = strip_refs_and_dates(&AMOUNT.replace_all(after_date, ""));

            cur = amount
                .filter(|_| !narration.is_empty())
                .map(|amount| TransactionRecord::new(ddmmyyyy(m.as_str()), narration, amount, TxnType::Debit));
        } else if let Some(rec) = cur.as_mut() {
            if line.trim().is_empty() {
                continue;
            }
            // No separator: wrapped lines continue the previous token.
            rec.narration.push_str(&strip_refs_and_dates(line));
        }
    }

    flush(&mut out, cur);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rows_and_glues_continuations() {
        let text = r#"
Date      Narration                                         Chq./Ref.No.        Value Dt   Withdrawal Amt.   Deposit Amt.   Closing Balance
01/07/24  UPI-SWIGGY-SWIGGY8@YBL-YESB0000001-418300000001  0000418312345678  01/07/24  349.00    9,651.00
          -PAYMENT FROM PHONE
03/07/24  NEFT DR-HDFC0000001-ACME LTD  0000000418399999999  03/07/24  1,200.00    8,451.00
"#;

        let txns = parse_pattern6_text(text);
        assert_eq!(txns.len(), 2);

        assert_eq!(txns[0].date, "01/07/2024");
        assert_eq!(
            txns[0].narration,
            "UPI-SWIGGY-SWIGGY8@YBL-YESB0000001-418300000001-PAYMENT FROM PHONE"
        );
        assert_eq!(txns[0].amount, 349.00);
        assert_eq!(txns[0].txn_type, TxnType::Debit);

        assert_eq!(txns[1].date, "03/07/2024");
        assert_eq!(txns[1].narration, "NEFT DR-HDFC0000001-ACME LTD");
        assert_eq!(txns[1].amount, 1200.00);
    }

    #[test]
    fn test_row_with_only_amounts_is_dropped() {
        let text = "05/07/24  349.00  9,302.00\n          ORPHAN TEXT\n";
        assert!(parse_pattern6_text(text).is_empty());
    }

    #[test]
    fn test_continuation_refs_and_dates_are_stripped() {
        let text = "06/07/24  IMPS ACME  10.00  9,292.00\n   /REF 0000123456789012 ON 06/07/24\n";
        let txns = parse_pattern6_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].narration, "IMPS ACME/REF ON");
    }
}
