//! Withdrawal/deposit column statements with `DD-Mon-YYYY` rows.
//!
//! Expected text rows after PDF-to-text (columns separated by 3+ spaces):
//!   DATE        NARRATION                         WITHDRAWAL (DR.)   DEPOSIT (CR.)   BALANCE
//!   01-Jan-2024   ATM WTHDRL SECTOR 5   500.00   9,500.00
//!   03-Jan-2024   POS CAFE   120.00   0   9,380.00

use ledgerline_core::{TransactionRecord, TxnType, clean_narr, ddmmyyyy, to_float, trim};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{append_narration, flush};

static NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Opening Balance|DATE\s+NARRATION").expect("Valid regex"));
static ROW_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]{2}-[A-Za-z]{3}-[0-9]{4})").expect("Valid regex"));
static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{3,}").expect("Valid regex"));
static PLAIN_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]{2})?$").expect("Valid regex"));

fn plain_amount(col: &str) -> Option<f64> {
    if PLAIN_AMOUNT.is_match(col) { to_float(col) } else { None }
}

fn row_record(date: String, cols: &[String]) -> Option<TransactionRecord> {
    let narration = cols.first().map(String::as_str).unwrap_or("");

    let (withdrawal, deposit) = match cols.len() {
        // narration, amount [, balance]: direction comes from narration keywords
        2 | 3 => {
            let amount = to_float(&cols[1]);
            if narration.contains("WTHDRL") || narration.contains("DR-RRN") {
                (amount, None)
            } else if narration.contains("DEPOSIT") || narration.contains("CR-RRN") {
                (None, amount)
            } else {
                (None, None)
            }
        }
        // narration, withdrawal, deposit, balance
        4 => (plain_amount(&cols[1]), plain_amount(&cols[2])),
        _ => (None, None),
    };

    let (amount, txn_type) = match (withdrawal.filter(|a| *a != 0.0), deposit.filter(|a| *a != 0.0)) {
        (Some(w), _) => (w, TxnType::Debit),
        (None, Some(d)) => (d, TxnType::Credit),
        (None, None) => return None,
    };

    Some(TransactionRecord::new(date, clean_narr(narration), amount, txn_type))
}

/// Parse withdrawal/deposit column statement text into transactions.
pub fn parse_pattern1_text(text: &str) -> Vec<TransactionRecord> {
    let mut out = Vec::new();
    let mut cur: Option<TransactionRecord> = None;

    for line in text.lines() {
        if NOISE.is_match(line) {
            continue;
        }

        if let Some(m) = ROW_DATE.captures(line).and_then(|c| c.get(1)) {
            flush(&mut out, cur.take());

            let date = ddmmyyyy(m.as_str());
            let cols: Vec<String> = COLUMN_GAP
                .split(&line[m.end()..])
                .map(trim)
                .filter(|c| !c.is_empty())
                .collect();

            cur = row_record(date, &cols);
        } else if let Some(rec) = cur.as_mut() {
            if !line.trim().is_empty() {
                append_narration(rec, &clean_narr(line));
            }
        }
    }

    flush(&mut out, cur);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_keyword_and_positional_rows() {
        let text = r#"
DATE        NARRATION                     CHQ/REF NO      WITHDRAWAL (DR.)   DEPOSIT (CR.)   BALANCE
            Opening Balance                                                                  1,000.00
01-Jan-2024   WTHDRL ABC   500.00
02-Jan-2024   NEFT CR-RRN 4411 ACME PAYROLL   25,000.00   25,500.00
              SALARY JAN
03-Jan-2024   POS CAFE   120.00   0   25,380.00
"#;

        let txns = parse_pattern1_text(text);
        assert_eq!(txns.len(), 3);

        assert_eq!(txns[0].date, "01/01/2024");
        assert_eq!(txns[0].narration, "WTHDRL ABC");
        assert_eq!(txns[0].amount, 500.00);
        assert_eq!(txns[0].txn_type, TxnType::Debit);

        assert_eq!(txns[1].narration, "NEFT CR-RRN 4411 ACME PAYROLL SALARY JAN");
        assert_eq!(txns[1].amount, 25_000.00);
        assert_eq!(txns[1].txn_type, TxnType::Credit);

        assert_eq!(txns[2].date, "03/01/2024");
        assert_eq!(txns[2].narration, "POS CAFE");
        assert_eq!(txns[2].amount, 120.00);
        assert_eq!(txns[2].txn_type, TxnType::Debit);
    }

    #[test]
    fn test_deposit_column_when_withdrawal_blank() {
        let text = "05-Feb-2024   CHEQUE DEPOSIT   0   750.50   10,750.50\n";
        let txns = parse_pattern1_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 750.50);
        assert_eq!(txns[0].txn_type, TxnType::Credit);
    }

    #[test]
    fn test_row_without_direction_is_dropped_with_its_continuations() {
        let text = r#"
01-Jan-2024   WTHDRL ABC   500.00
04-Jan-2024   MISC ENTRY   10.00   25,370.00
              SHOULD NOT ATTACH
05-Jan-2024   UPI DR-RRN 99 SHOP   42.00   25,328.00
"#;
        let txns = parse_pattern1_text(text);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].narration, "WTHDRL ABC");
        assert_eq!(txns[1].narration, "UPI DR-RRN 99 SHOP");
        assert!(txns.iter().all(|t| !t.narration.contains("SHOULD NOT ATTACH")));
    }

    #[test]
    fn test_lines_before_first_row_are_ignored() {
        let text = "ACCOUNT SUMMARY\nsome preamble\n01-Jan-2024   WTHDRL ABC   500.00\n";
        let txns = parse_pattern1_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].narration, "WTHDRL ABC");
    }
}
