//! Transfer-style statements with `D[D] Mon YYYY` rows.
//!
//! Expected text rows (columns separated by 2+ spaces):
//!   Txn Date     Value Date    Description                  Ref No./Cheque No.            Debit      Balance
//!   5 Jan 2024   5 Jan 2024    TO TRANSFER-UPI/DR/4005/ACME   TRANSFER TO   4897691162093   1,250.00   48,750.00
//!
//! Every row is a debit; the first grouped numeral column is the amount.

use ledgerline_core::{TransactionRecord, TxnType, clean_narr, ddmmyyyy, to_float, trim};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{append_narration, flush};

static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Txn Date").expect("Valid regex"));
static ROW_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([0-9]{1,2}\s+[0-9A-Za-z_]{3}\s+[0-9]{4})").expect("Valid regex"));
static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("Valid regex"));
static GROUPED_NUMERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(,[0-9]{3})*(\.[0-9]+)?$").expect("Valid regex"));
static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{13}$").expect("Valid regex"));
static EMBEDDED_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{13}\b").expect("Valid regex"));

const TRANSFER_MARKER: &str = "TRANSFER TO";

fn is_narration_column(col: &str) -> bool {
    !GROUPED_NUMERAL.is_match(col) && col != TRANSFER_MARKER && !REFERENCE.is_match(col)
}

/// Parse transfer-style statement text into (debit) transactions.
pub fn parse_pattern2_text(text: &str) -> Vec<TransactionRecord> {
    let mut out = Vec::new();
    let mut cur: Option<TransactionRecord> = None;

    for line in text.lines() {
        if NOISE.is_match(line) {
            continue;
        }

        if let Some(m) = ROW_DATE.captures(line).and_then(|c| c.get(1)) {
            flush(&mut out, cur.take());

            let date = ddmmyyyy(m.as_str());
            // Columns include both date columns, hence the skip(2) below.
            let cols: Vec<String> = COLUMN_GAP
                .split(line)
                .map(trim)
                .filter(|c| !c.is_empty())
                .collect();

            let amount = cols
                .iter()
                .find(|c| GROUPED_NUMERAL.is_match(c))
                .and_then(|c| to_float(c));

            let narration = cols
                .iter()
                .skip(2)
                .filter(|c| is_narration_column(c))
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");

            cur = amount.map(|amount| {
                TransactionRecord::new(date, clean_narr(&narration), amount, TxnType::Debit)
            });
        } else if let Some(rec) = cur.as_mut() {
            let stripped = EMBEDDED_REFERENCE.replace_all(line.trim(), "");
            let stripped = stripped.trim();
            if !stripped.is_empty() {
                append_narration(rec, &clean_narr(stripped));
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
    fn test_parses_transfer_rows() {
        let text = r#"
Txn Date     Value Date    Description                             Ref No./Cheque No.           Debit      Credit     Balance
5 Jan 2024   5 Jan 2024    TO TRANSFER-UPI/DR/400512345678/ACME   TRANSFER TO   4897691162093   1,250.00   48,750.00
                           STORES/YESB/acme@ybl/Payment 4897691162093
12 Jan 2024  12 Jan 2024   ATM WDL SECTOR 5   2,000.00   46,750.00
"#;

        let txns = parse_pattern2_text(text);
        assert_eq!(txns.len(), 2);

        assert_eq!(txns[0].date, "05/01/2024");
        assert_eq!(
            txns[0].narration,
            "TO TRANSFER-UPI/DR/400512345678/ACME STORES/YESB/acme@ybl/Payment"
        );
        assert_eq!(txns[0].amount, 1250.00);
        assert_eq!(txns[0].txn_type, TxnType::Debit);

        assert_eq!(txns[1].date, "12/01/2024");
        assert_eq!(txns[1].narration, "ATM WDL SECTOR 5");
        assert_eq!(txns[1].amount, 2000.00);
        assert_eq!(txns[1].txn_type, TxnType::Debit);
    }

    #[test]
    fn test_row_without_amount_is_dropped() {
        let text = r#"
15 Jan 2024   15 Jan 2024   REVERSAL PENDING
              NOTE FOR REVERSAL
16 Jan 2024   16 Jan 2024   BILLPAY ELECTRICITY   780   45,970.00
"#;
        let txns = parse_pattern2_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].narration, "BILLPAY ELECTRICITY");
        assert_eq!(txns[0].amount, 780.0);
    }

    #[test]
    fn test_continuation_only_reference_adds_nothing() {
        let text = "5 Jan 2024   5 Jan 2024   NEFT ACME   10.00   90.00\n   4897691162093\n";
        let txns = parse_pattern2_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].narration, "NEFT ACME");
    }
}
