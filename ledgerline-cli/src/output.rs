//! Rendering of per-file extraction results.

use anyhow::{Context, Result};
use ledgerline_core::TransactionRecord;
use std::collections::BTreeMap;

use crate::config::OutputFormat;

/// Transactions extracted from one input file.
#[derive(Debug, Clone)]
pub struct FileResult {
    /// Base name of the input, used as the JSON key / CSV `file` column
    pub name: String,
    pub transactions: Vec<TransactionRecord>,
}

pub fn render(results: &[FileResult], format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(results, pretty),
        OutputFormat::Csv => render_csv(results),
    }
}

/// `[{"<file>": [records...]}, ...]`, one single-key object per input file.
pub fn render_json(results: &[FileResult], pretty: bool) -> Result<String> {
    let doc: Vec<BTreeMap<&str, &[TransactionRecord]>> = results
        .iter()
        .map(|r| BTreeMap::from([(r.name.as_str(), r.transactions.as_slice())]))
        .collect();

    let s = if pretty {
        serde_json::to_string_pretty(&doc)
    } else {
        serde_json::to_string(&doc)
    };
    s.context("serialize transactions")
}

pub fn render_csv(results: &[FileResult]) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        wtr.write_record(["file", "date", "narration", "amount", "type"])
            .context("write csv header")?;

        for r in results {
            for t in &r.transactions {
                let amount = format!("{:.2}", t.amount);
                wtr.write_record([
                    r.name.as_str(),
                    t.date.as_str(),
                    t.narration.as_str(),
                    amount.as_str(),
                    t.txn_type.as_str(),
                ])
                .with_context(|| format!("write csv row for {}", r.name))?;
            }
        }
        wtr.flush().context("flush csv")?;
    }
    String::from_utf8(buf).context("csv output is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerline_core::TxnType;

    fn sample() -> Vec<FileResult> {
        vec![
            FileResult {
                name: "1.txt".to_string(),
                transactions: vec![
                    TransactionRecord::new("01/01/2024", "WTHDRL ABC", 500.0, TxnType::Debit),
                    TransactionRecord::new("02/01/2024", "NEFT, ACME", 25_000.5, TxnType::Credit),
                ],
            },
            FileResult {
                name: "empty.txt".to_string(),
                transactions: Vec::new(),
            },
        ]
    }

    #[test]
    fn test_json_shape() {
        let s = render_json(&sample(), false).unwrap();
        let v: serde_json::Value = serde_json::from_str(&s).unwrap();

        let files = v.as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0]["1.txt"][0]["type"], "Debit");
        assert_eq!(files[0]["1.txt"][1]["amount"], 25_000.5);
        assert_eq!(files[1]["empty.txt"], serde_json::json!([]));
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let s = render_json(&sample(), true).unwrap();
        assert!(s.starts_with("[\n  {\n    \"1.txt\": ["));
    }

    #[test]
    fn test_csv_rows() {
        let s = render(&sample(), OutputFormat::Csv, true).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(
            lines,
            vec![
                "file,date,narration,amount,type",
                "1.txt,01/01/2024,WTHDRL ABC,500.00,Debit",
                "1.txt,02/01/2024,\"NEFT, ACME\",25000.50,Credit",
            ]
        );
    }
}
