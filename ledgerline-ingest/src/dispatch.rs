//! Route a statement to the extractor for its detected layout.

use ledgerline_core::TransactionRecord;
use serde::Serialize;

use crate::detect::{StatementPattern, detect_pattern};
use crate::parsers;

/// Signature shared by every layout extractor.
pub type Extractor = fn(&str) -> Vec<TransactionRecord>;

/// Extractor registered for `pattern`, if any.
pub fn extractor_for(pattern: StatementPattern) -> Option<Extractor> {
    let extractor: Extractor = match pattern {
        StatementPattern::Pattern1 => parsers::parse_pattern1_text,
        StatementPattern::Pattern2 => parsers::parse_pattern2_text,
        StatementPattern::Pattern3 => parsers::parse_pattern3_text,
        StatementPattern::Pattern4 => parsers::parse_pattern4_text,
        StatementPattern::Pattern5 => parsers::parse_pattern5_text,
        StatementPattern::Pattern6 => parsers::parse_pattern6_text,
        StatementPattern::Unknown => return None,
    };
    Some(extractor)
}

/// Extraction result together with the layout that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedStatement {
    pub pattern: StatementPattern,
    pub transactions: Vec<TransactionRecord>,
}

/// Detect the layout of `text` and run its extractor.
///
/// `label` (usually the file name) only appears in diagnostics. Unrecognized
/// layouts log a warning and yield no transactions.
pub fn parse_statement_detailed(text: &str, label: &str) -> ParsedStatement {
    let pattern = detect_pattern(text);
    tracing::debug!(file = label, %pattern, "detected statement layout");

    let Some(extract) = extractor_for(pattern) else {
        tracing::warn!("Unknown pattern: {} for file: {}", pattern, label);
        return ParsedStatement { pattern, transactions: Vec::new() };
    };

    let transactions = extract(text);
    tracing::debug!(file = label, %pattern, count = transactions.len(), "extracted transactions");

    ParsedStatement { pattern, transactions }
}

/// Detect and extract, returning only the transactions.
pub fn parse_statement(text: &str, label: &str) -> Vec<TransactionRecord> {
    parse_statement_detailed(text, label).transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerline_core::TxnType;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        (out, logs.contents())
    }

    #[test]
    fn test_every_known_pattern_has_an_extractor() {
        for pattern in StatementPattern::KNOWN {
            assert!(extractor_for(pattern).is_some(), "{pattern} has no extractor");
        }
        assert!(extractor_for(StatementPattern::Unknown).is_none());
    }

    #[test]
    fn test_pattern1_end_to_end() {
        let text = "DATE   NARRATION   WITHDRAWAL (DR.)   DEPOSIT (CR.)   BALANCE\n\
                    01-Jan-2024   WTHDRL ABC   500.00\n";

        let parsed = parse_statement_detailed(text, "1.txt");
        assert_eq!(parsed.pattern, StatementPattern::Pattern1);
        assert_eq!(
            parsed.transactions,
            vec![TransactionRecord::new("01/01/2024", "WTHDRL ABC", 500.00, TxnType::Debit)]
        );
    }

    #[test]
    fn test_unknown_layout_yields_nothing() {
        let parsed = parse_statement_detailed("just some prose\nwith no dates", "notes.txt");
        assert_eq!(parsed.pattern, StatementPattern::Unknown);
        assert!(parsed.transactions.is_empty());
        assert!(parse_statement("", "empty.txt").is_empty());
    }

    #[test]
    fn test_unknown_layout_emits_one_warning() {
        let (parsed, logs) =
            with_captured_logs(|| parse_statement_detailed("just some prose\nwith no dates", "notes.txt"));

        assert!(parsed.transactions.is_empty());
        assert_eq!(logs.matches("Unknown pattern: unknown for file: notes.txt").count(), 1);
        assert_eq!(logs.matches("WARN").count(), 1);
    }

    #[test]
    fn test_known_layout_is_silent_at_warn() {
        let text = "DATE   NARRATION   WITHDRAWAL (DR.)   DEPOSIT (CR.)   BALANCE\n\
                    01-Jan-2024   WTHDRL ABC   500.00\n";
        let (parsed, logs) = with_captured_logs(|| parse_statement_detailed(text, "1.txt"));

        assert_eq!(parsed.transactions.len(), 1);
        assert!(logs.is_empty());
    }
}
