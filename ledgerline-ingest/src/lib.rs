//! ledgerline-ingest: statement layout detection and the per-layout
//! extractors that turn PDF-to-text dumps into transaction records.

pub mod detect;
pub mod dispatch;
pub mod parsers;

pub use detect::{StatementPattern, detect_pattern};
pub use dispatch::{Extractor, ParsedStatement, extractor_for, parse_statement, parse_statement_detailed};
pub use ledgerline_core::{TransactionRecord, TxnType};
