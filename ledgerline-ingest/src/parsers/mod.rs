//! Line-oriented extractors, one per statement layout.
//!
//! Each extractor is a pure function from statement text to records. The
//! in-progress record is an explicit `Option` threaded through the line scan
//! and flushed when the next dated row starts or input ends.

pub mod pattern1;
pub mod pattern2;
pub mod pattern3;
pub mod pattern4;
pub mod pattern5;
pub mod pattern6;

pub use pattern1::parse_pattern1_text;
pub use pattern2::parse_pattern2_text;
pub use pattern3::parse_pattern3_text;
pub use pattern4::parse_pattern4_text;
pub use pattern5::parse_pattern5_text;
pub use pattern6::parse_pattern6_text;

use ledgerline_core::TransactionRecord;

/// Finalize the in-progress record. Records without a positive amount are dropped.
pub(crate) fn flush(out: &mut Vec<TransactionRecord>, cur: Option<TransactionRecord>) {
    if let Some(rec) = cur.filter(TransactionRecord::has_amount) {
        out.push(rec);
    }
}

/// Append continuation text to a narration, space separated.
pub(crate) fn append_narration(rec: &mut TransactionRecord, text: &str) {
    if text.is_empty() {
        return;
    }
    if !rec.narration.is_empty() {
        rec.narration.push(' ');
    }
    rec.narration.push_str(text);
}
