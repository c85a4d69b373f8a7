//! ledgerline-core: transaction record types and text normalization helpers
//! shared by the statement extractors.

pub mod record;
pub mod text;

pub use record::{TransactionRecord, TxnType};
pub use text::{clean_narr, ddmmyyyy, to_float, trim};
