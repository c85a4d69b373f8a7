//! Statement layout detection.
//!
//! Layouts are recognized by keyword co-occurrence on the lowercased text,
//! sometimes combined with a date-shape probe. Signatures overlap, so the
//! tables below are evaluated strictly in order: the primary pass first,
//! then the looser fallback pass. First match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The closed set of statement layouts the extractors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementPattern {
    Pattern1,
    Pattern2,
    Pattern3,
    Pattern4,
    Pattern5,
    Pattern6,
    Unknown,
}

impl StatementPattern {
    pub const KNOWN: [StatementPattern; 6] = [
        StatementPattern::Pattern1,
        StatementPattern::Pattern2,
        StatementPattern::Pattern3,
        StatementPattern::Pattern4,
        StatementPattern::Pattern5,
        StatementPattern::Pattern6,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementPattern::Pattern1 => "pattern1",
            StatementPattern::Pattern2 => "pattern2",
            StatementPattern::Pattern3 => "pattern3",
            StatementPattern::Pattern4 => "pattern4",
            StatementPattern::Pattern5 => "pattern5",
            StatementPattern::Pattern6 => "pattern6",
            StatementPattern::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StatementPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Date-shape probes, applied to lowercased text.
static DASH_MON_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}-[a-z]{3}-[0-9]{4}").expect("Valid regex"));
static SPACED_MON_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{1,2}\s+[0-9A-Za-z_]{3}\s+[0-9]{4}").expect("Valid regex"));
static DASH_NUM_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}-[0-9]{2}-[0-9]{4}").expect("Valid regex"));
static SLASH_SHORT_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}/[0-9]{2}/[0-9]{2}").expect("Valid regex"));
// Anchored at the start of the whole document, not per line.
static LEADING_NUMBERED_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[0-9]+\s+[0-9]{2}\s+[0-9A-Za-z_]{3}\s+[0-9]{4}").expect("Valid regex"));

/// Lowercased document plus the probes the signatures are written against.
struct Probe {
    content: String,
}

impl Probe {
    fn new(text: &str) -> Self {
        Self { content: text.to_lowercase() }
    }

    fn has(&self, needle: &str) -> bool {
        self.content.contains(needle)
    }

    fn has_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|n| self.has(n))
    }

    fn dash_mon_date(&self) -> bool {
        DASH_MON_DATE.is_match(&self.content)
    }

    fn spaced_mon_date(&self) -> bool {
        SPACED_MON_DATE.is_match(&self.content)
    }

    fn dash_num_date(&self) -> bool {
        DASH_NUM_DATE.is_match(&self.content)
    }

    fn slash_short_date(&self) -> bool {
        SLASH_SHORT_DATE.is_match(&self.content)
    }

    fn starts_with_numbered_row(&self) -> bool {
        LEADING_NUMBERED_ROW.is_match(&self.content)
    }
}

struct Signature {
    pattern: StatementPattern,
    matches: fn(&Probe) -> bool,
}

const PRIMARY: &[Signature] = &[
    Signature { pattern: StatementPattern::Pattern1, matches: pattern1_primary },
    Signature { pattern: StatementPattern::Pattern2, matches: pattern2_primary },
    Signature { pattern: StatementPattern::Pattern3, matches: pattern3_primary },
    Signature { pattern: StatementPattern::Pattern4, matches: pattern4_primary },
    Signature { pattern: StatementPattern::Pattern5, matches: pattern5_primary },
    Signature { pattern: StatementPattern::Pattern6, matches: pattern6_primary },
];

const FALLBACK: &[Signature] = &[
    Signature { pattern: StatementPattern::Pattern2, matches: pattern2_fallback },
    Signature { pattern: StatementPattern::Pattern3, matches: pattern3_fallback },
    Signature { pattern: StatementPattern::Pattern1, matches: pattern1_fallback },
    Signature { pattern: StatementPattern::Pattern4, matches: pattern4_fallback },
    Signature { pattern: StatementPattern::Pattern5, matches: pattern5_fallback },
    Signature { pattern: StatementPattern::Pattern6, matches: pattern6_fallback },
];

fn pattern1_primary(p: &Probe) -> bool {
    p.has_all(&["date", "narration", "withdrawal (dr.)", "deposit (cr.)"])
        || (p.has_all(&["date", "narration", "withdrawal", "deposit", "balance"]) && p.dash_mon_date())
}

fn pattern2_primary(p: &Probe) -> bool {
    p.has_all(&["txn date", "value", "description"])
        || p.has_all(&["transaction date", "value date", "description"])
        || (p.has_all(&["to transfer-", "upi/dr/"]) && p.spaced_mon_date())
        || (p.has_all(&["ref no./cheque no.", "debit", "credit"]) && p.spaced_mon_date())
}

fn pattern3_primary(p: &Probe) -> bool {
    p.has_all(&["entry date", "description", "chq no/ref no", "value date"])
        || (p.has_all(&["entry date", "upi/"]) && p.dash_mon_date())
}

fn pattern4_primary(p: &Probe) -> bool {
    p.has_all(&["tran date", "particulars"])
        || (p.has_all(&["tran date", "chq no"]) && (p.has("upi/p2m") || p.has("neft/")))
        || (p.dash_num_date() && p.has("particulars"))
}

fn pattern5_primary(p: &Probe) -> bool {
    p.has_all(&["transaction date", "value date", "transaction details", "chq / ref no."])
        || p.has_all(&["transaction date", "value date", "debit/credit(₹)"])
        || (p.starts_with_numbered_row() && p.has("transaction details"))
}

fn pattern6_primary(p: &Probe) -> bool {
    p.has_all(&["withdrawal amt.", "deposit amt.", "closing balance"])
        || (p.slash_short_date() && p.has("withdrawal amt."))
        || p.has_all(&["chq./ref.no.", "value dt"])
        || p.has_all(&["narration", "withdrawal amt.", "deposit amt."])
        || p.has_all(&["date", "narration", "chq./ref.no.", "value dt", "withdrawal amt."])
        || (p.slash_short_date() && p.has_all(&["upi-", "closing balance"]))
}

fn pattern2_fallback(p: &Probe) -> bool {
    p.spaced_mon_date() && (p.has("transfer") || p.has("upi/dr/"))
}

fn dash_mon_with_movement(p: &Probe) -> bool {
    p.dash_mon_date() && (p.has("deposit") || p.has("withdrawal"))
}

fn pattern3_fallback(p: &Probe) -> bool {
    dash_mon_with_movement(p) && p.has("entry date")
}

fn pattern1_fallback(p: &Probe) -> bool {
    dash_mon_with_movement(p)
}

fn pattern4_fallback(p: &Probe) -> bool {
    p.dash_num_date()
}

fn pattern5_fallback(p: &Probe) -> bool {
    p.starts_with_numbered_row()
}

fn pattern6_fallback(p: &Probe) -> bool {
    p.slash_short_date() && (p.has("upi-") || p.has("closing balance"))
}

/// Classify a full statement text into one of the known layouts.
pub fn detect_pattern(text: &str) -> StatementPattern {
    let probe = Probe::new(text);

    PRIMARY
        .iter()
        .chain(FALLBACK.iter())
        .find(|sig| (sig.matches)(&probe))
        .map(|sig| sig.pattern)
        .unwrap_or(StatementPattern::Unknown)
}
