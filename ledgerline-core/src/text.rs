//! Text normalization for noisy PDF-to-text statement dumps.
//!
//! All helpers are total: unrecognized input degrades to a best-effort
//! string (or `None` for numbers) instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;

static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Valid regex"));

static NUMERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-+]?[0-9]*\.?[0-9]+").expect("Valid regex"));

static DAY_MON_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/?([A-Za-z]{3})/?([0-9]{2,4})$").expect("Valid regex")
});

static DAY_MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{2,4})$").expect("Valid regex"));

static TIME_OF_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[0-9]{2}:[0-9]{2}\s*(?:AM|PM)?").expect("Valid regex"));

/// Collapse every whitespace run to one space and strip both ends.
pub fn trim(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First numeral in `s` after dropping thousands separators and the rupee sign.
pub fn to_float(s: &str) -> Option<f64> {
    let cleaned = s.replace([',', '₹'], "");
    NUMERAL.find(&cleaned)?.as_str().parse().ok()
}

fn month_number(mon: &str) -> Option<&'static str> {
    let month = match mon.to_ascii_lowercase().as_str() {
        "jan" => "01",
        "feb" => "02",
        "mar" => "03",
        "apr" => "04",
        "may" => "05",
        "jun" => "06",
        "jul" => "07",
        "aug" => "08",
        "sep" => "09",
        "oct" => "10",
        "nov" => "11",
        "dec" => "12",
        _ => return None,
    };
    Some(month)
}

fn full_year(y: &str) -> String {
    if y.len() == 2 { format!("20{y}") } else { y.to_string() }
}

/// Normalize a statement date token to `DD/MM/YYYY`.
///
/// Accepts `5-Jan-24`, `05 Jan 2024`, `05/Jan/2024` and `5/1/24` shapes.
/// Anything else comes back with separators normalized but otherwise as-is.
pub fn ddmmyyyy(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let tidy = raw.replace('-', "/");
    let tidy = WS_RUN.replace_all(&tidy, "/");
    let tidy = tidy.trim();

    if let Some(caps) = DAY_MON_YEAR.captures(tidy) {
        // Unknown month abbreviations fall through to the raw token.
        if let Some(month) = month_number(&caps[2]) {
            return format!("{:0>2}/{}/{}", &caps[1], month, full_year(&caps[3]));
        }
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(tidy) {
        return format!("{:0>2}/{:0>2}/{}", &caps[1], &caps[2], full_year(&caps[3]));
    }

    tidy.to_string()
}

/// Narration cleanup: collapse whitespace, drop `HH:MM [AM|PM]` tokens and
/// any leading run of pure-digit tokens (row sequence numbers).
pub fn clean_narr(text: &str) -> String {
    let text = trim(text);
    let text = TIME_OF_DAY.replace_all(&text, "");
    text.split_whitespace()
        .skip_while(|tok| tok.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ")
}
