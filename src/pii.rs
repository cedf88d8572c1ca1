//! PII detection and masking.
//!
//! Classification samples a positional prefix of each column and tests three
//! full-string patterns in priority order: email, then phone, then SSN. A
//! value is counted for the first pattern it matches only, so a column is
//! never double-reported. The masking primitives here are what the cleaning
//! pipeline applies.

use crate::types::{PiiFinding, PiiType, Row};
use crate::value;
use regex::Regex;
use std::sync::LazyLock;

/// Rows sampled per column (positional prefix, not random).
pub const SAMPLE_ROWS: usize = 50;

/// Fraction of non-empty sampled values that must match to flag a column.
pub const MATCH_THRESHOLD: f64 = 0.8;

/// Replacement value written by the redact transform.
pub const REDACTION_MARKER: &str = "[REDACTED]";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}$")
        .expect("valid phone pattern")
});

// 9 digits, plain or dashed.
static SSN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-\d{2}-\d{4}$|^\d{9}$").expect("valid ssn pattern"));

/// Flag columns whose sampled values look like email, phone or SSN data.
///
/// At most one type is reported per column: the first, in priority order
/// email > phone > ssn, whose match ratio exceeds [`MATCH_THRESHOLD`].
/// Columns with zero non-empty sampled values are skipped.
pub fn classify(rows: &[Row], columns: &[String]) -> Vec<PiiFinding> {
    let sample = rows.len().min(SAMPLE_ROWS);
    let mut findings = Vec::new();

    for column in columns {
        let mut email_count = 0usize;
        let mut phone_count = 0usize;
        let mut ssn_count = 0usize;
        let mut valid_samples = 0usize;

        for row in &rows[..sample] {
            let raw = value::lenient_string(row.get(column));
            let val = raw.trim();
            if val.is_empty() {
                continue;
            }

            valid_samples += 1;
            if EMAIL_PATTERN.is_match(val) {
                email_count += 1;
            } else if PHONE_PATTERN.is_match(val) {
                phone_count += 1;
            } else if SSN_PATTERN.is_match(val) {
                ssn_count += 1;
            }
        }

        if valid_samples == 0 {
            continue;
        }

        let ratio = |count: usize| count as f64 / valid_samples as f64;
        let finding = if ratio(email_count) > MATCH_THRESHOLD {
            Some((PiiType::Email, ratio(email_count)))
        } else if ratio(phone_count) > MATCH_THRESHOLD {
            Some((PiiType::Phone, ratio(phone_count)))
        } else if ratio(ssn_count) > MATCH_THRESHOLD {
            Some((PiiType::Ssn, ratio(ssn_count)))
        } else {
            None
        };

        if let Some((pii_type, confidence)) = finding {
            findings.push(PiiFinding {
                column: column.clone(),
                pii_type,
                confidence,
            });
        }
    }

    findings
}

/// Mask an email address, keeping the first and last character of the local
/// part and the whole domain. Local parts of two or fewer characters, and
/// strings without a domain, collapse to `****`.
pub fn mask_email(email: &str) -> String {
    let mut parts = email.split('@');
    let user = parts.next().unwrap_or_default();
    let Some(domain) = parts.next().filter(|d| !d.is_empty()) else {
        return "****".to_owned();
    };

    let chars: Vec<char> = user.chars().collect();
    let masked_user = if chars.len() > 2 {
        format!("{}****{}", chars[0], chars[chars.len() - 1])
    } else {
        "****".to_owned()
    };
    format!("{masked_user}@{domain}")
}

/// Mask a phone number, keeping only the last four digits.
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 4 {
        return "***-***-****".to_owned();
    }
    format!("***-***-{}", &digits[digits.len() - 4..])
}
