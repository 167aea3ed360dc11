use once_cell::sync::Lazy;
use regex::Regex;

pub const CANONICAL_PREFIX: &str = "+91 ";
pub const SUBSCRIBER_DIGITS: usize = 10;

const TRUNK_PREFIXES: [&str; 3] = ["+91", "91", "0"];

static RAW_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\+91[ -]?|91[ -]?|0[ -]?)?[6-9][0-9]{9}$").expect("raw phone pattern")
});

static CANONICAL_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+91 [6-9][0-9]{9}$").expect("canonical phone pattern"));

/// Accepts an optional `+91`, `91` or `0` prefix (each optionally followed by
/// one space or hyphen) and then a 10 digit number starting with 6-9.
pub fn is_valid_phone(raw: &str) -> bool {
    RAW_PHONE.is_match(raw)
}

pub fn is_canonical_phone(value: &str) -> bool {
    CANONICAL_PHONE.is_match(value)
}

/// Canonical `+91 NNNNNNNNNN` form of a number that passed [`is_valid_phone`].
///
/// Input that was not validated first produces an unspecified value.
pub fn normalize_phone(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|ch| !(ch.is_whitespace() || matches!(ch, '-' | '(' | ')')))
        .collect();

    let mut rest = stripped.as_str();
    for prefix in TRUNK_PREFIXES {
        if let Some(after) = rest.strip_prefix(prefix) {
            // A bare number such as 9123456780 starts with "91" but has no prefix.
            if after.chars().count() >= SUBSCRIBER_DIGITS {
                rest = after;
            }
            break;
        }
    }

    let chars: Vec<char> = rest.chars().collect();
    let start = chars.len().saturating_sub(SUBSCRIBER_DIGITS);
    let subscriber: String = chars[start..].iter().collect();

    format!("{}{}", CANONICAL_PREFIX, subscriber)
}
