//! Mobile-number lookup key rules.

use std::sync::LazyLock;

use regex::Regex;

/// Number of national digits a mobile number must carry.
pub const MOBILE_NUMBER_DIGITS: usize = 10;

/// Optional `+CCC` prefix (with an optional `-` or space separator) followed by
/// exactly ten digits.
static MOBILE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{1,3}[- ]?)?\d{10}$").expect("mobile number pattern is valid")
});

/// Check a mobile number against the stored-record pattern.
pub fn is_valid_mobile_number(value: &str) -> bool {
    MOBILE_NUMBER_RE.is_match(value)
}

/// Check that a mobile number is exactly [`MOBILE_NUMBER_DIGITS`] ASCII digits,
/// which is what the public endpoints accept.
pub fn is_national_mobile_number(value: &str) -> bool {
    value.len() == MOBILE_NUMBER_DIGITS && value.bytes().all(|b| b.is_ascii_digit())
}

/// Country calling codes are 1 to 3 digits.
pub fn is_valid_country_code(code: i64) -> bool {
    (1..=999).contains(&code)
}
