//! English ordinal suffixes for numbered street names.

/// Returns the ordinal suffix for `n`: `"st"`, `"nd"`, `"rd"` or `"th"`.
///
/// 10 through 20 (and 110 through 120, etc.) are always `"th"`.
#[must_use]
pub const fn ordinal_suffix(n: u64) -> &'static str {
    if matches!(n % 100, 10..=20) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Returns the ordinal suffix for a non-empty string of ASCII decimal
/// digits.
///
/// Only the last two digits decide the suffix, so numbers of any length are
/// accepted without overflow.
#[must_use]
pub fn ordinal_suffix_for_digits(digits: &str) -> &'static str {
    debug_assert!(
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        "not a decimal number: {digits:?}"
    );

    let tail = &digits[digits.len().saturating_sub(2)..];
    let n = tail
        .bytes()
        .fold(0, |acc, b| acc * 10 + u64::from(b.wrapping_sub(b'0')));
    ordinal_suffix(n)
}
