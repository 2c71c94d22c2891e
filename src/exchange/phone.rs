//! Permissive phone number recognition for contacts typed as plain text

use lazy_regex::regex_is_match;

/// Returns the trimmed phone number if `text` looks like one.
///
/// Accepted: an optional leading '+', then at least 7 characters drawn from
/// digits, spaces, hyphens and parentheses, with at least one digit.
pub fn parse_phone(text: &str) -> Option<String> {
    let candidate = text.trim();
    if regex_is_match!(r"^\+?[0-9 ()\-]{7,}$", candidate) && candidate.chars().any(|c| c.is_ascii_digit()) {
        Some(candidate.to_string())
    } else {
        None
    }
}
