//! Common word and sequence denylist.
//!
//! The list is immutable process-wide data; there is no way to extend it at
//! runtime. Matching is a case-insensitive substring search, so
//! `"MyPassword!"` is caught by `"password"`.
//!
//! Case-insensitivity is per character: each character folds to a single
//! lowercase scalar, so `'İ'` compares as `'i'` and the long s `'ſ'` as `'s'`.

pub const COMMON_PATTERNS: &[&str] = &[
    "password", "letmein", "qwerty", "12345", "admin", "welcome", "iloveyou", "monkey", "dragon",
];

/// Folds a character to one lowercase scalar.
///
/// `str::to_lowercase` can expand a character (`'İ'` becomes `"i\u{307}"`),
/// which would break a pattern apart; only the first scalar is kept.
fn fold(c: char) -> char {
    match c {
        'ſ' => 's',
        'ı' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Returns the first denylisted pattern found anywhere in `password`.
pub fn find_common_pattern(password: &str) -> Option<&'static str> {
    let folded: Vec<char> = password.chars().map(fold).collect();
    COMMON_PATTERNS.iter().copied().find(|pattern| {
        let needle: Vec<char> = pattern.chars().collect();
        folded.windows(needle.len()).any(|window| window == needle.as_slice())
    })
}

/// Checks if a password contains any denylisted pattern.
pub fn contains_common_pattern(password: &str) -> bool {
    find_common_pattern(password).is_some()
}
