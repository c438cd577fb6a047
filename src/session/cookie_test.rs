use super::*;

// =============================================================
// Plain values
// =============================================================

#[test]
fn plain_value_is_returned_unmodified() {
    let jar = "theme=dark; token=abc123; lang=en";
    assert_eq!(value_from_jar(jar, "token"), Some("abc123".to_owned()));
}

#[test]
fn single_entry_jar_matches() {
    assert_eq!(value_from_jar("token=abc123", "token"), Some("abc123".to_owned()));
}

#[test]
fn missing_entry_is_absent() {
    assert_eq!(value_from_jar("theme=dark; lang=en", "token"), None);
}

#[test]
fn empty_jar_is_absent() {
    assert_eq!(value_from_jar("", "token"), None);
}

#[test]
fn empty_value_is_absent_not_empty_string() {
    assert_eq!(value_from_jar("token=; theme=dark", "token"), None);
}

#[test]
fn name_must_match_a_whole_entry() {
    // "token" must not match inside "csrf_token".
    assert_eq!(value_from_jar("csrf_token=zzz", "token"), None);
}

#[test]
fn duplicate_entries_are_absent() {
    assert_eq!(value_from_jar("token=a; token=b", "token"), None);
}

// =============================================================
// Length prefix
// =============================================================

#[test]
fn length_prefix_is_stripped() {
    assert_eq!(value_from_jar("token=288:abcd", "token"), Some("abcd".to_owned()));
}

#[test]
fn length_prefix_strip_keeps_remainder() {
    // Only the first ':' delimits the prefix; the rest of the value is kept.
    assert_eq!(value_from_jar("token=288:ab:cd", "token"), Some("ab:cd".to_owned()));
}

// =============================================================
// Composite values
// =============================================================

#[test]
fn composite_value_takes_token_field() {
    let jar = "token=a|b|c|d|tok";
    assert_eq!(value_from_jar(jar, "token"), Some("tok".to_owned()));
}

#[test]
fn composite_token_field_strips_length_prefix() {
    let jar = "token=a|b|c|d|288:tok";
    assert_eq!(value_from_jar(jar, "token"), Some("tok".to_owned()));
}

#[test]
fn composite_with_missing_token_field_is_absent() {
    assert_eq!(value_from_jar("token=a|b|c", "token"), None);
}

#[test]
fn composite_field_constants_agree() {
    assert_eq!(COMPOSITE_TOKEN_FIELD, COMPOSITE_FIELD_COUNT - 1);
}
