use super::*;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

fn encode(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Build a credential the way the upstream login flow does: a compact
/// three-part token, base64url-encoded once more for cookie transport.
fn double_encoded(payload_json: &str) -> String {
    let header = encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let compact = format!("{header}.{}.sig", encode(payload_json));
    encode(&compact)
}

// =============================================================
// Single-layer claims
// =============================================================

#[test]
fn single_layer_json_round_trips() {
    let token = encode(r#"{"username":"x","is_admin":true}"#);
    let claim = decode(&token).expect("claim");
    assert_eq!(claim.username, "x");
    assert!(claim.is_admin);
}

#[test]
fn missing_username_defaults_to_empty() {
    let token = encode(r#"{"is_admin":false}"#);
    let claim = decode(&token).expect("claim");
    assert_eq!(claim.username, "");
    assert!(!claim.is_admin);
}

#[test]
fn passthrough_claims_are_kept() {
    let token = encode(r#"{"username":"x","is_admin":true,"user_id":7}"#);
    let claim = decode(&token).expect("claim");
    assert_eq!(claim.claims.get("user_id"), Some(&serde_json::json!(7)));
}

// =============================================================
// Double-encoded compact tokens
// =============================================================

#[test]
fn compact_token_payload_is_decoded() {
    let token = double_encoded(r#"{"username":"admin","is_admin":true,"exp":99}"#);
    let claim = decode(&token).expect("claim");
    assert_eq!(claim.username, "admin");
    assert!(claim.is_admin);
}

#[test]
fn compact_token_with_wrong_part_count_falls_through() {
    // Two parts only: not a compact token, and not bare JSON either.
    let header = encode(r#"{"alg":"HS256"}"#);
    let token = encode(&format!("{header}.{}", encode(r#"{"username":"x"}"#)));
    assert_eq!(decode(&token), None);
}

// =============================================================
// Admin flag strictness
// =============================================================

#[test]
fn numeric_admin_flag_is_not_admin() {
    let token = encode(r#"{"username":"x","is_admin":1}"#);
    assert!(!decode(&token).expect("claim").is_admin);
}

#[test]
fn string_admin_flag_is_not_admin() {
    let token = encode(r#"{"username":"x","is_admin":"true"}"#);
    assert!(!decode(&token).expect("claim").is_admin);
}

#[test]
fn absent_admin_flag_is_not_admin() {
    let token = encode(r#"{"username":"x"}"#);
    assert!(!decode(&token).expect("claim").is_admin);
}

// =============================================================
// Totality
// =============================================================

#[test]
fn empty_token_is_none() {
    assert_eq!(decode(""), None);
}

#[test]
fn non_base64_input_is_none() {
    assert_eq!(decode("not base64 at all!"), None);
}

#[test]
fn bare_compact_token_is_none() {
    // A compact token stored without the outer encoding layer: the '.'
    // separators are not valid base64, so nothing decodes.
    let header = encode(r#"{"alg":"HS256"}"#);
    let token = format!("{header}.{}.sig", encode(r#"{"username":"x"}"#));
    assert_eq!(decode(&token), None);
}

#[test]
fn decoded_non_json_text_is_none() {
    assert_eq!(decode(&encode("hello world")), None);
}

#[test]
fn non_object_json_is_none() {
    assert_eq!(decode(&encode("123")), None);
    assert_eq!(decode(&encode(r#"["username"]"#)), None);
}

#[test]
fn url_safe_alphabet_is_normalized() {
    // A run of six '~' bytes always yields an aligned 0x7e triple, which
    // encodes to "fn5-" in the url-safe alphabet.
    let token = encode(r#"{"username":"~~~~~~","is_admin":true}"#);
    assert!(token.contains('-'));
    let claim = decode(&token).expect("claim");
    assert_eq!(claim.username, "~~~~~~");
    assert!(claim.is_admin);
}
