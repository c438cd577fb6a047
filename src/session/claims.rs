//! Identity claim decoding.
//!
//! The upstream login flow base64url-encodes what it stores in the cookie,
//! so the credential arrives either as an encoded compact three-part token
//! or as an encoded bare JSON claim. Decoding is an ordered chain of
//! fallible steps, each returning `Option`; the first shape that parses
//! wins and any failure yields `None`. The claim is advisory only: it is
//! never cryptographically verified here, and the verify endpoint remains
//! the authoritative answer on session validity.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Marker every base64-encoded JSON object starts with (`{"` under
/// base64). Its presence in the decoded text means the credential is a
/// compact three-part token rather than a bare claim.
const COMPACT_TOKEN_MARKER: &str = "eyJ";

/// Decoded identity claim. `username` and `is_admin` are the fields the
/// console acts on; everything else the claim carried is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentityClaim {
    pub username: String,
    pub is_admin: bool,
    pub claims: serde_json::Map<String, serde_json::Value>,
}

/// Decode a raw credential string into an [`IdentityClaim`].
///
/// Total over arbitrary input: returns `None` for anything that does not
/// decode, never panics and never surfaces an error to the caller.
pub fn decode(token: &str) -> Option<IdentityClaim> {
    if token.is_empty() {
        return None;
    }

    let text = decode_base64url_text(token)?;

    let payload = if text.contains(COMPACT_TOKEN_MARKER) {
        compact_token_payload(&text).or_else(|| serde_json::from_str(&text).ok())?
    } else {
        serde_json::from_str(&text).ok()?
    };

    claim_from_payload(payload)
}

/// Base64url-decode `input` into text.
///
/// Normalizes the url-safe alphabet to the standard one and restores
/// padding before decoding. The decoded bytes are read as UTF-8 when
/// possible; otherwise each byte becomes one character, matching how the
/// upstream encoder treats non-UTF-8 token material.
fn decode_base64url_text(input: &str) -> Option<String> {
    let mut normalized = input.replace('-', "+").replace('_', "/");
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    let bytes = STANDARD.decode(normalized.as_bytes()).ok()?;
    Some(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&b| char::from(b)).collect(),
    })
}

/// Parse the payload of a compact three-part token (`header.payload.sig`).
///
/// Requires exactly three `.`-separated parts; the middle part is
/// base64url-encoded JSON.
fn compact_token_payload(text: &str) -> Option<serde_json::Value> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = decode_base64url_text(parts[1])?;
    serde_json::from_str(&payload).ok()
}

/// Map a decoded JSON payload onto an [`IdentityClaim`].
///
/// `is_admin` is true only for the boolean literal `true`; a numeric `1`
/// or the string `"true"` does not grant the admin role. A payload that is
/// not a JSON object carries no identity and yields `None`.
fn claim_from_payload(payload: serde_json::Value) -> Option<IdentityClaim> {
    let serde_json::Value::Object(claims) = payload else {
        return None;
    };

    let username = claims
        .get("username")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_owned();
    let is_admin = claims.get("is_admin") == Some(&serde_json::Value::Bool(true));

    Some(IdentityClaim { username, is_admin, claims })
}
