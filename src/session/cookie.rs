//! Cookie-backed credential store.
//!
//! The session credential lives in a single cookie entry. Some deployments
//! store the token directly; others wrap it in a pipe-delimited composite
//! produced by an external signing scheme, with the token in a fixed
//! positional field that may itself carry a `<length>:` prefix. Extraction
//! is a pure function over the cookie-jar string so it can be tested
//! without a document; `get`/`delete` are thin `document.cookie` wrappers.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Name of the cookie entry holding the session credential.
pub const TOKEN_COOKIE: &str = "token";

/// Field layout of the composite cookie value. The external signing scheme
/// emits five `|`-joined fields with the token in the last one.
pub const COMPOSITE_FIELD_COUNT: usize = 5;
pub const COMPOSITE_TOKEN_FIELD: usize = 4;

/// Extract a named cookie's value from a raw cookie-jar string.
///
/// Returns `None` when the entry is missing, appears more than once, or
/// unwraps to an empty value. The outer structural unwrap (composite
/// fields, length prefix) happens here; decoding the token itself is the
/// claim decoder's job.
pub fn value_from_jar(jar: &str, name: &str) -> Option<String> {
    let haystack = format!("; {jar}");
    let needle = format!("; {name}=");

    let mut parts = haystack.split(needle.as_str());
    parts.next()?;
    let tail = parts.next()?;
    if parts.next().is_some() {
        // Duplicate entries are ambiguous; treat the credential as absent.
        return None;
    }

    let raw = tail.split(';').next().unwrap_or("");
    unwrap_composite(raw).filter(|v| !v.is_empty())
}

/// Unwrap the composite framing around a raw cookie value.
///
/// A value containing `|` is a composite; the token sits at
/// [`COMPOSITE_TOKEN_FIELD`]. The token field (or a bare value) may carry a
/// numeric length prefix terminated by `:`, which is discarded. A composite
/// missing the token field yields `None`.
fn unwrap_composite(raw: &str) -> Option<String> {
    let field = if raw.contains('|') {
        raw.split('|').nth(COMPOSITE_TOKEN_FIELD)?
    } else {
        raw
    };

    match field.split_once(':') {
        Some((_prefix, rest)) => Some(rest.to_owned()),
        None => Some(field.to_owned()),
    }
}

/// Read a cookie from the browser's cookie jar.
#[cfg(feature = "hydrate")]
pub fn get(name: &str) -> Option<String> {
    let jar = html_document()?.cookie().ok()?;
    value_from_jar(&jar, name)
}

/// Delete a cookie by writing an already-expired value scoped to the root
/// path. Deleting an absent cookie is a no-op.
#[cfg(feature = "hydrate")]
pub fn delete(name: &str) {
    if let Some(doc) = html_document() {
        let expired = format!("{name}=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/;");
        let _ = doc.set_cookie(&expired);
    }
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
}
