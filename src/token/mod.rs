//! Bearer-token payload codec.
//!
//! Extracts the claim record from the middle segment of a three-part token.
//! This performs no signature verification: the backend re-validates the token
//! on every API call, and the gateway only needs the claims for display and
//! role derivation.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::{Map, Value};

/// Decode the claim record carried in a token's payload segment.
///
/// Returns `None` when the token does not have exactly three dot-separated
/// segments, when the middle segment is not valid base64, or when the decoded
/// bytes are not a JSON object. Never panics.
pub fn decode_claims(token: &str) -> Option<Map<String, Value>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = decode_segment(parts[1])?;
    match serde_json::from_slice::<Value>(&payload).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Base64url-decode a token segment, tolerating padded and standard-alphabet
/// encoders seen in historical backend versions.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .ok()
}
