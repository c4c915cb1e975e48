//! Identity-token claim decoding for the noughts client.
//!
//! The identity provider issues tokens in the familiar three-segment
//! `header.payload.signature` shape. This client treats them as opaque
//! bearer credentials plus one display hint — the username claim in the
//! payload. Nothing here verifies a signature; that is the server's job,
//! and decoding is strictly best-effort.
//!
//! Every function returns `Option` rather than `Result`: a malformed
//! token must never bring down session bootstrap, it just means "no
//! username". Failures are logged and swallowed.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// The well-known claim carrying the player's display name.
const USERNAME_CLAIM: &str = "cognito:username";

/// Decodes one base64url (unpadded) token segment into UTF-8 text.
///
/// Returns `None` on invalid base64 or non-UTF-8 content.
pub fn decode_segment(segment: &str) -> Option<String> {
    let bytes = match URL_SAFE_NO_PAD.decode(segment) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "token segment is not valid base64url");
            return None;
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(error = %e, "token segment is not valid UTF-8");
            None
        }
    }
}

/// Decodes the claims object from a three-segment token.
///
/// Only the payload (middle) segment is inspected; the header and
/// signature segments are ignored entirely. Returns `None` when the
/// token does not split into exactly three segments, the payload is not
/// base64url, or the decoded payload is not a JSON object.
pub fn decode_claims(token: &str) -> Option<serde_json::Value> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        tracing::debug!("token does not have exactly three segments");
        return None;
    };

    let decoded = decode_segment(payload)?;
    match serde_json::from_str(&decoded) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "token payload is not valid JSON");
            None
        }
    }
}

/// Extracts the username claim from an identity token.
pub fn username_of(id_token: &str) -> Option<String> {
    decode_claims(id_token)?
        .get(USERNAME_CLAIM)?
        .as_str()
        .map(str::to_owned)
}
