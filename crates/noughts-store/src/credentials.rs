//! The credential set: the four values issued by the identity provider.

use serde::{Deserialize, Serialize};

/// The full set of credentials for one authenticated session.
///
/// Invariant: the four fields are persisted and cleared as a unit. The
/// store never exposes a partially-present set — callers either get all
/// four or `None`.
///
/// The serialized shape matches the browser deployment's web-storage
/// entries key-for-key: `access_token`, `refresh_token`, `id_token`, and
/// `expiretime` (a decimal string, because web storage only holds
/// strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSet {
    /// Bearer credential used to authenticate the realtime connection.
    pub access_token: String,

    /// Long-lived credential exchanged for fresh access tokens.
    /// Not rotated on refresh — the same value survives the whole session.
    pub refresh_token: String,

    /// Token carrying display claims (username). Never used for
    /// authorization and never verified client-side.
    pub id_token: String,

    /// Lifetime of the access token in seconds, as reported by the token
    /// endpoint's `expires_in`.
    #[serde(rename = "expiretime", with = "expiretime_string")]
    pub expires_in: u64,
}

/// Serializes `expires_in` as a decimal string under the `expiretime` key.
///
/// The browser build persisted this through string-only web storage, so
/// existing data carries `"expiretime": "3600"`, not a JSON number. We
/// keep that shape for compatibility.
mod expiretime_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
