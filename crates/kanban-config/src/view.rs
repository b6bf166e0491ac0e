//! Derived client views: public JSON plus a short content fingerprint.
//!
//! # Design
//! - Pure functions of their input; equal values give byte-identical JSON.
//! - Fingerprints are for change detection only, not a security primitive.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ConfigError, ConfigResult};

/// Number of characters retained from the encoded digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Truncated content hash of a serialized public configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hash `buf` into a fingerprint.
    #[must_use]
    pub fn of(buf: &[u8]) -> Self {
        let digest = Sha256::digest(buf);
        let mut encoded = URL_SAFE_NO_PAD.encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        Self(encoded)
    }

    /// Wrap a precomputed fingerprint string.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty fingerprint of an unconfigured value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a client that last acknowledged `seen` needs a fresh copy.
    #[must_use]
    pub fn differs_from(&self, seen: &str) -> bool {
        self.0 != seen
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialized public configuration paired with its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientView {
    json: Vec<u8>,
    fingerprint: Fingerprint,
}

impl ClientView {
    /// Serialize `value` and fingerprint the resulting bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] if `value` cannot be encoded as
    /// JSON. For the config types in this crate that only happens through a
    /// defect in their shape.
    pub fn build<T: Serialize>(section: &'static str, value: &T) -> ConfigResult<Self> {
        let json = serde_json::to_vec(value)
            .map_err(|source| ConfigError::Serialization { section, source })?;
        let fingerprint = Fingerprint::of(&json);
        Ok(Self { json, fingerprint })
    }

    /// Pair precomputed JSON with a fingerprint without recomputing either.
    #[must_use]
    pub const fn from_parts(json: Vec<u8>, fingerprint: Fingerprint) -> Self {
        Self { json, fingerprint }
    }

    /// Serialized JSON bytes.
    #[must_use]
    pub fn json(&self) -> &[u8] {
        &self.json
    }

    /// Fingerprint of [`Self::json`].
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}
