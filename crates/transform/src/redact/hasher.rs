//! Keyed pseudonyms for redacted values
//!
//! The same key and input always yield the same token, so redacted records
//! can still be joined on the hashed field without exposing it.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{TransformError, TransformResult};

/// Prefix used when a whole field is hashed
pub const DEFAULT_PREFIX: &str = "pii_";

/// Digest bytes kept in a token (96 bits)
const TOKEN_BYTES: usize = 12;

/// HMAC-SHA256 pseudonymizer
#[derive(Clone)]
pub struct PseudonymHasher {
    keyed: Hmac<Sha256>,
}

impl PseudonymHasher {
    pub fn new(key: impl AsRef<[u8]>) -> TransformResult<Self> {
        match Hmac::<Sha256>::new_from_slice(key.as_ref()) {
            Ok(keyed) => Ok(Self { keyed }),
            Err(e) => Err(TransformError::config(format!("invalid hash key: {e}"))),
        }
    }

    /// `prefix` followed by the base62 form of the truncated digest
    ///
    /// e.g. `eml_3vQpZk81TqLw0aXc`
    pub fn hash(&self, value: &str, prefix: &str) -> String {
        let digest = self
            .keyed
            .clone()
            .chain_update(value.as_bytes())
            .finalize()
            .into_bytes();

        let token = digest[..TOKEN_BYTES]
            .iter()
            .rev()
            .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));

        let mut out = String::with_capacity(prefix.len() + 17);
        out.push_str(prefix);
        out.push_str(&base62::encode(token));
        out
    }

    pub fn hash_default(&self, value: &str) -> String {
        self.hash(value, DEFAULT_PREFIX)
    }
}

impl std::fmt::Debug for PseudonymHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PseudonymHasher { key: <hidden> }")
    }
}
