/*
[INPUT]:  API secret bytes and message bytes
[OUTPUT]: Hex-encoded HMAC-SHA256 digests
[POS]:    Auth layer - keyed hashing for request authentication
[UPDATE]: When changing the MAC algorithm or digest encoding
*/

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::{BiscointError, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer keyed by the API secret
#[derive(Clone)]
pub struct HmacSigner {
    mac: HmacSha256,
}

impl HmacSigner {
    /// Create signer from secret bytes; the secret must not be empty
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(BiscointError::invalid_input("signing secret must not be empty"));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| BiscointError::invalid_input(format!("HMAC setup failed: {e}")))?;
        Ok(Self { mac })
    }

    /// Sign a message and return the lowercase hex digest (64 chars)
    pub fn sign_hex(&self, message: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a hex digest against a message in constant time
    pub fn verify_hex(&self, message: &[u8], signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(message);
        mac.verify_slice(&expected).is_ok()
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacSigner(<redacted>)")
    }
}
