/*
[INPUT]:  API secret, request method/path, nonce, timestamp and canonical body
[OUTPUT]: Request signatures and the signed envelope sent as headers
[POS]:    HTTP layer - request signing for private endpoints
[UPDATE]: When changing the canonical message layout or header contract
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::auth::HmacSigner;
use crate::http::canonical::{Params, canonical_json};
use crate::http::{HttpMethod, Result};

pub const API_KEY_HEADER: &str = "BSCNT-APIKEY";
pub const NONCE_HEADER: &str = "BSCNT-NONCE";
pub const TIMESTAMP_HEADER: &str = "BSCNT-TIMESTAMP";
pub const SIGNATURE_HEADER: &str = "BSCNT-SIGN";

/// Authentication values attached to exactly one private request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub nonce: u64,
    pub timestamp: String,
    pub signature: String,
}

impl SignedEnvelope {
    /// Header pairs for this envelope, including the API key
    pub fn headers(&self, api_key: &str) -> Vec<(String, String)> {
        vec![
            (API_KEY_HEADER.to_string(), api_key.to_string()),
            (NONCE_HEADER.to_string(), self.nonce.to_string()),
            (TIMESTAMP_HEADER.to_string(), self.timestamp.clone()),
            (SIGNATURE_HEADER.to_string(), self.signature.clone()),
        ]
    }
}

/// Message that gets signed: `{nonce}{timestamp}{METHOD}{path}{body}`
pub fn canonical_message(
    nonce: u64,
    timestamp: &str,
    method: HttpMethod,
    path: &str,
    body: &str,
) -> String {
    format!("{nonce}{timestamp}{method}{path}{body}")
}

/// Signs requests for private endpoints
#[derive(Debug, Clone)]
pub struct RequestSigner {
    signer: HmacSigner,
}

impl RequestSigner {
    /// Create a request signer keyed by the API secret
    pub fn new(secret: &[u8]) -> Result<Self> {
        Ok(Self {
            signer: HmacSigner::new(secret)?,
        })
    }

    /// Sign a request whose parameters are not serialized yet
    pub fn sign(
        &self,
        method: HttpMethod,
        path: &str,
        timestamp: &str,
        nonce: u64,
        params: &Params,
    ) -> Result<String> {
        let body = canonical_json(params)?;
        Ok(self.sign_body(method, path, timestamp, nonce, &body))
    }

    /// Sign an already canonical body.
    ///
    /// Format: HMAC-SHA256(secret, base64(canonical_message)), hex encoded.
    pub fn sign_body(
        &self,
        method: HttpMethod,
        path: &str,
        timestamp: &str,
        nonce: u64,
        body: &str,
    ) -> String {
        let message = canonical_message(nonce, timestamp, method, path, body);
        let encoded = BASE64.encode(message.as_bytes());
        self.signer.sign_hex(encoded.as_bytes())
    }

    /// Build the full envelope for one request
    pub fn envelope(
        &self,
        method: HttpMethod,
        path: &str,
        timestamp: String,
        nonce: u64,
        body: &str,
    ) -> SignedEnvelope {
        let signature = self.sign_body(method, path, &timestamp, nonce, body);
        SignedEnvelope {
            nonce,
            timestamp,
            signature,
        }
    }
}

/// One-shot signing without keeping a signer around
pub fn sign(
    secret: &[u8],
    method: HttpMethod,
    path: &str,
    timestamp: &str,
    nonce: u64,
    params: &Params,
) -> Result<String> {
    RequestSigner::new(secret)?.sign(method, path, timestamp, nonce, params)
}
