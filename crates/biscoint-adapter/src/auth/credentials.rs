/*
[INPUT]:  API key and secret from the caller or environment
[OUTPUT]: Immutable credential pair with the nonce counter its clones share
[POS]:    Auth layer - credential ownership
[UPDATE]: When credential sources change
*/

use std::fmt;
use std::sync::Arc;

use crate::auth::NonceGenerator;
use crate::http::{BiscointError, Result};

const API_KEY_ENV: &str = "BISCOINT_API_KEY";
const API_SECRET_ENV: &str = "BISCOINT_API_SECRET";

/// Biscoint API credentials.
///
/// Clones share one nonce counter, so clients built from copies of the same
/// credentials never send the same nonce.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    nonces: Arc<NonceGenerator>,
}

impl Credentials {
    /// Create credentials, rejecting empty values
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.is_empty() {
            return Err(BiscointError::invalid_input("api key must not be empty"));
        }
        if api_secret.is_empty() {
            return Err(BiscointError::invalid_input("api secret must not be empty"));
        }
        Ok(Self {
            api_key,
            api_secret,
            nonces: Arc::new(NonceGenerator::new()),
        })
    }

    /// Load credentials from `BISCOINT_API_KEY` and `BISCOINT_API_SECRET`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| BiscointError::invalid_input(format!("{API_KEY_ENV} is not set")))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| BiscointError::invalid_input(format!("{API_SECRET_ENV} is not set")))?;
        Self::new(api_key, api_secret)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &[u8] {
        self.api_secret.as_bytes()
    }

    /// Nonce counter for every request signed with this key
    pub fn nonces(&self) -> &NonceGenerator {
        &self.nonces
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.api_key == other.api_key && self.api_secret == other.api_secret
    }
}

impl Eq for Credentials {}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
