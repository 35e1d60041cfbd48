/*
[INPUT]:  YAML configuration file, environment variables, command-line overrides
[OUTPUT]: Resolved client configuration and optional credentials
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use biscoint_adapter::{BiscointClient, ClientConfig, Credentials};
use serde::{Deserialize, Serialize};

pub const API_URL_ENV: &str = "BISCOINT_API_URL";
pub const API_KEY_ENV: &str = "BISCOINT_API_KEY";
pub const API_SECRET_ENV: &str = "BISCOINT_API_SECRET";

/// Settings for the command-line client.
///
/// Precedence, lowest first: YAML file, environment, flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Exchange base URL
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Whole-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay values from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_url = Some(url);
        }
        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(secret) = lookup(API_SECRET_ENV) {
            self.api_secret = Some(secret);
        }
        self
    }

    /// Overlay the base URL given on the command line
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = &self.api_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Credentials when both halves are configured, none when neither is
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Ok(Some(
                Credentials::new(key.as_str(), secret.as_str()).context("invalid credentials")?,
            )),
            (None, None) => Ok(None),
            (Some(_), None) => bail!("api_key is set but api_secret is missing"),
            (None, Some(_)) => bail!("api_secret is set but api_key is missing"),
        }
    }

    pub fn build_client(&self) -> Result<BiscointClient> {
        let client =
            BiscointClient::with_config(self.client_config()).context("create http client")?;
        match self.credentials()? {
            Some(credentials) => client
                .with_credentials(credentials)
                .context("attach credentials"),
            None => Ok(client),
        }
    }
}
