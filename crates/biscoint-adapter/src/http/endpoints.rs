/*
[INPUT]:  Endpoint paths, HTTP methods and parameter names from callers
[OUTPUT]: Resolved endpoints with their access type and accepted parameters
[POS]:    HTTP layer - fixed table of supported exchange endpoints
[UPDATE]: When the exchange adds endpoints or parameters
*/

use std::fmt;
use std::str::FromStr;

use crate::http::canonical::Params;
use crate::http::{BiscointError, HttpMethod, Result};

pub const API_VERSION: &str = "v1";

/// Parameter added by the client to every request, naming the endpoint
pub const REQUEST_PARAM: &str = "request";

/// Endpoints exposed by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Ticker,
    Fees,
    Meta,
    Balance,
    Offer,
    Trades,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::Ticker,
        Endpoint::Fees,
        Endpoint::Meta,
        Endpoint::Balance,
        Endpoint::Offer,
        Endpoint::Trades,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Ticker => "ticker",
            Endpoint::Fees => "fees",
            Endpoint::Meta => "meta",
            Endpoint::Balance => "balance",
            Endpoint::Offer => "offer",
            Endpoint::Trades => "trades",
        }
    }

    /// Versioned endpoint name, e.g. `v1/offer`
    pub fn versioned(&self) -> String {
        format!("{API_VERSION}/{}", self.name())
    }

    /// URL path, e.g. `/v1/offer`
    pub fn path(&self) -> String {
        format!("/{}", self.versioned())
    }

    /// Private endpoints require a signed request
    pub fn is_private(&self) -> bool {
        matches!(self, Endpoint::Balance | Endpoint::Offer | Endpoint::Trades)
    }

    /// Parameters accepted for a method, or `None` if the method is not served
    pub fn accepted_params(&self, method: HttpMethod) -> Option<&'static [&'static str]> {
        match (self, method) {
            (Endpoint::Ticker, HttpMethod::Get) => Some(&["base", "quote", "amount", "isQuote"]),
            (Endpoint::Fees | Endpoint::Meta | Endpoint::Balance, HttpMethod::Get) => Some(&[]),
            (Endpoint::Trades, HttpMethod::Get) => Some(&["op", "length"]),
            (Endpoint::Offer, HttpMethod::Get) => {
                Some(&["op", "amount", "isQuote", "base", "quote"])
            }
            (Endpoint::Offer, HttpMethod::Post) => {
                Some(&["offerId", "op", "amount", "isQuote", "base", "quote"])
            }
            _ => None,
        }
    }

    /// Structural check of a call before anything is built or sent
    pub fn validate(&self, method: HttpMethod, params: &Params, is_private: bool) -> Result<()> {
        let accepted = self.accepted_params(method).ok_or_else(|| {
            BiscointError::invalid_input(format!("{method} is not supported on `{self}`"))
        })?;

        if is_private != self.is_private() {
            let expected = if self.is_private() { "private" } else { "public" };
            return Err(BiscointError::invalid_input(format!(
                "`{self}` is a {expected} endpoint"
            )));
        }

        if let Some(unknown) = params.keys().find(|key| !accepted.contains(&key.as_str())) {
            return Err(BiscointError::invalid_input(format!(
                "unknown parameter `{unknown}` for {method} `{self}`"
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = BiscointError;

    /// Accepts `offer`, `/offer`, `v1/offer` and `/v1/offer`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_matches('/');
        let name = trimmed
            .strip_prefix(API_VERSION)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(trimmed);

        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == name)
            .ok_or_else(|| BiscointError::invalid_input(format!("unknown endpoint `{s}`")))
    }
}
