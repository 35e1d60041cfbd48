/*
[INPUT]:  Market query parameters
[OUTPUT]: Ticker, fee schedule and API metadata
[POS]:    HTTP layer - public endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use serde_json::Value;

use crate::http::endpoints::Endpoint;
use crate::http::{BiscointClient, HttpMethod, Result};
use crate::types::{Ticker, TickerRequest};

impl BiscointClient {
    /// Get ticker for a market and reference amount
    ///
    /// GET /v1/ticker?base={base}&quote={quote}&amount={amount}&isQuote={isQuote}
    pub async fn get_ticker(&self, request: &TickerRequest) -> Result<Ticker> {
        self.fetch(Endpoint::Ticker, HttpMethod::Get, request).await
    }

    /// Get withdrawal fees per currency
    ///
    /// GET /v1/fees
    pub async fn get_fees(&self) -> Result<Value> {
        self.fetch(Endpoint::Fees, HttpMethod::Get, &()).await
    }

    /// Get API metadata, including published rate limits per endpoint
    ///
    /// GET /v1/meta
    pub async fn get_meta(&self) -> Result<Value> {
        self.fetch(Endpoint::Meta, HttpMethod::Get, &()).await
    }
}
