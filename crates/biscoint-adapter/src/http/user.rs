/*
[INPUT]:  Trade filters and signed credentials
[OUTPUT]: Account balance and trade history
[POS]:    HTTP layer - user data endpoints (require signature)
[UPDATE]: When adding new user endpoints or changing query parameters
*/

use crate::http::endpoints::Endpoint;
use crate::http::{BiscointClient, HttpMethod, Result};
use crate::types::{Balance, Trade, TradesRequest};

impl BiscointClient {
    /// Get available balance per currency
    ///
    /// GET /v1/balance
    pub async fn get_balance(&self) -> Result<Balance> {
        self.fetch(Endpoint::Balance, HttpMethod::Get, &()).await
    }

    /// Get most recent trades, newest first
    ///
    /// GET /v1/trades?op={op}&length={length}
    pub async fn get_trades(&self, request: &TradesRequest) -> Result<Vec<Trade>> {
        self.fetch(Endpoint::Trades, HttpMethod::Get, request).await
    }
}
