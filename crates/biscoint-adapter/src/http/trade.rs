/*
[INPUT]:  Offer parameters and offer ids with signed credentials
[OUTPUT]: Quoted offers and confirmation receipts
[POS]:    HTTP layer - trading endpoints (require signature)
[UPDATE]: When adding new trading endpoints or changing offer flow
*/

use crate::http::endpoints::Endpoint;
use crate::http::{BiscointClient, HttpMethod, Result};
use crate::types::{ConfirmOfferRequest, Offer, OfferRequest};

impl BiscointClient {
    /// Request a firm offer; it expires after a short window
    ///
    /// GET /v1/offer?op={op}&amount={amount}&isQuote={isQuote}&base={base}&quote={quote}
    pub async fn get_offer(&self, request: &OfferRequest) -> Result<Offer> {
        self.fetch(Endpoint::Offer, HttpMethod::Get, request).await
    }

    /// Confirm a previously quoted offer and execute it
    ///
    /// POST /v1/offer with body {"offerId": ...}
    pub async fn confirm_offer(&self, offer_id: &str) -> Result<Offer> {
        let request = ConfirmOfferRequest {
            offer_id: offer_id.to_string(),
        };
        self.fetch(Endpoint::Offer, HttpMethod::Post, &request).await
    }
}
