/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::Op;

pub const DEFAULT_BASE: &str = "BTC";
pub const DEFAULT_QUOTE: &str = "BRL";
pub const DEFAULT_TICKER_AMOUNT: &str = "1000.00";

/// Query for `GET ticker`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRequest {
    pub base: String,
    pub quote: String,
    /// Amount used to price the quote, kept as text to avoid float rounding
    pub amount: String,
    #[serde(rename = "isQuote")]
    pub is_quote: bool,
}

impl Default for TickerRequest {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_string(),
            quote: DEFAULT_QUOTE.to_string(),
            amount: DEFAULT_TICKER_AMOUNT.to_string(),
            is_quote: true,
        }
    }
}

/// Query for `GET trades`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<Op>,
    /// Number of trades to return (exchange maximum is 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

/// Query for `GET offer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRequest {
    pub op: Op,
    pub amount: String,
    #[serde(rename = "isQuote")]
    pub is_quote: bool,
    pub base: String,
    pub quote: String,
}

impl OfferRequest {
    /// Offer on the default BTC/BRL market
    pub fn new(op: Op, amount: impl Into<String>, is_quote: bool) -> Self {
        Self {
            op,
            amount: amount.into(),
            is_quote,
            base: DEFAULT_BASE.to_string(),
            quote: DEFAULT_QUOTE.to_string(),
        }
    }
}

/// Body for `POST offer`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmOfferRequest {
    #[serde(rename = "offerId")]
    pub offer_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticker_defaults() {
        let value = serde_json::to_value(TickerRequest::default()).unwrap();
        assert_eq!(
            value,
            json!({"base": "BTC", "quote": "BRL", "amount": "1000.00", "isQuote": true})
        );
    }

    #[test]
    fn test_trades_request_skips_empty_filters() {
        assert_eq!(serde_json::to_value(TradesRequest::default()).unwrap(), json!({}));

        let request = TradesRequest {
            op: Some(Op::Sell),
            length: Some(20),
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"op": "sell", "length": 20})
        );
    }

    #[test]
    fn test_offer_request_wire_names() {
        let value = serde_json::to_value(OfferRequest::new(Op::Buy, "0.01", false)).unwrap();
        assert_eq!(
            value,
            json!({"op": "buy", "amount": "0.01", "isQuote": false, "base": "BTC", "quote": "BRL"})
        );
    }
}
