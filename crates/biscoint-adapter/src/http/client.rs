/*
[INPUT]:  HTTP configuration, credentials, transport and clock
[OUTPUT]: Signed or unsigned exchange calls with classified results
[POS]:    HTTP layer - core dispatcher for every endpoint
[UPDATE]: When changing request construction or response classification
*/

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{Clock, Credentials, SystemClock, format_timestamp};
use crate::http::canonical::{Params, canonical_json, canonical_query, to_params};
use crate::http::endpoints::{Endpoint, REQUEST_PARAM};
use crate::http::signature::{RequestSigner, SignedEnvelope};
use crate::http::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::http::{ApiError, BiscointError, Result};
use crate::types::into_data;

/// Base URL for the Biscoint API
pub const DEFAULT_BASE_URL: &str = "https://api.biscoint.io";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// One logical call, fixed before anything is signed or sent
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub params: Params,
    pub is_private: bool,
}

impl RequestDescriptor {
    /// Validate a call and fix its canonical parameter set.
    ///
    /// Null parameters are dropped and the `request` parameter is added.
    pub fn new(
        endpoint: Endpoint,
        method: HttpMethod,
        params: Params,
        is_private: bool,
    ) -> Result<Self> {
        let mut params: Params = params.into_iter().filter(|(_, v)| !v.is_null()).collect();
        endpoint.validate(method, &params, is_private)?;
        params.insert(
            REQUEST_PARAM.to_string(),
            Value::String(endpoint.versioned()),
        );

        Ok(Self {
            endpoint,
            method,
            params,
            is_private,
        })
    }
}

/// Main HTTP client for the Biscoint API
pub struct BiscointClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    credentials: Option<Credentials>,
    signer: Option<RequestSigner>,
    clock: Arc<dyn Clock>,
}

impl BiscointClient {
    /// Create a public-only client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a public-only client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(&config.base_url, Arc::new(transport))
    }

    /// Create a client over any transport
    pub fn with_transport(base_url: &str, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BiscointError::invalid_input(format!("invalid base url `{base_url}`: {e}")))?;

        Ok(Self {
            transport,
            base_url,
            credentials: None,
            signer: None,
            clock: Arc::new(SystemClock),
        })
    }

    /// Attach credentials, enabling private endpoints
    pub fn with_credentials(mut self, credentials: Credentials) -> Result<Self> {
        self.signer = Some(RequestSigner::new(credentials.api_secret())?);
        self.credentials = Some(credentials);
        Ok(self)
    }

    /// Replace the time source used for timestamps and nonces
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Call an endpoint and return the response body verbatim.
    ///
    /// `endpoint` accepts `offer`, `/offer` or `/v1/offer`.
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        params: Params,
        is_private: bool,
    ) -> Result<Value> {
        let endpoint: Endpoint = endpoint.parse()?;
        let descriptor = RequestDescriptor::new(endpoint, method, params, is_private)?;
        self.dispatch(&descriptor).await
    }

    /// Call an endpoint with a typed request and decode the enveloped payload
    pub(crate) async fn fetch<Q, T>(&self, endpoint: Endpoint, method: HttpMethod, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let params = to_params(query)?;
        let descriptor = RequestDescriptor::new(endpoint, method, params, endpoint.is_private())?;
        let body = self.dispatch(&descriptor).await?;
        serde_json::from_value(into_data(body))
            .map_err(|e| BiscointError::Decode(format!("{endpoint} payload: {e}")))
    }

    async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let (request, envelope) = self.build_request(descriptor)?;
        debug!(
            endpoint = %descriptor.endpoint,
            method = %descriptor.method,
            nonce = envelope.as_ref().map(|e| e.nonce),
            "sending request"
        );

        let response = self.transport.send(request).await.inspect_err(|err| {
            warn!(endpoint = %descriptor.endpoint, error = %err, "transport failure");
        })?;

        debug!(
            endpoint = %descriptor.endpoint,
            status = response.status,
            "received response"
        );
        classify(descriptor.endpoint, response)
    }

    /// Build the exact request that will be sent.
    ///
    /// For private calls this draws a fresh nonce and timestamp and signs
    /// the same canonical body that goes on the wire.
    pub fn build_request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<(HttpRequest, Option<SignedEnvelope>)> {
        let body = canonical_json(&descriptor.params)?;
        let mut url = self
            .base_url
            .join(&descriptor.endpoint.versioned())
            .map_err(|e| BiscointError::invalid_input(format!("cannot build url: {e}")))?;

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        let wire_body = match descriptor.method {
            HttpMethod::Get => {
                let query = canonical_query(&descriptor.params)?;
                if !query.is_empty() {
                    url.set_query(Some(&query));
                }
                None
            }
            HttpMethod::Post => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(body.clone())
            }
        };

        let envelope = if descriptor.is_private {
            let (credentials, signer) = self
                .credentials
                .as_ref()
                .zip(self.signer.as_ref())
                .ok_or_else(|| {
                    BiscointError::invalid_input(format!(
                        "`{}` requires credentials",
                        descriptor.endpoint
                    ))
                })?;

            let now = self.clock.now();
            let now_ms = u64::try_from(now.timestamp_millis()).unwrap_or(0);
            let nonce = credentials.nonces().next(now_ms);
            let envelope = signer.envelope(
                descriptor.method,
                url.path(),
                format_timestamp(now),
                nonce,
                &body,
            );
            headers.extend(envelope.headers(credentials.api_key()));
            Some(envelope)
        } else {
            None
        };

        let request = HttpRequest {
            method: descriptor.method,
            url,
            headers,
            body: wire_body,
        };
        Ok((request, envelope))
    }
}

/// Turn a raw response into the payload or a classified error
fn classify(endpoint: Endpoint, response: HttpResponse) -> Result<Value> {
    if (200..300).contains(&response.status) {
        return serde_json::from_slice(&response.body).map_err(|e| {
            BiscointError::Decode(format!(
                "{endpoint} returned status {} with a non-JSON body: {e}",
                response.status
            ))
        });
    }

    let err = ApiError::from_response(response.status, &response.body);
    warn!(
        endpoint = %endpoint,
        status = err.status_code,
        error_code = %err.error_code,
        "exchange rejected request"
    );
    Err(err.into())
}

impl fmt::Debug for BiscointClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiscointClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::FixedClock;
    use crate::http::signature::{API_KEY_HEADER, NONCE_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
    use chrono::DateTime;
    use serde_json::json;

    fn params(value: Value) -> Params {
        to_params(&value).unwrap()
    }

    fn fixed_client() -> BiscointClient {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        BiscointClient::with_config(ClientConfig::default())
            .unwrap()
            .with_credentials(Credentials::new("K", "S").unwrap())
            .unwrap()
            .with_clock(Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_descriptor_drops_nulls_and_adds_request() {
        let descriptor = RequestDescriptor::new(
            Endpoint::Trades,
            HttpMethod::Get,
            params(json!({"op": null, "length": 5})),
            true,
        )
        .unwrap();

        assert_eq!(
            descriptor.params,
            params(json!({"length": 5, "request": "v1/trades"}))
        );
    }

    #[test]
    fn test_descriptor_rejects_request_param_from_caller() {
        let err = RequestDescriptor::new(
            Endpoint::Ticker,
            HttpMethod::Get,
            params(json!({"request": "v1/balance"})),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, BiscointError::InvalidInput(_)));
    }

    #[test]
    fn test_build_golden_offer_request() {
        let client = fixed_client();
        let descriptor = RequestDescriptor::new(
            Endpoint::Offer,
            HttpMethod::Post,
            params(json!({"op": "buy", "amount": "0.002", "isQuote": false})),
            true,
        )
        .unwrap();

        let (request, envelope) = client.build_request(&descriptor).unwrap();
        let envelope = envelope.expect("private call is signed");

        assert_eq!(request.url.as_str(), "https://api.biscoint.io/v1/offer");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"amount":"0.002","isQuote":false,"op":"buy","request":"v1/offer"}"#)
        );
        assert_eq!(envelope.nonce, 1_700_000_000_000);
        assert_eq!(envelope.timestamp, "2023-11-14T22:13:20.000Z");
        assert_eq!(
            envelope.signature,
            "a2824771a1f2272fa99923c3cd592eee4d159b7820393f6bf445b64ee5108fbc"
        );
        assert_eq!(request.header(API_KEY_HEADER), Some("K"));
        assert_eq!(request.header(NONCE_HEADER), Some("1700000000000"));
        assert_eq!(request.header(TIMESTAMP_HEADER), Some("2023-11-14T22:13:20.000Z"));
        assert_eq!(request.header(SIGNATURE_HEADER), Some(envelope.signature.as_str()));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn test_build_private_get_signs_query_params() {
        let client = fixed_client();
        let descriptor =
            RequestDescriptor::new(Endpoint::Balance, HttpMethod::Get, Params::new(), true).unwrap();

        let (request, envelope) = client.build_request(&descriptor).unwrap();
        assert_eq!(request.url.query(), Some("request=v1%2Fbalance"));
        assert!(request.body.is_none());
        assert_eq!(
            envelope.unwrap().signature,
            "4a5b511a968635457ffc13316a1085646e98d8b35ad55e1084d507a6790aec6a"
        );
    }

    #[test]
    fn test_build_public_request_has_no_auth_headers() {
        let client = fixed_client();
        let descriptor =
            RequestDescriptor::new(Endpoint::Meta, HttpMethod::Get, Params::new(), false).unwrap();

        let (request, envelope) = client.build_request(&descriptor).unwrap();
        assert!(envelope.is_none());
        for name in [API_KEY_HEADER, NONCE_HEADER, TIMESTAMP_HEADER, SIGNATURE_HEADER] {
            assert!(request.header(name).is_none(), "{name} must not be sent");
        }
        assert_eq!(client.credentials().unwrap().nonces().last(), 0);
    }

    #[test]
    fn test_private_request_without_credentials() {
        let client = BiscointClient::new().unwrap();
        let descriptor =
            RequestDescriptor::new(Endpoint::Balance, HttpMethod::Get, Params::new(), true).unwrap();

        let err = client.build_request(&descriptor).unwrap_err();
        assert!(matches!(err, BiscointError::InvalidInput(_)));
    }

    #[test]
    fn test_each_private_request_gets_a_new_nonce() {
        let client = fixed_client();
        let descriptor =
            RequestDescriptor::new(Endpoint::Balance, HttpMethod::Get, Params::new(), true).unwrap();

        let (_, first) = client.build_request(&descriptor).unwrap();
        let (_, second) = client.build_request(&descriptor).unwrap();
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(second.nonce, first.nonce + 1);
        assert_ne!(first.signature, second.signature);
    }

    #[test]
    fn test_clients_on_cloned_credentials_share_nonces() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let credentials = Credentials::new("K", "S").unwrap();
        let build = |credentials: Credentials| {
            BiscointClient::with_config(ClientConfig::default())
                .unwrap()
                .with_credentials(credentials)
                .unwrap()
                .with_clock(Arc::new(FixedClock(now)))
        };
        let first_client = build(credentials.clone());
        let second_client = build(credentials);
        let descriptor =
            RequestDescriptor::new(Endpoint::Balance, HttpMethod::Get, Params::new(), true).unwrap();

        let (_, first) = first_client.build_request(&descriptor).unwrap();
        let (_, second) = second_client.build_request(&descriptor).unwrap();
        assert_ne!(first.unwrap().nonce, second.unwrap().nonce);
    }

    #[test]
    fn test_invalid_base_url() {
        let transport = Arc::new(ReqwestTransport::new(&ClientConfig::default()).unwrap());
        let err = BiscointClient::with_transport("not a url", transport).unwrap_err();
        assert!(matches!(err, BiscointError::InvalidInput(_)));
    }

    #[test]
    fn test_classify_success_and_failure() {
        let ok = classify(
            Endpoint::Ticker,
            HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: br#"{"base":"BTC"}"#.to_vec(),
            },
        )
        .unwrap();
        assert_eq!(ok, json!({"base": "BTC"}));

        let not_json = classify(
            Endpoint::Ticker,
            HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: b"OK".to_vec(),
            },
        )
        .unwrap_err();
        assert!(matches!(not_json, BiscointError::Decode(_)));

        let rejected = classify(
            Endpoint::Offer,
            HttpResponse {
                status: 400,
                headers: Vec::new(),
                body: br#"{"errorCode":"OfferExpired","message":"offer expired"}"#.to_vec(),
            },
        )
        .unwrap_err();
        let api = rejected.api_error().expect("api error");
        assert_eq!(api.status_code, 400);
        assert_eq!(api.error_code, "OfferExpired");
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", fixed_client());
        assert!(rendered.contains("api.biscoint.io"));
        assert!(!rendered.contains("\"S\""));
    }
}
