/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod canonical;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod public;
pub mod signature;
pub mod trade;
pub mod transport;
pub mod user;

pub use error::{ApiError, BiscointError, Result, TransportError, TransportErrorKind};
pub use signature::{RequestSigner, SignedEnvelope, sign};

pub use canonical::Params;
pub use client::{BiscointClient, ClientConfig, DEFAULT_BASE_URL, RequestDescriptor};
pub use endpoints::Endpoint;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
