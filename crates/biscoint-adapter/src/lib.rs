/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Biscoint adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{Clock, Credentials, FixedClock, HmacSigner, NonceGenerator, SystemClock};

// Re-export commonly used types from http
pub use http::{
    ApiError,
    BiscointClient,
    BiscointError,
    ClientConfig,
    Endpoint,
    HttpMethod,
    HttpRequest,
    HttpResponse,
    HttpTransport,
    Params,
    RequestSigner,
    Result,
    SignedEnvelope,
    TransportError,
    TransportErrorKind,
};

// Re-export all types
pub use types::*;
