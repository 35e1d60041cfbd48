/*
[INPUT]:  API credentials and wall-clock time
[OUTPUT]: HMAC signatures, nonces and timestamps for private requests
[POS]:    Auth layer - handles Biscoint API authentication primitives
[UPDATE]: When auth flow or signature methods change
*/

pub mod credentials;
pub mod nonce;
pub mod signer;

pub use credentials::Credentials;
pub use nonce::{Clock, FixedClock, NonceGenerator, SystemClock, format_timestamp};
pub use signer::HmacSigner;
