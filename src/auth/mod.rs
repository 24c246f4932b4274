//! Authentication state for the GMAP client.
//!
//! The API issues an opaque token from `POST {api_url}/auth/`. The client
//! caches it in a `Session` and sends it on every request. Tokens are not
//! refreshed: once obtained, a token is reused until the caller clears it.

pub mod session;

pub use session::{AuthSession, ExpiresAt, Session};
