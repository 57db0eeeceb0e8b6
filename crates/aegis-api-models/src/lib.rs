#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Aegis console API.
//!
//! These types describe the wire contract the console consumes: the bare
//! payloads the auth endpoints return and the success code of the response
//! envelope most other endpoints wrap their payloads in. Interpretation
//! (envelope vs. bare payload, error classification) lives in the UI
//! transport, not here.
use serde::{Deserialize, Serialize};

/// Code carried by a successful `{ code, message?, data }` response envelope.
///
/// Envelopes are interpreted by the UI transport rather than deserialized into a
/// typed wrapper, since servers sometimes send the code as a JSON float.
pub const ENVELOPE_SUCCESS_CODE: i32 = 0;

/// Credentials submitted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plain-text password, sent over TLS only.
    pub password: String,
}

/// Identity claims returned alongside a token or by `GET /auth/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    /// Account name.
    pub username: String,
    /// Role name as reported by the server (`admin`, `operator`, `viewer`).
    pub role: String,
}

/// Bare payload returned by `POST /auth/login` and `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Token scheme; always `bearer` today.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Identity the token was issued for.
    pub user: UserInfo,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Acknowledgement body returned by endpoints without a payload (e.g. logout).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageReply {
    /// Domain status code.
    pub code: i64,
    /// Human-readable acknowledgement.
    #[serde(default)]
    pub message: Option<String>,
}
