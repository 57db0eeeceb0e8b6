//! Auth endpoints built on the transport pipeline.
//!
//! Login and profile fetches are the only places a role is written, so the
//! guard always resolves against the last identity the server reported.

use crate::core::auth::Credential;
use crate::core::error::{ApiError, ApiResult};
use crate::core::storage::StorageError;
use crate::core::transport::{ApiRequest, Transport};
use aegis_api_models::{LoginRequest, MessageReply, TokenResponse, UserInfo};

/// Client for `/auth/*`.
#[derive(Clone)]
pub struct AuthApi {
    transport: Transport,
}

impl AuthApi {
    /// Wrap a pipeline.
    #[must_use]
    pub const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Authenticate and persist the issued credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for blank input, or any pipeline failure.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<UserInfo> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Username and password are required"));
        }
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token: TokenResponse = self.transport.post("/auth/login", &body).await?;
        self.persist(&token)?;
        tracing::info!(user = %token.user.username, role = %token.user.role, "login succeeded");
        Ok(token.user)
    }

    /// Revoke the token server-side and clear local credentials regardless of the outcome.
    ///
    /// # Errors
    ///
    /// Returns the server or network failure; credentials are cleared either way.
    pub async fn logout(&self) -> ApiResult<()> {
        let outcome = self
            .transport
            .request::<MessageReply>(ApiRequest::post("/auth/logout"))
            .await;
        self.transport.credentials().clear();
        tracing::info!("logged out");
        outcome.map(|_| ())
    }

    /// Exchange the current token for a fresh one.
    ///
    /// # Errors
    ///
    /// Returns any pipeline failure; a 401 invalidates the session as usual.
    pub async fn refresh(&self) -> ApiResult<UserInfo> {
        let token: TokenResponse = self.transport.request(ApiRequest::post("/auth/refresh")).await?;
        self.persist(&token)?;
        Ok(token.user)
    }

    /// Fetch the current identity and replace the cached copy.
    ///
    /// # Errors
    ///
    /// Returns any pipeline failure.
    pub async fn profile(&self) -> ApiResult<UserInfo> {
        let info: UserInfo = self.transport.get("/auth/profile").await?;
        self.transport
            .credentials()
            .set_user_info(&info)
            .map_err(storage_failure)?;
        Ok(info)
    }

    fn persist(&self, token: &TokenResponse) -> ApiResult<()> {
        self.transport
            .credentials()
            .store(&Credential {
                access_token: token.access_token.clone(),
                user_info: Some(token.user.clone()),
            })
            .map_err(storage_failure)
    }
}

fn storage_failure(err: StorageError) -> ApiError {
    tracing::warn!(error = %err, "credential could not be persisted");
    ApiError::validation("Session could not be saved in this browser")
}
