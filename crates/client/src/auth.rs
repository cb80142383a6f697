//! `/auth` endpoints and session wiring.

use evotrack_core::models::{LoginRequest, LoginResponse, RegisterRequest};
use evotrack_core::payload;

use crate::api::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// `POST /auth/login` — on success the returned token and user are
    /// stored in the shared [`Session`](crate::session::Session).
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let body = payload::clean_create(credentials)?;
        let response: LoginResponse = self.post_json("/auth/login", &body).await?;
        self.session()
            .authenticate(response.token.clone(), response.user.clone());
        Ok(response)
    }

    /// `POST /auth/register` — self-registration with an invite code.
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        let body = payload::clean_create(request)?;
        self.post_unit("/auth/register", &body).await
    }

    /// Drop the stored credential (explicit logout).
    pub fn logout(&self) {
        self.session().clear();
        tracing::info!("Logged out");
    }
}
