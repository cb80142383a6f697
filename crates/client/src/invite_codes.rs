//! `/invite-codes` endpoints.

use evotrack_core::models::{CreateInviteCode, InviteCode};
use evotrack_core::payload;

use crate::api::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /invite-codes`.
    pub async fn list_invite_codes(&self) -> ApiResult<Vec<InviteCode>> {
        self.get_json("/invite-codes", &[]).await
    }

    /// `POST /invite-codes`.
    pub async fn create_invite_code(&self, dto: &CreateInviteCode) -> ApiResult<InviteCode> {
        let body = payload::clean_create(dto)?;
        self.post_json("/invite-codes", &body).await
    }

    /// `DELETE /invite-codes/{id}`.
    pub async fn delete_invite_code(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/invite-codes/{id}")).await
    }
}
