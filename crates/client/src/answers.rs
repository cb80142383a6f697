//! `/answers` endpoints (intake-questionnaire submissions).

use evotrack_core::models::{CreateUserAnswer, UpdateUserAnswer, UserAnswer};
use evotrack_core::payload;

use crate::api::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /answers`.
    pub async fn list_answers(&self) -> ApiResult<Vec<UserAnswer>> {
        self.get_json("/answers", &[]).await
    }

    /// `GET /answers/{id}`.
    pub async fn get_answer(&self, id: &str) -> ApiResult<UserAnswer> {
        self.get_json(&format!("/answers/{id}"), &[]).await
    }

    /// `POST /answers` — submitted by the public questionnaire form.
    pub async fn create_answer(&self, dto: &CreateUserAnswer) -> ApiResult<UserAnswer> {
        let body = payload::clean_create(dto)?;
        self.post_json("/answers", &body).await
    }

    /// `PUT /answers/{id}` — partial update; empty updates are rejected
    /// before any network call.
    pub async fn update_answer(&self, id: &str, dto: &UpdateUserAnswer) -> ApiResult<UserAnswer> {
        let body = payload::clean_update(dto)?;
        self.put_json(&format!("/answers/{id}"), &body).await
    }

    /// `DELETE /answers/{id}`.
    pub async fn delete_answer(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/answers/{id}")).await
    }
}
