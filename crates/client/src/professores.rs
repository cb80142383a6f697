//! `/professores` endpoints.

use evotrack_core::models::{CreateProfessor, Professor, UpdateProfessor};
use evotrack_core::payload;

use crate::api::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /professores`.
    pub async fn list_professores(&self) -> ApiResult<Vec<Professor>> {
        self.get_json("/professores", &[]).await
    }

    /// `GET /professores/{id}`.
    pub async fn get_professor(&self, id: &str) -> ApiResult<Professor> {
        self.get_json(&format!("/professores/{id}"), &[]).await
    }

    /// `POST /professores`.
    pub async fn create_professor(&self, dto: &CreateProfessor) -> ApiResult<Professor> {
        let body = payload::clean_create(dto)?;
        self.post_json("/professores", &body).await
    }

    /// `PUT /professores/{id}`.
    pub async fn update_professor(&self, id: &str, dto: &UpdateProfessor) -> ApiResult<Professor> {
        let body = payload::clean_update(dto)?;
        self.put_json(&format!("/professores/{id}"), &body).await
    }

    /// `DELETE /professores/{id}`.
    pub async fn delete_professor(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/professores/{id}")).await
    }
}
