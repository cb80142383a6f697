//! `/alunos` endpoints.

use evotrack_core::models::{Aluno, CreateAluno, UpdateAluno};
use evotrack_core::payload;

use crate::api::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /alunos` — every aluno visible to the caller.
    pub async fn list_alunos(&self) -> ApiResult<Vec<Aluno>> {
        self.get_json("/alunos", &[]).await
    }

    /// `GET /alunos/{id}`.
    pub async fn get_aluno(&self, id: &str) -> ApiResult<Aluno> {
        self.get_json(&format!("/alunos/{id}"), &[]).await
    }

    /// `POST /alunos` — creates the user account and aluno record.
    pub async fn create_aluno(&self, dto: &CreateAluno) -> ApiResult<Aluno> {
        let body = payload::clean_create(dto)?;
        self.post_json("/alunos", &body).await
    }

    /// `PUT /alunos/{id}` — partial update; empty updates are rejected
    /// before any network call.
    pub async fn update_aluno(&self, id: &str, dto: &UpdateAluno) -> ApiResult<Aluno> {
        let body = payload::clean_update(dto)?;
        self.put_json(&format!("/alunos/{id}"), &body).await
    }

    /// `DELETE /alunos/{id}`.
    pub async fn delete_aluno(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/alunos/{id}")).await
    }
}
