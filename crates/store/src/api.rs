//! Transport abstraction consumed by the resource stores.
//!
//! [`RemoteApi`] mirrors the typed endpoint surface of
//! [`ApiClient`](evotrack_client::api::ApiClient) so stores can run
//! against the real HTTP client in production and an in-memory stub in
//! tests.

use async_trait::async_trait;

use evotrack_client::api::ApiClient;
use evotrack_client::error::ApiResult;
use evotrack_core::history::{CreateMeasurement, HistoryFilter, MeasurementRecord, UpdateMeasurement};
use evotrack_core::models::{
    Aluno, CreateAluno, CreateInviteCode, CreateProfessor, CreateUserAnswer, InviteCode, Professor,
    UpdateAluno, UpdateProfessor, UpdateUserAnswer, UserAnswer,
};

/// The remote operations the stores depend on.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    // -- alunos --
    async fn list_alunos(&self) -> ApiResult<Vec<Aluno>>;
    async fn get_aluno(&self, id: &str) -> ApiResult<Aluno>;
    async fn create_aluno(&self, dto: &CreateAluno) -> ApiResult<Aluno>;
    async fn update_aluno(&self, id: &str, dto: &UpdateAluno) -> ApiResult<Aluno>;
    async fn delete_aluno(&self, id: &str) -> ApiResult<()>;

    // -- professores --
    async fn list_professores(&self) -> ApiResult<Vec<Professor>>;
    async fn get_professor(&self, id: &str) -> ApiResult<Professor>;
    async fn create_professor(&self, dto: &CreateProfessor) -> ApiResult<Professor>;
    async fn update_professor(&self, id: &str, dto: &UpdateProfessor) -> ApiResult<Professor>;
    async fn delete_professor(&self, id: &str) -> ApiResult<()>;

    // -- invite codes --
    async fn list_invite_codes(&self) -> ApiResult<Vec<InviteCode>>;
    async fn create_invite_code(&self, dto: &CreateInviteCode) -> ApiResult<InviteCode>;
    async fn delete_invite_code(&self, id: &str) -> ApiResult<()>;

    // -- intake-questionnaire answers --
    async fn list_answers(&self) -> ApiResult<Vec<UserAnswer>>;
    async fn get_answer(&self, id: &str) -> ApiResult<UserAnswer>;
    async fn create_answer(&self, dto: &CreateUserAnswer) -> ApiResult<UserAnswer>;
    async fn update_answer(&self, id: &str, dto: &UpdateUserAnswer) -> ApiResult<UserAnswer>;
    async fn delete_answer(&self, id: &str) -> ApiResult<()>;

    // -- measurement history --
    async fn list_history(
        &self,
        aluno_id: &str,
        filter: &HistoryFilter,
    ) -> ApiResult<Vec<MeasurementRecord>>;
    async fn latest_history(&self, aluno_id: &str) -> ApiResult<MeasurementRecord>;
    async fn create_history(&self, dto: &CreateMeasurement) -> ApiResult<MeasurementRecord>;
    async fn update_history(&self, id: &str, dto: &UpdateMeasurement)
        -> ApiResult<MeasurementRecord>;
    async fn delete_history(&self, id: &str) -> ApiResult<()>;
}

#[async_trait]
impl RemoteApi for ApiClient {
    async fn list_alunos(&self) -> ApiResult<Vec<Aluno>> {
        ApiClient::list_alunos(self).await
    }

    async fn get_aluno(&self, id: &str) -> ApiResult<Aluno> {
        ApiClient::get_aluno(self, id).await
    }

    async fn create_aluno(&self, dto: &CreateAluno) -> ApiResult<Aluno> {
        ApiClient::create_aluno(self, dto).await
    }

    async fn update_aluno(&self, id: &str, dto: &UpdateAluno) -> ApiResult<Aluno> {
        ApiClient::update_aluno(self, id, dto).await
    }

    async fn delete_aluno(&self, id: &str) -> ApiResult<()> {
        ApiClient::delete_aluno(self, id).await
    }

    async fn list_professores(&self) -> ApiResult<Vec<Professor>> {
        ApiClient::list_professores(self).await
    }

    async fn get_professor(&self, id: &str) -> ApiResult<Professor> {
        ApiClient::get_professor(self, id).await
    }

    async fn create_professor(&self, dto: &CreateProfessor) -> ApiResult<Professor> {
        ApiClient::create_professor(self, dto).await
    }

    async fn update_professor(&self, id: &str, dto: &UpdateProfessor) -> ApiResult<Professor> {
        ApiClient::update_professor(self, id, dto).await
    }

    async fn delete_professor(&self, id: &str) -> ApiResult<()> {
        ApiClient::delete_professor(self, id).await
    }

    async fn list_invite_codes(&self) -> ApiResult<Vec<InviteCode>> {
        ApiClient::list_invite_codes(self).await
    }

    async fn create_invite_code(&self, dto: &CreateInviteCode) -> ApiResult<InviteCode> {
        ApiClient::create_invite_code(self, dto).await
    }

    async fn delete_invite_code(&self, id: &str) -> ApiResult<()> {
        ApiClient::delete_invite_code(self, id).await
    }

    async fn list_answers(&self) -> ApiResult<Vec<UserAnswer>> {
        ApiClient::list_answers(self).await
    }

    async fn get_answer(&self, id: &str) -> ApiResult<UserAnswer> {
        ApiClient::get_answer(self, id).await
    }

    async fn create_answer(&self, dto: &CreateUserAnswer) -> ApiResult<UserAnswer> {
        ApiClient::create_answer(self, dto).await
    }

    async fn update_answer(&self, id: &str, dto: &UpdateUserAnswer) -> ApiResult<UserAnswer> {
        ApiClient::update_answer(self, id, dto).await
    }

    async fn delete_answer(&self, id: &str) -> ApiResult<()> {
        ApiClient::delete_answer(self, id).await
    }

    async fn list_history(
        &self,
        aluno_id: &str,
        filter: &HistoryFilter,
    ) -> ApiResult<Vec<MeasurementRecord>> {
        ApiClient::list_history(self, aluno_id, filter).await
    }

    async fn latest_history(&self, aluno_id: &str) -> ApiResult<MeasurementRecord> {
        ApiClient::latest_history(self, aluno_id).await
    }

    async fn create_history(&self, dto: &CreateMeasurement) -> ApiResult<MeasurementRecord> {
        ApiClient::create_history(self, dto).await
    }

    async fn update_history(
        &self,
        id: &str,
        dto: &UpdateMeasurement,
    ) -> ApiResult<MeasurementRecord> {
        ApiClient::update_history(self, id, dto).await
    }

    async fn delete_history(&self, id: &str) -> ApiResult<()> {
        ApiClient::delete_history(self, id).await
    }
}
