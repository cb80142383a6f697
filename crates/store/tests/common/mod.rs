//! In-memory [`RemoteApi`] stub shared by the store integration tests.
//!
//! Holds the "server-side" records behind mutexes, counts calls per
//! endpoint, and can be armed to fail the next N reads (with a retryable
//! transport error) or writes (with a validation error).

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

use evotrack_client::error::{ApiError, ApiResult};
use evotrack_core::history::{CreateMeasurement, HistoryFilter, MeasurementRecord, UpdateMeasurement};
use evotrack_core::models::{
    Aluno, CreateAluno, CreateInviteCode, CreateProfessor, CreateUserAnswer, InviteCode, Professor,
    UpdateAluno, UpdateProfessor, UpdateUserAnswer, UserAnswer,
};
use evotrack_store::api::RemoteApi;

/// A retryable error, as produced by a connection failure.
pub fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("http://[::invalid::]")
        .build()
        .expect_err("url must not parse");
    ApiError::Transport(err)
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap()
}

pub fn sample_aluno(id: &str, user_id: &str) -> Aluno {
    Aluno {
        id: id.to_string(),
        user_id: user_id.to_string(),
        professor_id: "p1".into(),
        telefone: None,
        altura_cm: Some(175.0),
        peso_kg: Some(80.0),
        idade: Some(28),
        cintura_cm: None,
        quadril_cm: None,
        pescoco_cm: None,
        alimentos_quer_diario: None,
        alimentos_nao_comem: None,
        alergias_alimentares: None,
        dores_articulares: None,
        suplementos_consumidos: None,
        dias_treino_semana: Some(3),
        frequencia_horarios_refeicoes: None,
        created_at: base_time(),
        updated_at: base_time(),
    }
}

pub fn sample_record(id: &str, aluno_id: &str, day: i64, peso: f64) -> MeasurementRecord {
    MeasurementRecord {
        id: id.to_string(),
        aluno_id: aluno_id.to_string(),
        peso_kg: Some(peso),
        altura_cm: None,
        cintura_cm: None,
        quadril_cm: None,
        pescoco_cm: None,
        braco_esquerdo_cm: None,
        braco_direito_cm: None,
        perna_esquerda_cm: None,
        perna_direita_cm: None,
        percentual_gordura: None,
        massa_muscular_kg: None,
        observacoes: None,
        registrado_por: "p1".into(),
        data_registro: base_time() + ChronoDuration::days(day),
        created_at: base_time() + ChronoDuration::days(day),
    }
}

pub fn sample_answer(id: &str, nome: &str) -> UserAnswer {
    UserAnswer {
        id: id.to_string(),
        nome: nome.to_string(),
        email: format!("{}@example.com", nome.to_lowercase()),
        telefone: None,
        altura_cm: Some(170.0),
        peso_kg: Some(72.0),
        idade: Some(30),
        cintura_cm: None,
        quadril_cm: None,
        pescoco_cm: None,
        alimentos_quer_diario: None,
        alimentos_nao_comem: None,
        alergias_alimentares: None,
        dores_articulares: None,
        suplementos_consumidos: None,
        dias_treino_semana: None,
        frequencia_horarios_refeicoes: None,
        created_at: base_time(),
    }
}

#[derive(Default)]
pub struct StubApi {
    pub alunos: Mutex<Vec<Aluno>>,
    pub answers: Mutex<Vec<UserAnswer>>,
    pub history: Mutex<Vec<MeasurementRecord>>,
    pub list_aluno_calls: AtomicUsize,
    pub list_answer_calls: AtomicUsize,
    pub list_history_calls: AtomicUsize,
    pub latest_history_calls: AtomicUsize,
    /// Remaining reads to fail with a retryable transport error.
    pub fail_reads: AtomicUsize,
    /// Remaining writes to fail with a non-retryable validation error.
    pub fail_writes: AtomicUsize,
    next_id: AtomicUsize,
}

impl StubApi {
    pub fn with_alunos(alunos: Vec<Aluno>) -> Self {
        Self {
            alunos: Mutex::new(alunos),
            ..Self::default()
        }
    }

    pub fn with_answers(answers: Vec<UserAnswer>) -> Self {
        Self {
            answers: Mutex::new(answers),
            ..Self::default()
        }
    }

    pub fn with_history(history: Vec<MeasurementRecord>) -> Self {
        Self {
            history: Mutex::new(history),
            ..Self::default()
        }
    }

    fn take_read_failure(&self) -> Option<ApiError> {
        take_one(&self.fail_reads).then(transport_error)
    }

    fn take_write_failure(&self) -> Option<ApiError> {
        take_one(&self.fail_writes)
            .then(|| ApiError::Validation("Dados inválidos (pesoKg: deve ser positivo)".into()))
    }

    fn mint_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

#[async_trait]
impl RemoteApi for StubApi {
    async fn list_alunos(&self) -> ApiResult<Vec<Aluno>> {
        self.list_aluno_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_read_failure() {
            return Err(err);
        }
        Ok(self.alunos.lock().unwrap().clone())
    }

    async fn get_aluno(&self, id: &str) -> ApiResult<Aluno> {
        self.alunos
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Aluno não encontrado".into()))
    }

    async fn create_aluno(&self, dto: &CreateAluno) -> ApiResult<Aluno> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut aluno = sample_aluno(&self.mint_id("aluno"), &self.mint_id("user"));
        aluno.professor_id = dto.professor_id.clone();
        aluno.telefone = dto.telefone.clone();
        aluno.peso_kg = dto.peso_kg;
        aluno.altura_cm = dto.altura_cm;
        self.alunos.lock().unwrap().push(aluno.clone());
        Ok(aluno)
    }

    async fn update_aluno(&self, id: &str, dto: &UpdateAluno) -> ApiResult<Aluno> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut alunos = self.alunos.lock().unwrap();
        let aluno = alunos
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::NotFound("Aluno não encontrado".into()))?;
        dto.apply_to(aluno);
        // The server stamps the row; the optimistic guess cannot know this.
        aluno.updated_at = base_time() + ChronoDuration::hours(1);
        Ok(aluno.clone())
    }

    async fn delete_aluno(&self, id: &str) -> ApiResult<()> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        self.alunos.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn list_professores(&self) -> ApiResult<Vec<Professor>> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn get_professor(&self, _id: &str) -> ApiResult<Professor> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn create_professor(&self, _dto: &CreateProfessor) -> ApiResult<Professor> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn update_professor(&self, _id: &str, _dto: &UpdateProfessor) -> ApiResult<Professor> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn delete_professor(&self, _id: &str) -> ApiResult<()> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn list_invite_codes(&self) -> ApiResult<Vec<InviteCode>> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn create_invite_code(&self, _dto: &CreateInviteCode) -> ApiResult<InviteCode> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn delete_invite_code(&self, _id: &str) -> ApiResult<()> {
        Err(ApiError::Internal("not stubbed".into()))
    }

    async fn list_answers(&self) -> ApiResult<Vec<UserAnswer>> {
        self.list_answer_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_read_failure() {
            return Err(err);
        }
        Ok(self.answers.lock().unwrap().clone())
    }

    async fn get_answer(&self, id: &str) -> ApiResult<UserAnswer> {
        self.answers
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Resposta não encontrada".into()))
    }

    async fn create_answer(&self, dto: &CreateUserAnswer) -> ApiResult<UserAnswer> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut answer = sample_answer(&self.mint_id("answer"), &dto.nome);
        answer.email = dto.email.clone();
        answer.telefone = dto.telefone.clone();
        answer.peso_kg = dto.peso_kg;
        answer.altura_cm = dto.altura_cm;
        self.answers.lock().unwrap().push(answer.clone());
        Ok(answer)
    }

    async fn update_answer(&self, id: &str, dto: &UpdateUserAnswer) -> ApiResult<UserAnswer> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut answers = self.answers.lock().unwrap();
        let answer = answers
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::NotFound("Resposta não encontrada".into()))?;
        dto.apply_to(answer);
        Ok(answer.clone())
    }

    async fn delete_answer(&self, id: &str) -> ApiResult<()> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        self.answers.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn list_history(
        &self,
        aluno_id: &str,
        filter: &HistoryFilter,
    ) -> ApiResult<Vec<MeasurementRecord>> {
        self.list_history_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_read_failure() {
            return Err(err);
        }
        let mut records: Vec<_> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.aluno_id == aluno_id)
            .filter(|r| filter.data_inicio.map(|d| r.data_registro >= d).unwrap_or(true))
            .filter(|r| filter.data_fim.map(|d| r.data_registro <= d).unwrap_or(true))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.data_registro.cmp(&a.data_registro));
        if let Some(limite) = filter.limite {
            records.truncate(limite as usize);
        }
        Ok(records)
    }

    async fn latest_history(&self, aluno_id: &str) -> ApiResult<MeasurementRecord> {
        self.latest_history_calls.fetch_add(1, Ordering::SeqCst);
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.aluno_id == aluno_id)
            .max_by_key(|r| r.data_registro)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Sem medições".into()))
    }

    async fn create_history(&self, dto: &CreateMeasurement) -> ApiResult<MeasurementRecord> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut record = sample_record(&self.mint_id("hist"), &dto.aluno_id, 0, 0.0);
        record.peso_kg = dto.peso_kg;
        record.cintura_cm = dto.cintura_cm;
        record.observacoes = dto.observacoes.clone();
        if let Some(data) = dto.data_registro {
            record.data_registro = data;
        }
        self.history.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_history(
        &self,
        id: &str,
        dto: &UpdateMeasurement,
    ) -> ApiResult<MeasurementRecord> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        let mut history = self.history.lock().unwrap();
        let record = history
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::NotFound("Registro não encontrado".into()))?;
        dto.apply_to(record);
        Ok(record.clone())
    }

    async fn delete_history(&self, id: &str) -> ApiResult<()> {
        if let Some(err) = self.take_write_failure() {
            return Err(err);
        }
        self.history.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}
