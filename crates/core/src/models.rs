//! Entity models and DTOs for the coaching API.
//!
//! Field names follow the API's wire format (Portuguese camelCase, with a
//! handful of snake_case nutrition fields kept exactly as the server
//! sends them).  Optional DTO fields use `skip_serializing_if` so that
//! unset fields are omitted from request bodies entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Id, Role};

// ---------------------------------------------------------------------------
// Users & auth
// ---------------------------------------------------------------------------

/// An authenticated account (admin, professor, or aluno).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub nome: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
}

// ---------------------------------------------------------------------------
// Invite codes
// ---------------------------------------------------------------------------

/// A single-use registration token created by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteCode {
    pub id: Id,
    pub code: String,
    pub role: Role,
    pub used_by: Option<Id>,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Id,
    pub created_at: DateTime<Utc>,
}

/// DTO for `POST /invite-codes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteCode {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

// ---------------------------------------------------------------------------
// Alunos
// ---------------------------------------------------------------------------

/// A student managed by a professor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    pub id: Id,
    pub user_id: Id,
    pub professor_id: Id,
    pub telefone: Option<String>,
    pub altura_cm: Option<f64>,
    pub peso_kg: Option<f64>,
    pub idade: Option<u32>,
    pub cintura_cm: Option<f64>,
    pub quadril_cm: Option<f64>,
    pub pescoco_cm: Option<f64>,
    #[serde(rename = "alimentos_quer_diario")]
    pub alimentos_quer_diario: Option<Vec<String>>,
    #[serde(rename = "alimentos_nao_comem")]
    pub alimentos_nao_comem: Option<Vec<String>>,
    #[serde(rename = "alergias_alimentares")]
    pub alergias_alimentares: Option<Vec<String>>,
    #[serde(rename = "dores_articulares")]
    pub dores_articulares: Option<String>,
    #[serde(rename = "suplementos_consumidos")]
    pub suplementos_consumidos: Option<Vec<String>>,
    #[serde(rename = "dias_treino_semana")]
    pub dias_treino_semana: Option<u32>,
    #[serde(rename = "frequencia_horarios_refeicoes")]
    pub frequencia_horarios_refeicoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for `POST /alunos`: creates the backing user account and the
/// aluno record linked to a professor in one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAluno {
    pub nome: String,
    pub email: String,
    pub password: String,
    pub professor_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cintura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadril_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescoco_cm: Option<f64>,
    #[serde(rename = "alimentos_quer_diario", skip_serializing_if = "Option::is_none")]
    pub alimentos_quer_diario: Option<Vec<String>>,
    #[serde(rename = "alimentos_nao_comem", skip_serializing_if = "Option::is_none")]
    pub alimentos_nao_comem: Option<Vec<String>>,
    #[serde(rename = "alergias_alimentares", skip_serializing_if = "Option::is_none")]
    pub alergias_alimentares: Option<Vec<String>>,
    #[serde(rename = "suplementos_consumidos", skip_serializing_if = "Option::is_none")]
    pub suplementos_consumidos: Option<Vec<String>>,
    #[serde(rename = "dores_articulares", skip_serializing_if = "Option::is_none")]
    pub dores_articulares: Option<String>,
    #[serde(rename = "dias_treino_semana", skip_serializing_if = "Option::is_none")]
    pub dias_treino_semana: Option<u32>,
    #[serde(rename = "frequencia_horarios_refeicoes", skip_serializing_if = "Option::is_none")]
    pub frequencia_horarios_refeicoes: Option<String>,
}

/// Partial update for `PUT /alunos/{id}`.  Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAluno {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cintura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadril_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescoco_cm: Option<f64>,
    #[serde(rename = "alimentos_quer_diario", skip_serializing_if = "Option::is_none")]
    pub alimentos_quer_diario: Option<Vec<String>>,
    #[serde(rename = "alimentos_nao_comem", skip_serializing_if = "Option::is_none")]
    pub alimentos_nao_comem: Option<Vec<String>>,
    #[serde(rename = "alergias_alimentares", skip_serializing_if = "Option::is_none")]
    pub alergias_alimentares: Option<Vec<String>>,
    #[serde(rename = "suplementos_consumidos", skip_serializing_if = "Option::is_none")]
    pub suplementos_consumidos: Option<Vec<String>>,
    #[serde(rename = "dores_articulares", skip_serializing_if = "Option::is_none")]
    pub dores_articulares: Option<String>,
    #[serde(rename = "dias_treino_semana", skip_serializing_if = "Option::is_none")]
    pub dias_treino_semana: Option<u32>,
    #[serde(rename = "frequencia_horarios_refeicoes", skip_serializing_if = "Option::is_none")]
    pub frequencia_horarios_refeicoes: Option<String>,
}

impl UpdateAluno {
    /// Merge the set fields of this update into an existing record, as the
    /// optimistic-cache layer does before server confirmation arrives.
    pub fn apply_to(&self, aluno: &mut Aluno) {
        if let Some(v) = &self.telefone {
            aluno.telefone = Some(v.clone());
        }
        if let Some(v) = self.altura_cm {
            aluno.altura_cm = Some(v);
        }
        if let Some(v) = self.peso_kg {
            aluno.peso_kg = Some(v);
        }
        if let Some(v) = self.idade {
            aluno.idade = Some(v);
        }
        if let Some(v) = self.cintura_cm {
            aluno.cintura_cm = Some(v);
        }
        if let Some(v) = self.quadril_cm {
            aluno.quadril_cm = Some(v);
        }
        if let Some(v) = self.pescoco_cm {
            aluno.pescoco_cm = Some(v);
        }
        if let Some(v) = &self.alimentos_quer_diario {
            aluno.alimentos_quer_diario = Some(v.clone());
        }
        if let Some(v) = &self.alimentos_nao_comem {
            aluno.alimentos_nao_comem = Some(v.clone());
        }
        if let Some(v) = &self.alergias_alimentares {
            aluno.alergias_alimentares = Some(v.clone());
        }
        if let Some(v) = &self.suplementos_consumidos {
            aluno.suplementos_consumidos = Some(v.clone());
        }
        if let Some(v) = &self.dores_articulares {
            aluno.dores_articulares = Some(v.clone());
        }
        if let Some(v) = self.dias_treino_semana {
            aluno.dias_treino_semana = Some(v);
        }
        if let Some(v) = &self.frequencia_horarios_refeicoes {
            aluno.frequencia_horarios_refeicoes = Some(v.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// User answers (intake questionnaire)
// ---------------------------------------------------------------------------

/// One intake-questionnaire submission: the same body profile an aluno
/// record carries, but submitted by a prospect before any account or
/// professor assignment exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: Id,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub altura_cm: Option<f64>,
    pub peso_kg: Option<f64>,
    pub idade: Option<u32>,
    pub cintura_cm: Option<f64>,
    pub quadril_cm: Option<f64>,
    pub pescoco_cm: Option<f64>,
    #[serde(rename = "alimentos_quer_diario")]
    pub alimentos_quer_diario: Option<Vec<String>>,
    #[serde(rename = "alimentos_nao_comem")]
    pub alimentos_nao_comem: Option<Vec<String>>,
    #[serde(rename = "alergias_alimentares")]
    pub alergias_alimentares: Option<Vec<String>>,
    #[serde(rename = "dores_articulares")]
    pub dores_articulares: Option<String>,
    #[serde(rename = "suplementos_consumidos")]
    pub suplementos_consumidos: Option<Vec<String>>,
    #[serde(rename = "dias_treino_semana")]
    pub dias_treino_semana: Option<u32>,
    #[serde(rename = "frequencia_horarios_refeicoes")]
    pub frequencia_horarios_refeicoes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO for `POST /answers` — the public questionnaire form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserAnswer {
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cintura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadril_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescoco_cm: Option<f64>,
    #[serde(rename = "alimentos_quer_diario", skip_serializing_if = "Option::is_none")]
    pub alimentos_quer_diario: Option<Vec<String>>,
    #[serde(rename = "alimentos_nao_comem", skip_serializing_if = "Option::is_none")]
    pub alimentos_nao_comem: Option<Vec<String>>,
    #[serde(rename = "alergias_alimentares", skip_serializing_if = "Option::is_none")]
    pub alergias_alimentares: Option<Vec<String>>,
    #[serde(rename = "dores_articulares", skip_serializing_if = "Option::is_none")]
    pub dores_articulares: Option<String>,
    #[serde(rename = "suplementos_consumidos", skip_serializing_if = "Option::is_none")]
    pub suplementos_consumidos: Option<Vec<String>>,
    #[serde(rename = "dias_treino_semana", skip_serializing_if = "Option::is_none")]
    pub dias_treino_semana: Option<u32>,
    #[serde(rename = "frequencia_horarios_refeicoes", skip_serializing_if = "Option::is_none")]
    pub frequencia_horarios_refeicoes: Option<String>,
}

/// Partial update for `PUT /answers/{id}`.  Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idade: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cintura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadril_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescoco_cm: Option<f64>,
    #[serde(rename = "alimentos_quer_diario", skip_serializing_if = "Option::is_none")]
    pub alimentos_quer_diario: Option<Vec<String>>,
    #[serde(rename = "alimentos_nao_comem", skip_serializing_if = "Option::is_none")]
    pub alimentos_nao_comem: Option<Vec<String>>,
    #[serde(rename = "alergias_alimentares", skip_serializing_if = "Option::is_none")]
    pub alergias_alimentares: Option<Vec<String>>,
    #[serde(rename = "dores_articulares", skip_serializing_if = "Option::is_none")]
    pub dores_articulares: Option<String>,
    #[serde(rename = "suplementos_consumidos", skip_serializing_if = "Option::is_none")]
    pub suplementos_consumidos: Option<Vec<String>>,
    #[serde(rename = "dias_treino_semana", skip_serializing_if = "Option::is_none")]
    pub dias_treino_semana: Option<u32>,
    #[serde(rename = "frequencia_horarios_refeicoes", skip_serializing_if = "Option::is_none")]
    pub frequencia_horarios_refeicoes: Option<String>,
}

impl UpdateUserAnswer {
    /// Merge the set fields of this update into an existing submission.
    pub fn apply_to(&self, answer: &mut UserAnswer) {
        if let Some(v) = &self.nome {
            answer.nome = v.clone();
        }
        if let Some(v) = &self.email {
            answer.email = v.clone();
        }
        if let Some(v) = &self.telefone {
            answer.telefone = Some(v.clone());
        }
        if let Some(v) = self.altura_cm {
            answer.altura_cm = Some(v);
        }
        if let Some(v) = self.peso_kg {
            answer.peso_kg = Some(v);
        }
        if let Some(v) = self.idade {
            answer.idade = Some(v);
        }
        if let Some(v) = self.cintura_cm {
            answer.cintura_cm = Some(v);
        }
        if let Some(v) = self.quadril_cm {
            answer.quadril_cm = Some(v);
        }
        if let Some(v) = self.pescoco_cm {
            answer.pescoco_cm = Some(v);
        }
        if let Some(v) = &self.alimentos_quer_diario {
            answer.alimentos_quer_diario = Some(v.clone());
        }
        if let Some(v) = &self.alimentos_nao_comem {
            answer.alimentos_nao_comem = Some(v.clone());
        }
        if let Some(v) = &self.alergias_alimentares {
            answer.alergias_alimentares = Some(v.clone());
        }
        if let Some(v) = &self.dores_articulares {
            answer.dores_articulares = Some(v.clone());
        }
        if let Some(v) = &self.suplementos_consumidos {
            answer.suplementos_consumidos = Some(v.clone());
        }
        if let Some(v) = self.dias_treino_semana {
            answer.dias_treino_semana = Some(v);
        }
        if let Some(v) = &self.frequencia_horarios_refeicoes {
            answer.frequencia_horarios_refeicoes = Some(v.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Professores
// ---------------------------------------------------------------------------

/// A coach responsible for a set of alunos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub id: Id,
    pub user_id: Id,
    pub nome: String,
    pub email: String,
    pub telefone: Option<String>,
    pub especialidade: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for `POST /professores`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfessor {
    pub nome: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
}

/// Partial update for `PUT /professores/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfessor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub especialidade: Option<String>,
}

impl UpdateProfessor {
    /// Merge the set fields of this update into an existing record.
    pub fn apply_to(&self, professor: &mut Professor) {
        if let Some(v) = &self.nome {
            professor.nome = v.clone();
        }
        if let Some(v) = &self.email {
            professor.email = v.clone();
        }
        if let Some(v) = &self.telefone {
            professor.telefone = Some(v.clone());
        }
        if let Some(v) = &self.especialidade {
            professor.especialidade = Some(v.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// API error body
// ---------------------------------------------------------------------------

/// Structured error payload returned by the API on validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Option<Vec<FieldError>>,
}

/// One field/message pair inside a validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    pub campo: String,
    pub mensagem: String,
}
