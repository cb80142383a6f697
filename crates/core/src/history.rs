//! Body-measurement history records (`historico` on the wire).
//!
//! A [`MeasurementRecord`] is one snapshot of an aluno's body metrics at a
//! point in time.  Every numeric field is independently optional: absence
//! means "not measured this visit".  The record timestamp
//! (`data_registro`) is distinct from the creation timestamp and is the
//! one evolution charts order by.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Id;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One measurement snapshot for an aluno.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub id: Id,
    pub aluno_id: Id,
    pub peso_kg: Option<f64>,
    pub altura_cm: Option<f64>,
    pub cintura_cm: Option<f64>,
    pub quadril_cm: Option<f64>,
    pub pescoco_cm: Option<f64>,
    pub braco_esquerdo_cm: Option<f64>,
    pub braco_direito_cm: Option<f64>,
    pub perna_esquerda_cm: Option<f64>,
    pub perna_direita_cm: Option<f64>,
    pub percentual_gordura: Option<f64>,
    pub massa_muscular_kg: Option<f64>,
    pub observacoes: Option<String>,
    /// Id of the professor/admin that recorded the measurement.
    pub registrado_por: Id,
    /// When the measurement was taken (not when the row was created).
    pub data_registro: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for `POST /alunos/{alunoId}/historico`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurement {
    pub aluno_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cintura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadril_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescoco_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braco_esquerdo_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braco_direito_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perna_esquerda_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perna_direita_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentual_gordura: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub massa_muscular_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_registro: Option<DateTime<Utc>>,
}

/// Partial update for `PUT /historico/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeasurement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peso_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cintura_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadril_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pescoco_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braco_esquerdo_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub braco_direito_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perna_esquerda_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perna_direita_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentual_gordura: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub massa_muscular_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_registro: Option<DateTime<Utc>>,
}

impl UpdateMeasurement {
    /// Merge the set fields of this update into an existing record.
    pub fn apply_to(&self, record: &mut MeasurementRecord) {
        if let Some(v) = self.peso_kg {
            record.peso_kg = Some(v);
        }
        if let Some(v) = self.altura_cm {
            record.altura_cm = Some(v);
        }
        if let Some(v) = self.cintura_cm {
            record.cintura_cm = Some(v);
        }
        if let Some(v) = self.quadril_cm {
            record.quadril_cm = Some(v);
        }
        if let Some(v) = self.pescoco_cm {
            record.pescoco_cm = Some(v);
        }
        if let Some(v) = self.braco_esquerdo_cm {
            record.braco_esquerdo_cm = Some(v);
        }
        if let Some(v) = self.braco_direito_cm {
            record.braco_direito_cm = Some(v);
        }
        if let Some(v) = self.perna_esquerda_cm {
            record.perna_esquerda_cm = Some(v);
        }
        if let Some(v) = self.perna_direita_cm {
            record.perna_direita_cm = Some(v);
        }
        if let Some(v) = self.percentual_gordura {
            record.percentual_gordura = Some(v);
        }
        if let Some(v) = self.massa_muscular_kg {
            record.massa_muscular_kg = Some(v);
        }
        if let Some(v) = &self.observacoes {
            record.observacoes = Some(v.clone());
        }
        if let Some(v) = self.data_registro {
            record.data_registro = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Query filter
// ---------------------------------------------------------------------------

/// Optional date-range and count filter for history listings.
///
/// Hashable so that differently-filtered listings occupy distinct cache
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HistoryFilter {
    pub data_inicio: Option<DateTime<Utc>>,
    pub data_fim: Option<DateTime<Utc>>,
    pub limite: Option<u32>,
}

impl HistoryFilter {
    pub fn is_empty(&self) -> bool {
        self.data_inicio.is_none() && self.data_fim.is_none() && self.limite.is_none()
    }
}
