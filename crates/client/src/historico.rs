//! Measurement-history endpoints.
//!
//! Listings are nested under the owning aluno
//! (`/alunos/{id}/historico`); individual records are addressed flat
//! (`/historico/{id}`).

use chrono::SecondsFormat;

use evotrack_core::history::{CreateMeasurement, HistoryFilter, MeasurementRecord, UpdateMeasurement};
use evotrack_core::payload;

use crate::api::ApiClient;
use crate::error::ApiResult;

/// Build the `dataInicio` / `dataFim` / `limite` query pairs for a
/// history listing.  Unset filter fields produce no pair.
pub fn history_query(filter: &HistoryFilter) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(inicio) = filter.data_inicio {
        query.push(("dataInicio", inicio.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    if let Some(fim) = filter.data_fim {
        query.push(("dataFim", fim.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    if let Some(limite) = filter.limite {
        query.push(("limite", limite.to_string()));
    }
    query
}

impl ApiClient {
    /// `GET /alunos/{alunoId}/historico[?dataInicio&dataFim&limite]`.
    pub async fn list_history(
        &self,
        aluno_id: &str,
        filter: &HistoryFilter,
    ) -> ApiResult<Vec<MeasurementRecord>> {
        self.get_json(&format!("/alunos/{aluno_id}/historico"), &history_query(filter))
            .await
    }

    /// `GET /alunos/{alunoId}/historico/latest`.
    pub async fn latest_history(&self, aluno_id: &str) -> ApiResult<MeasurementRecord> {
        self.get_json(&format!("/alunos/{aluno_id}/historico/latest"), &[])
            .await
    }

    /// `POST /alunos/{alunoId}/historico`.
    pub async fn create_history(&self, dto: &CreateMeasurement) -> ApiResult<MeasurementRecord> {
        let body = payload::clean_create(dto)?;
        self.post_json(&format!("/alunos/{}/historico", dto.aluno_id), &body)
            .await
    }

    /// `PUT /historico/{id}` — rejects updates with no set fields.
    pub async fn update_history(
        &self,
        id: &str,
        dto: &UpdateMeasurement,
    ) -> ApiResult<MeasurementRecord> {
        let body = payload::clean_update(dto)?;
        self.put_json(&format!("/historico/{id}"), &body).await
    }

    /// `DELETE /historico/{id}`.
    pub async fn delete_history(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/historico/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_filter_builds_no_query_pairs() {
        assert!(history_query(&HistoryFilter::default()).is_empty());
    }

    #[test]
    fn full_filter_builds_all_three_pairs() {
        let filter = HistoryFilter {
            data_inicio: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            data_fim: Some(Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap()),
            limite: Some(50),
        };
        let query = history_query(&filter);
        assert_eq!(
            query,
            vec![
                ("dataInicio", "2024-01-01T00:00:00Z".to_string()),
                ("dataFim", "2024-06-30T23:59:59Z".to_string()),
                ("limite", "50".to_string()),
            ]
        );
    }

    #[test]
    fn partial_filter_omits_unset_fields() {
        let filter = HistoryFilter {
            limite: Some(10),
            ..Default::default()
        };
        let query = history_query(&filter);
        assert_eq!(query, vec![("limite", "10".to_string())]);
    }
}
