//! The fixed enumeration of chartable body metrics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::history::MeasurementRecord;

/// One named numeric measurement tracked over time.
///
/// Wire names match the measurement record's camelCase field names
/// (`"pesoKg"`, `"percentualGordura"`, ...).  Height is deliberately not
/// chartable: the console never plots it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    PesoKg,
    CinturaCm,
    QuadrilCm,
    PescocoCm,
    PercentualGordura,
    MassaMuscularKg,
    BracoEsquerdoCm,
    BracoDireitoCm,
    PernaEsquerdaCm,
    PernaDireitaCm,
}

impl Metric {
    /// Every chartable metric, in display order.
    pub const ALL: [Metric; 10] = [
        Metric::PesoKg,
        Metric::CinturaCm,
        Metric::QuadrilCm,
        Metric::PescocoCm,
        Metric::PercentualGordura,
        Metric::MassaMuscularKg,
        Metric::BracoEsquerdoCm,
        Metric::BracoDireitoCm,
        Metric::PernaEsquerdaCm,
        Metric::PernaDireitaCm,
    ];

    /// Project this metric's value out of a measurement record.
    ///
    /// `None` means the metric was not measured on that visit.
    pub fn value_of(self, record: &MeasurementRecord) -> Option<f64> {
        match self {
            Self::PesoKg => record.peso_kg,
            Self::CinturaCm => record.cintura_cm,
            Self::QuadrilCm => record.quadril_cm,
            Self::PescocoCm => record.pescoco_cm,
            Self::PercentualGordura => record.percentual_gordura,
            Self::MassaMuscularKg => record.massa_muscular_kg,
            Self::BracoEsquerdoCm => record.braco_esquerdo_cm,
            Self::BracoDireitoCm => record.braco_direito_cm,
            Self::PernaEsquerdaCm => record.perna_esquerda_cm,
            Self::PernaDireitaCm => record.perna_direita_cm,
        }
    }

    /// Wire name, e.g. `"pesoKg"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PesoKg => "pesoKg",
            Self::CinturaCm => "cinturaCm",
            Self::QuadrilCm => "quadrilCm",
            Self::PescocoCm => "pescocoCm",
            Self::PercentualGordura => "percentualGordura",
            Self::MassaMuscularKg => "massaMuscularKg",
            Self::BracoEsquerdoCm => "bracoEsquerdoCm",
            Self::BracoDireitoCm => "bracoDireitoCm",
            Self::PernaEsquerdaCm => "pernaEsquerdaCm",
            Self::PernaDireitaCm => "pernaDireitaCm",
        }
    }

    /// Human-readable label used in chart headers.
    pub fn label(self) -> &'static str {
        match self {
            Self::PesoKg => "Peso (kg)",
            Self::CinturaCm => "Cintura (cm)",
            Self::QuadrilCm => "Quadril (cm)",
            Self::PescocoCm => "Pescoço (cm)",
            Self::PercentualGordura => "% Gordura",
            Self::MassaMuscularKg => "Massa Muscular (kg)",
            Self::BracoEsquerdoCm => "Braço Esquerdo (cm)",
            Self::BracoDireitoCm => "Braço Direito (cm)",
            Self::PernaEsquerdaCm => "Perna Esquerda (cm)",
            Self::PernaDireitaCm => "Perna Direita (cm)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn record() -> MeasurementRecord {
        MeasurementRecord {
            id: "h1".into(),
            aluno_id: "a1".into(),
            peso_kg: Some(70.0),
            altura_cm: Some(180.0),
            cintura_cm: None,
            quadril_cm: None,
            pescoco_cm: None,
            braco_esquerdo_cm: Some(35.0),
            braco_direito_cm: None,
            perna_esquerda_cm: None,
            perna_direita_cm: None,
            percentual_gordura: Some(18.2),
            massa_muscular_kg: None,
            observacoes: None,
            registrado_por: "p1".into(),
            data_registro: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn value_of_projects_the_selected_field() {
        let r = record();
        assert_eq!(Metric::PesoKg.value_of(&r), Some(70.0));
        assert_eq!(Metric::PercentualGordura.value_of(&r), Some(18.2));
        assert_eq!(Metric::BracoEsquerdoCm.value_of(&r), Some(35.0));
        assert_eq!(Metric::CinturaCm.value_of(&r), None);
    }

    #[test]
    fn wire_names_round_trip_serde_and_from_str() {
        for metric in Metric::ALL {
            let json = serde_json::to_value(metric).unwrap();
            assert_eq!(json, metric.as_str());
            let parsed: Metric = metric.as_str().parse().unwrap();
            assert_eq!(parsed, metric);
            let back: Metric = serde_json::from_value(json).unwrap();
            assert_eq!(back, metric);
        }
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = "alturaCm".parse::<Metric>();
        assert_matches!(err, Err(CoreError::UnknownMetric(name)) if name == "alturaCm");
    }
}
