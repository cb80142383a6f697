//! Shared identifier and role types.

use serde::{Deserialize, Serialize};

/// Opaque resource identifier as issued by the API.
pub type Id = String;

/// Account role.
///
/// Modelled as a closed enum so that role checks are exhaustive matches
/// rather than ad-hoc string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Professor,
    Aluno,
}

impl Role {
    /// Wire name used by the API (`"ADMIN"`, `"PROFESSOR"`, `"ALUNO"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Professor => "PROFESSOR",
            Self::Aluno => "ALUNO",
        }
    }
}
