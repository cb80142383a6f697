//! Error taxonomy for API calls.
//!
//! Classification rules:
//!
//! - transport failures (network down, timeout) are the only retryable
//!   class, and only for reads;
//! - 401 is terminal and tears down the session;
//! - 400/422 bodies carrying a structured `details` list are collapsed
//!   into a single combined validation message;
//! - everything else surfaces with its status and raw body.

use evotrack_core::error::CoreError;
use evotrack_core::models::ApiErrorBody;

/// Errors surfaced by [`ApiClient`](crate::api::ApiClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response received: network down, DNS failure, or timeout.
    #[error("Server did not respond: {0}")]
    Transport(#[from] reqwest::Error),

    /// 401: the stored credential is no longer valid.
    #[error("Session expired")]
    Unauthorized,

    /// 403: authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 400/422 with a human-readable combined message.
    #[error("{0}")]
    Validation(String),

    /// Any other non-2xx response.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A domain-level error raised before any network call (e.g. an
    /// update payload with nothing left after cleaning).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An invariant violation inside the client/cache machinery itself.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for client call results.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether a read may be retried after this error.  Mutations are
    /// never retried regardless.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Classify a non-2xx response into an [`ApiError`].
///
/// Pure function of the status code and body text so it can be tested
/// without a server.
pub fn classify_response(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(base_message(body).unwrap_or_else(|| "forbidden".into())),
        404 => {
            ApiError::NotFound(base_message(body).unwrap_or_else(|| "resource not found".into()))
        }
        400 | 422 => match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => ApiError::Validation(combine_validation_message(&parsed)),
            Err(_) => ApiError::Api {
                status,
                body: body.to_string(),
            },
        },
        _ => ApiError::Api {
            status,
            body: body.to_string(),
        },
    }
}

/// Extract the base `error` message from a structured body, if any.
fn base_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error)
}

/// Collapse a validation body into one message: the base error followed
/// by each `campo: mensagem` pair.
fn combine_validation_message(body: &ApiErrorBody) -> String {
    match &body.details {
        Some(details) if !details.is_empty() => {
            let fields: Vec<String> = details
                .iter()
                .map(|d| format!("{}: {}", d.campo, d.mensagem))
                .collect();
            format!("{} ({})", body.error, fields.join("; "))
        }
        _ => body.error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn status_401_is_unauthorized() {
        assert_matches!(classify_response(401, ""), ApiError::Unauthorized);
    }

    #[test]
    fn status_403_is_forbidden_with_server_message() {
        let err = classify_response(403, r#"{"error":"Acesso negado"}"#);
        assert_matches!(err, ApiError::Forbidden(msg) if msg == "Acesso negado");
    }

    #[test]
    fn status_403_without_body_uses_fallback_message() {
        assert_matches!(classify_response(403, "nope"), ApiError::Forbidden(msg) if msg == "forbidden");
    }

    #[test]
    fn status_404_is_not_found() {
        let err = classify_response(404, r#"{"error":"Aluno não encontrado"}"#);
        assert_matches!(err, ApiError::NotFound(msg) if msg == "Aluno não encontrado");
    }

    #[test]
    fn validation_details_are_combined_into_one_message() {
        let body = r#"{
            "error": "Dados inválidos",
            "details": [
                {"campo": "email", "mensagem": "obrigatório"},
                {"campo": "pesoKg", "mensagem": "deve ser positivo"}
            ]
        }"#;
        let err = classify_response(422, body);
        assert_matches!(
            err,
            ApiError::Validation(msg)
                if msg == "Dados inválidos (email: obrigatório; pesoKg: deve ser positivo)"
        );
    }

    #[test]
    fn validation_without_details_keeps_base_message() {
        let err = classify_response(400, r#"{"error":"Requisição malformada"}"#);
        assert_matches!(err, ApiError::Validation(msg) if msg == "Requisição malformada");
    }

    #[test]
    fn unstructured_400_falls_back_to_generic_api_error() {
        let err = classify_response(400, "<html>bad request</html>");
        assert_matches!(err, ApiError::Api { status: 400, .. });
    }

    #[test]
    fn unexpected_status_maps_to_generic_api_error() {
        let err = classify_response(500, "boom");
        assert_matches!(err, ApiError::Api { status: 500, body } if body == "boom");
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(!classify_response(401, "").is_retryable());
        assert!(!classify_response(404, "").is_retryable());
        assert!(!classify_response(422, r#"{"error":"x"}"#).is_retryable());
        assert!(!classify_response(500, "").is_retryable());
    }
}
