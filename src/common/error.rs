use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Timestamp inválido: {0}")]
    InvalidTimestamp(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// Erro já traduzido, pronto para virar resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn message(key: &str, lang: &str) -> &'static str {
    match (key, lang) {
        ("validation", "es") => "Uno o más campos son inválidos.",
        ("validation", "pt") => "Um ou mais campos são inválidos.",
        ("validation", _) => "One or more fields are invalid.",
        ("timestamp", "es") => "La fecha de referencia no es un ISO 8601 válido.",
        ("timestamp", "pt") => "A data de referência não é um ISO 8601 válido.",
        ("timestamp", _) => "The reference date is not a valid ISO 8601 timestamp.",
        (_, "es") => "Ocurrió un error inesperado.",
        (_, "pt") => "Ocorreu um erro inesperado.",
        _ => "An unexpected error occurred.",
    }
}

impl AppError {
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let lang = locale.0.as_str();
        match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    body: json!({
                        "error": message("validation", lang),
                        "details": details,
                    }),
                }
            }
            AppError::InvalidTimestamp(raw) => ApiError {
                status: StatusCode::BAD_REQUEST,
                body: json!({ "error": message("timestamp", lang), "value": raw }),
            },
            // O `tracing` loga a mensagem detalhada; o cliente recebe a genérica.
            e @ AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({ "error": message("internal", lang) }),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_error_is_translated() {
        let err = AppError::InvalidTimestamp("ontem".into()).to_api_error(&Locale("es".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body["error"], "La fecha de referencia no es un ISO 8601 válido.");
        assert_eq!(err.body["value"], "ontem");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let err = AppError::InternalServerError(anyhow::anyhow!("boom")).to_api_error(&Locale("de".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body["error"], "An unexpected error occurred.");
    }
}
