// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

const DEFAULT_LANG: &str = "en";

// Extrator de idioma (só o código primário: "es", "pt", "en")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first() // Pega o primeiro idioma (ex: "es-CL")
                    .map(|tag| {
                        // "es-CL" -> "es"
                        tag.split('-').next().unwrap_or(tag).to_lowercase()
                    })
            })
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}
