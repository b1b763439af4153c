// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

pub const DEFAULT_LANG: &str = "en";

// Extrator de idioma (Accept-Language -> "pt", "en", ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    // "pt-BR, en;q=0.8" -> "pt"
    pub fn from_header(header_str: &str) -> Self {
        accept_language::parse(header_str)
            .first()
            .map(|tag_string| {
                let lang = tag_string.split('-').next().unwrap_or(tag_string);
                Locale(lang.to_lowercase())
            })
            .unwrap_or_default()
    }

    pub fn translate(&self, key: &str) -> &'static str {
        translate(&self.0, key)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}

// Catálogo de mensagens. Idioma desconhecido cai no inglês.
pub fn translate(lang: &str, key: &str) -> &'static str {
    match (lang, key) {
        ("pt", "role.not_found") => "Cargo não encontrado.",
        ("pt", "role.name_taken") => "Já existe um cargo com esse nome.",
        ("pt", "record.not_found") => "Registro não encontrado.",
        ("pt", "record.referenced") => "O registro está vinculado a outros dados.",
        ("pt", "data.invalid") => "Os dados enviados são inválidos.",
        ("pt", "validation.failed") => "Um ou mais campos são inválidos.",
        ("pt", _) => "Ocorreu um erro inesperado.",

        (_, "role.not_found") => "Role not found.",
        (_, "role.name_taken") => "A role with this name already exists.",
        (_, "record.not_found") => "Record not found.",
        (_, "record.referenced") => "The record is referenced by other data.",
        (_, "data.invalid") => "The submitted data is invalid.",
        (_, "validation.failed") => "One or more fields are invalid.",
        _ => "An unexpected error occurred.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn primary_subtag_is_kept() {
        assert_eq!(Locale::from_header("pt-BR,pt;q=0.9,en;q=0.8").0, "pt");
        assert_eq!(Locale::from_header("en-US").0, "en");
    }

    #[test]
    fn empty_header_falls_back_to_default() {
        assert_eq!(Locale::from_header(""), Locale::default());
    }

    #[test]
    fn unknown_language_uses_english_catalog() {
        assert_eq!(translate("de", "role.not_found"), "Role not found.");
        assert_eq!(translate("pt", "role.not_found"), "Cargo não encontrado.");
        assert_eq!(translate("pt", "nope"), "Ocorreu um erro inesperado.");
    }

    #[tokio::test]
    async fn extracts_locale_from_request() {
        let (mut parts, _) = Request::builder()
            .header(header::ACCEPT_LANGUAGE, "pt-BR")
            .body(())
            .unwrap()
            .into_parts();

        let locale = Locale::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(locale.0, "pt");

        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        let locale = Locale::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(locale, Locale::default());
    }
}
