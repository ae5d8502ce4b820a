//! HTTP handlers

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, HeaderMap},
    Form, Json,
};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::errors::TranslationError;
use crate::translation::TranslationResult;

/// Cookie carrying the session token
pub const AUTH_COOKIE: &str = "auth_token";

/// Form body of a translate call
#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    #[serde(rename = "targetLanguage", default)]
    pub target_language: String,
    #[serde(rename = "contentType", default)]
    pub content_type: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.orchestrator.provider().name(),
    })
}

/// `POST /document/:id/translate`
pub async fn translate_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
    form: Result<Form<TranslateForm>, FormRejection>,
) -> Result<Json<TranslationResult>, ApiError> {
    let token = auth_token(&headers).ok_or(ApiError::Unauthenticated)?;

    let requester = state
        .sessions
        .resolve_token(&token)
        .await
        .map_err(|e| {
            error!("Session lookup failed: {:#}", e);
            ApiError::Translation(TranslationError::Storage(e.to_string()))
        })?
        .ok_or(ApiError::Unauthenticated)?;

    let Form(form) = form?;

    debug!(
        "User {} requests {} translation of document {}",
        requester.user_id, form.content_type, document_id
    );

    let result = state
        .orchestrator
        .translate(
            &requester,
            &document_id,
            &form.target_language,
            &form.content_type,
        )
        .await?;

    Ok(Json(result))
}

/// Token from the `auth_token` cookie, or else a bearer authorization header
pub fn auth_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|token| !token.is_empty());

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
        })
        .filter(|token| !token.is_empty())
}
