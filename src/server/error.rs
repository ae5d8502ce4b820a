/*!
 * Mapping of translation failures onto HTTP responses.
 *
 * Server-side failures always answer with the generic
 * "Error translating document" text; the cause is logged where it happened.
 */

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::errors::{ErrorKind, TranslationError};

/// Error returned by HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// No token, or a token that resolves to no user
    #[error("Authentication required")]
    Unauthenticated,

    /// Form body that could not be decoded; only reported once authenticated
    #[error("Malformed form body: {0}")]
    Form(#[from] FormRejection),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::FORBIDDEN,
            Self::Form(rejection) => rejection.status(),
            Self::Translation(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
                ErrorKind::UnsupportedContent => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorKind::ExtractionFailed
                | ErrorKind::TranslationFailed
                | ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error_type, message) = match &self {
            Self::Unauthenticated => ("forbidden", "Forbidden".to_string()),
            Self::Form(rejection) => ("invalid_request", rejection.body_text()),
            Self::Translation(e) => (e.kind().as_str(), e.public_message()),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (self.status(), body).into_response()
    }
}
