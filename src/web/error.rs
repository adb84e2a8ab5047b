use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::core::CatalogError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug)]
pub enum WebError {
    Catalog(CatalogError),
    /// Request could not be decoded: malformed JSON body or non-numeric id.
    Input(String),
}

impl From<CatalogError> for WebError {
    fn from(err: CatalogError) -> Self {
        WebError::Catalog(err)
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Input(_) => StatusCode::BAD_REQUEST,
            WebError::Catalog(err) => match err {
                CatalogError::Validation(_) | CatalogError::ReferenceNotFound { .. } => {
                    StatusCode::BAD_REQUEST
                }
                CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                CatalogError::Io { .. } | CatalogError::Parse { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            WebError::Input(message) => ErrorResponse {
                message,
                error: "validation",
                detail: None,
            },
            WebError::Catalog(err) if err.is_storage() => {
                error!(error = %err, code = err.code(), "request failed on storage");
                ErrorResponse {
                    message: "Error while reading or writing data".to_string(),
                    error: err.code(),
                    detail: Some(err.to_string()),
                }
            }
            WebError::Catalog(err) => ErrorResponse {
                message: err.to_string(),
                error: err.code(),
                detail: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn maps_catalog_errors_to_status_codes() {
        let cases = [
            (CatalogError::validation("name is required"), StatusCode::BAD_REQUEST),
            (CatalogError::missing_reference("tour", 9), StatusCode::BAD_REQUEST),
            (CatalogError::not_found("category", 3), StatusCode::NOT_FOUND),
            (
                CatalogError::io(
                    PathBuf::from("pdi.json"),
                    io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                ),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(WebError::from(err).status(), expected);
        }
    }

    #[test]
    fn input_errors_are_bad_requests() {
        assert_eq!(
            WebError::Input("expected a number".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
