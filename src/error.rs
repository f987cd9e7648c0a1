//! Handler failures and how they reach the client.
//!
//! Every data-access or form failure is answered with the same JSON shape:
//!
//! ```json
//! {"error": {"kind": "NotFound", "message": "fruit not found: ..."}}
//! ```
//!
//! The HTTP status depends on [`ErrorStatus`]. In `legacy` mode (the default)
//! data-access and form failures answer `200 OK`, which existing clients of
//! the app rely on. In `strict` mode each kind gets its own status. Render failures are
//! always `500`.

use crate::model::FormError;
use crate::views::RenderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use document_store::StoreError;
use serde_json::json;

/// How data-access and form failures are mapped to HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ErrorStatus {
    /// Every data-access or form failure answers 200 with a JSON error body.
    #[default]
    Legacy,
    /// 404 / 400 / 503 / 500 by error kind.
    Strict,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("fruit not found: {0}")]
    NotFound(String),
    #[error("invalid fruit id: {0:?}")]
    InvalidId(String),
    #[error("invalid form body: {0}")]
    InvalidForm(String),
    #[error("record store unavailable")]
    StoreUnavailable,
    #[error("record store error: {0}")]
    Store(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AppError::NotFound(id),
            StoreError::InvalidId(id) => AppError::InvalidId(id),
            StoreError::Unavailable => AppError::StoreUnavailable,
            other => AppError::Store(other.to_string()),
        }
    }
}

impl From<FormError> for AppError {
    fn from(e: FormError) -> Self {
        AppError::InvalidForm(e.to_string())
    }
}

/// Marks a response produced by an [`AppError`] so middleware can adjust its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKind {
    pub name: &'static str,
    /// Answered with 200 in legacy mode.
    pub legacy_ok: bool,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        let (name, legacy_ok) = match self {
            AppError::NotFound(_) => ("NotFound", true),
            AppError::InvalidId(_) => ("InvalidId", true),
            AppError::InvalidForm(_) => ("InvalidForm", true),
            AppError::StoreUnavailable => ("StoreUnavailable", true),
            AppError::Store(_) => ("StoreError", true),
            AppError::Render(_) => ("RenderError", false),
        };
        ErrorKind { name, legacy_ok }
    }

    /// The status used in strict mode.
    pub fn strict_status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidId(_) | AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn status(&self, mode: ErrorStatus) -> StatusCode {
        match mode {
            ErrorStatus::Legacy if self.kind().legacy_ok => StatusCode::OK,
            _ => self.strict_status(),
        }
    }
}

impl IntoResponse for AppError {
    /// Builds the strict-mode response; [`crate::http::middleware::error_status`]
    /// relaxes the status in legacy mode.
    fn into_response(self) -> Response {
        let kind = self.kind();
        let message = match &self {
            AppError::Render(e) => {
                tracing::error!(template = e.template(), error = %e, "Render failed");
                "failed to render page".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({"error": {"kind": kind.name, "message": message}}));
        let mut response = (self.strict_status(), body).into_response();
        response.extensions_mut().insert(kind);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_onto_kinds() {
        let cases = [
            (StoreError::NotFound("x".into()), "NotFound"),
            (StoreError::InvalidId("x".into()), "InvalidId"),
            (StoreError::Unavailable, "StoreUnavailable"),
            (StoreError::Storage("disk".into()), "StoreError"),
        ];
        for (store_error, name) in cases {
            assert_eq!(AppError::from(store_error).kind().name, name);
        }
    }

    #[test]
    fn test_legacy_answers_ok_for_request_failures() {
        for err in [
            AppError::NotFound("x".into()),
            AppError::InvalidId("x".into()),
            AppError::InvalidForm("x".into()),
            AppError::StoreUnavailable,
            AppError::Store("x".into()),
        ] {
            assert_eq!(err.status(ErrorStatus::Legacy), StatusCode::OK);
        }
    }

    #[test]
    fn test_strict_statuses() {
        assert_eq!(
            AppError::NotFound("x".into()).status(ErrorStatus::Strict),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidId("x".into()).status(ErrorStatus::Strict),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidForm("x".into()).status(ErrorStatus::Strict),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::StoreUnavailable.status(ErrorStatus::Strict),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Store("x".into()).status(ErrorStatus::Strict),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_carries_kind_extension() {
        let response = AppError::StoreUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.extensions().get::<ErrorKind>().map(|k| k.name),
            Some("StoreUnavailable")
        );
    }
}
