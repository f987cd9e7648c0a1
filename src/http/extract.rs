//! Request body extraction for the fruit forms.

use crate::error::AppError;
use crate::model::FruitForm;
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A [`FruitForm`] read from the request body.
///
/// Bodies that are not URL-encoded are ignored and read as an empty form,
/// so a request without a form content type still reaches the handler.
/// Failures are [`AppError`]s and get the usual JSON error body.
#[derive(Debug, Clone)]
pub struct FruitBody(pub FruitForm);

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

#[async_trait]
impl<S> FromRequest<S> for FruitBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_form(request.headers()) {
            return Ok(FruitBody(FruitForm::default()));
        }
        let body = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| AppError::InvalidForm(rejection.body_text()))?;
        Ok(FruitBody(FruitForm::from_urlencoded(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::post("/fruits");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn extract(request: Request) -> Result<FruitForm, AppError> {
        FruitBody::from_request(request, &()).await.map(|FruitBody(form)| form)
    }

    #[tokio::test]
    async fn test_form_body_is_parsed() {
        let form = extract(request(
            Some("application/x-www-form-urlencoded; charset=UTF-8"),
            "name=Kiwi&color=green&readyToEat=on",
        ))
        .await
        .unwrap();
        assert_eq!(form.name, "Kiwi");
        assert_eq!(form.ready_to_eat.as_deref(), Some("on"));
    }

    #[tokio::test]
    async fn test_other_bodies_read_as_empty() {
        let body = "name=Kiwi&color=green";
        assert_eq!(extract(request(None, body)).await.unwrap(), FruitForm::default());
        assert_eq!(
            extract(request(Some("application/json"), r#"{"name":"Kiwi"}"#))
                .await
                .unwrap(),
            FruitForm::default()
        );
    }

    #[tokio::test]
    async fn test_repeated_field_is_an_app_error() {
        let err = extract(request(Some(FORM_CONTENT_TYPE), "color=a&color=b"))
            .await
            .unwrap_err();
        assert_eq!(err.kind().name, "InvalidForm");
    }
}
