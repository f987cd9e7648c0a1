//! Request middleware.
//!
//! [`MethodOverride`] wraps the whole router because it must run before
//! routing. The other middleware run inside the router as `from_fn` layers.

use crate::error::{ErrorKind, ErrorStatus};
use crate::http::AppState;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_LENGTH;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{info, Instrument};

/// Query parameter naming the method a `POST` stands in for.
pub const METHOD_PARAM: &str = "_method";

/// The method a request should be dispatched as, if it carries an override.
///
/// Only `POST` can be overridden, and only to `PUT` or `DELETE`, the two
/// methods the router serves that a browser form cannot send.
pub fn overridden_method<B>(request: &axum::http::Request<B>) -> Option<Method> {
    if request.method() != Method::POST {
        return None;
    }
    let query = request.uri().query()?;
    let (_, value) = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == METHOD_PARAM)?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Layer that applies [`overridden_method`] before the inner service sees the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodOverrideLayer;

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

#[derive(Debug, Clone)]
pub struct MethodOverride<S> {
    inner: S,
}

impl<S, B> Service<axum::http::Request<B>> for MethodOverride<S>
where
    S: Service<axum::http::Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: axum::http::Request<B>) -> Self::Future {
        if let Some(method) = overridden_method(&request) {
            *request.method_mut() = method;
        }
        self.inner.call(request)
    }
}

/// One structured event per request: method, path, status, length and latency.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = tracing::info_span!("http.request", %method, %path);
    let started = Instant::now();

    let response = next.run(request).instrument(span.clone()).await;

    let content_length = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_owned();
    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            content_length = %content_length,
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "request"
        )
    });
    response
}

/// In legacy mode, data-access and form failures answer 200 with their JSON body intact.
pub async fn error_status(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    if state.error_status == ErrorStatus::Legacy {
        let relax = response
            .extensions()
            .get::<ErrorKind>()
            .is_some_and(|kind| kind.legacy_ok);
        if relax {
            *response.status_mut() = StatusCode::OK;
        }
    }
    response
}
