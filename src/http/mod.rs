//! The HTTP surface: shared state, routes and middleware.
//!
//! | Method | Path               | Handler                                 |
//! |--------|--------------------|-----------------------------------------|
//! | GET    | `/`                | plain-text liveness banner              |
//! | GET    | `/fruits/seed`     | reseed, answer the new fruits as JSON   |
//! | GET    | `/fruits`          | list view                               |
//! | GET    | `/fruits/new`      | empty form                              |
//! | POST   | `/fruits`          | create, redirect to the list            |
//! | GET    | `/fruits/:id/edit` | edit form                               |
//! | PUT    | `/fruits/:id`      | update, redirect to the list            |
//! | GET    | `/fruits/:id`      | detail view                             |
//! | DELETE | `/fruits/:id`      | delete, redirect to the list            |
//!
//! The router prefers literal segments over captures, so `/fruits/new`,
//! `/fruits/seed` and `/fruits/:id/edit` are never taken for `/fruits/:id`.
//! Any other path falls through to the static files under the public directory.
//!
//! A trailing slash is trimmed before routing, so `/fruits/` is `/fruits`.

pub mod extract;
pub mod handlers;
pub mod middleware;

use crate::error::ErrorStatus;
use crate::fruits::FruitClient;
use crate::views::Views;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use middleware::{MethodOverride, MethodOverrideLayer};
use std::path::Path;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Everything a handler needs; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub fruits: FruitClient,
    pub views: Arc<Views>,
    pub error_status: ErrorStatus,
}

impl AppState {
    pub fn new(fruits: FruitClient, views: Views, error_status: ErrorStatus) -> Self {
        Self {
            fruits,
            views: Arc::new(views),
            error_status,
        }
    }
}

/// The complete application service, ready to serve.
pub type App = NormalizePath<MethodOverride<Router>>;

pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::landing))
        .route("/fruits/seed", get(handlers::seed))
        .route("/fruits", get(handlers::index).post(handlers::create))
        .route("/fruits/new", get(handlers::new_form))
        .route("/fruits/:id/edit", get(handlers::edit))
        .route(
            "/fruits/:id",
            get(handlers::show)
                .put(handlers::update)
                .delete(handlers::destroy),
        )
        .fallback_service(ServeDir::new(public_dir))
        .layer(from_fn_with_state(state.clone(), middleware::error_status))
        .layer(from_fn(middleware::request_logging))
        .with_state(state)
}

/// The router wrapped in path normalization and method override, which must
/// both see requests before routing does.
pub fn build_app(state: AppState, public_dir: &Path) -> App {
    let app = MethodOverrideLayer.layer(build_router(state, public_dir));
    NormalizePathLayer::trim_trailing_slash().layer(app)
}
