//! Route handlers.
//!
//! Each handler extracts its inputs, makes exactly one data-access call and
//! then renders a view, redirects to the list, or answers JSON.

use crate::error::AppError;
use crate::http::extract::FruitBody;
use crate::http::AppState;
use crate::model::Fruit;
use crate::views;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Json;
use minijinja::context;

/// Where every successful mutation sends the browser.
pub const LIST_PATH: &str = "/fruits";

pub async fn landing() -> &'static str {
    "your server is running... better catch it"
}

/// `GET /fruits/seed`
pub async fn seed(State(state): State<AppState>) -> Result<Json<Vec<Fruit>>, AppError> {
    let fruits = state.fruits.seed().await?;
    Ok(Json(fruits))
}

/// `GET /fruits`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let fruits = state.fruits.list_all().await?;
    let html = state.views.render(views::INDEX, context! { fruits => fruits })?;
    Ok(Html(html))
}

/// `GET /fruits/new`
pub async fn new_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.render(views::NEW, context! {})?))
}

/// `POST /fruits`
pub async fn create(
    State(state): State<AppState>,
    FruitBody(form): FruitBody,
) -> Result<Redirect, AppError> {
    state.fruits.create_one(form.into_fields()).await?;
    Ok(Redirect::to(LIST_PATH))
}

/// `GET /fruits/:id/edit`
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let fruit = state.fruits.find_by_id(&id).await?;
    let html = state.views.render(views::EDIT, context! { fruit => fruit })?;
    Ok(Html(html))
}

/// `PUT /fruits/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FruitBody(form): FruitBody,
) -> Result<Redirect, AppError> {
    state.fruits.update_by_id(&id, form.into_fields()).await?;
    Ok(Redirect::to(LIST_PATH))
}

/// `GET /fruits/:id`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let fruit = state.fruits.find_by_id(&id).await?;
    let html = state.views.render(views::SHOW, context! { fruit => fruit })?;
    Ok(Html(html))
}

/// `DELETE /fruits/:id`
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.fruits.delete_by_id(&id).await?;
    Ok(Redirect::to(LIST_PATH))
}
