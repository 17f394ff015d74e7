// src/handlers/pages.rs

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::{error::AppError, models::record::TestRecord, state::AppState};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    recent: Vec<TestRecord>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    tests: Vec<TestRecord>,
}

#[derive(Template)]
#[template(path = "add.html")]
struct AddTemplate;

/// Home page: the five most recent tests, newest first.
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut tests = state.store.load_all().await?;
    tests.sort_by(|a, b| b.date.cmp(&a.date));
    tests.truncate(5);

    let page = IndexTemplate { recent: tests };
    Ok(Html(page.render()?))
}

/// Dashboard: every recorded test.
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tests = state.store.load_all().await?;

    let page = DashboardTemplate { tests };
    Ok(Html(page.render()?))
}

/// Entry form for logging a new test.
pub async fn add_form() -> Result<impl IntoResponse, AppError> {
    Ok(Html(AddTemplate.render()?))
}
