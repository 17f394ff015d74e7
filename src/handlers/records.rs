// src/handlers/records.rs

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};

use crate::{error::AppError, models::record::AddTestForm, state::AppState};

/// Accepts a new test submission.
///
/// Validation happens in `AddTestForm::into_record`; any malformed field
/// (non-integer marks, bad date, scored > total) comes back as a 400
/// with a human-readable message. On success the record is appended to
/// the store and the client is redirected to the dashboard.
pub async fn add_test(
    State(state): State<AppState>,
    Form(form): Form<AddTestForm>,
) -> Result<impl IntoResponse, AppError> {
    let record = form.into_record()?;

    tracing::info!("Recording test for {}", record.chapter_key());
    state.store.append(record).await?;

    Ok(Redirect::to("/dashboard"))
}
