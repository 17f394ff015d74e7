// src/handlers/reports.rs

use askama::Template;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
};

use crate::{
    error::AppError,
    report::{chart, pdf},
    state::AppState,
    stats::{self, RankTier, Tip},
};

/// General study advice shown beneath the computed weak-chapter tips.
const STUDY_TIPS: &[&str] = &[
    "Stay consistent every day!",
    "Revise mistakes from previous tests.",
    "Solve 10 questions before sleeping.",
    "Use NCERT examples for basics.",
    "Avoid burnout - take breaks!",
];

#[derive(Template)]
#[template(path = "graph.html")]
struct GraphTemplate {
    graph_url: &'static str,
}

#[derive(Template)]
#[template(path = "tips.html")]
struct TipsTemplate {
    tips: Vec<Tip>,
    study_tips: &'static [&'static str],
}

#[derive(Template)]
#[template(path = "rank.html")]
struct RankTemplate {
    total_scored: u32,
    total_max: u32,
    percentage: String,
    tier: &'static str,
}

/// Regenerates the progress chart and returns the page embedding it.
/// An empty store yields a plain message instead of an error page.
pub async fn graph(State(state): State<AppState>) -> Result<Response, AppError> {
    let mut records = state.store.load_all().await?;
    if records.is_empty() {
        return Ok("No test data to generate a chart yet.".into_response());
    }

    records.sort_by(|a, b| a.date.cmp(&b.date));
    let points: Vec<(String, u32)> = records
        .iter()
        .map(|r| (r.date.to_string(), r.marks_scored))
        .collect();

    chart::render_progress_chart(&points, &state.config.graph_file)?;
    tracing::debug!("Chart rendered to {}", state.config.graph_file.display());

    let page = GraphTemplate {
        graph_url: state.config.graph_url(),
    };
    Ok(Html(page.render()?).into_response())
}

/// Weak-chapter tips: chapters averaging below the revision threshold,
/// weakest first.
pub async fn tips(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.store.load_all().await?;
    let aggregates = stats::aggregate_by_chapter(&records);

    let page = TipsTemplate {
        tips: stats::weak_chapters(&aggregates),
        study_tips: STUDY_TIPS,
    };
    Ok(Html(page.render()?))
}

/// Overall percentage and rank tier. An empty store reads as 0% Bronze.
pub async fn rank(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.store.load_all().await?;

    let (total_scored, total_max) = stats::flat_sums(&records);
    let percentage = stats::overall_percentage(&records);
    let tier = RankTier::from_percentage(percentage);

    let page = RankTemplate {
        total_scored,
        total_max,
        percentage: format!("{:.2}", percentage),
        tier: tier.label(),
    };
    Ok(Html(page.render()?))
}

/// Regenerates the PDF report and returns it as a download.
/// An empty store yields a plain message instead of an error page.
pub async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = state.store.load_all().await?;
    if records.is_empty() {
        return Ok("No data to export.".into_response());
    }

    pdf::render_report(&records, &state.config.export_file)?;
    let bytes = tokio::fs::read(&state.config.export_file).await?;
    tracing::info!("Exported {} records to PDF", records.len());

    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"report.pdf\"",
        ),
    ];
    Ok((headers, bytes).into_response())
}
