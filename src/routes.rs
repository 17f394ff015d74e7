// src/routes.rs

use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{pages, records, reports},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Page routes (home, dashboard, add form).
/// * Report routes (graph, tips, rank, export).
/// * Static file service for the generated chart.
/// * Global middleware (Trace).
pub fn create_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/dashboard", get(pages::dashboard))
        .route("/add", get(pages::add_form).post(records::add_test));

    let report_routes = Router::new()
        .route("/graph", get(reports::graph))
        .route("/tips", get(reports::tips))
        .route("/rank", get(reports::rank))
        .route("/export", get(reports::export));

    Router::new()
        .merge(page_routes)
        .merge(report_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
