// src/routes.rs

use axum::{Router, http::Method, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{grading, report},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Student result routes (JSON, summary, PDF).
/// * Grade lookup.
/// * Global middleware (Trace, CORS) and the shared state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let student_routes = Router::new()
        .route("/{student_id}/result", get(report::get_result))
        .route("/{student_id}/result/summary", get(report::get_result_summary))
        .route("/{student_id}/result/pdf", get(report::get_result_pdf));

    Router::new()
        .nest("/api/students", student_routes)
        .route("/api/grading", get(grading::lookup_grade))
        .fallback(grading::not_found)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
