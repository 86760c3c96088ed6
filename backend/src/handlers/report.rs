// src/handlers/report.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Serialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::{report::ReportQuery, term::Term},
    report::{
        ReportRequest,
        aggregate::ReportModel,
        assets::ImageSource,
        grading::GradeScale,
        layout::{SchoolProfile, columns::{ColumnKey, ColumnSet}},
        pipeline::{gather_inputs, prepare_report},
        render::render_pdf,
        store::ReportStore,
    },
};

/// Validates the query string and returns the parsed term.
fn checked_term(query: &ReportQuery) -> Result<Term, AppError> {
    if let Err(validation_errors) = query.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }
    query
        .term_key()
        .ok_or_else(|| AppError::BadRequest(format!("Unknown term '{}'", query.term)))
}

/// Lists the student's approved results for the term.
pub async fn get_result(
    State(store): State<Arc<dyn ReportStore>>,
    Path(student_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = checked_term(&query)?;
    let results = store
        .get_approved_scores(&student_id, term, &query.session)
        .await?;
    Ok(Json(results))
}

/// Aggregated report figures without rendering.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    #[serde(flatten)]
    pub model: ReportModel,
    pub columns: Vec<ColumnKey>,
}

pub async fn get_result_summary(
    State(store): State<Arc<dyn ReportStore>>,
    Path(student_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = checked_term(&query)?;
    let request = ReportRequest {
        student_id: &student_id,
        term,
        session: &query.session,
    };
    let inputs = gather_inputs(store.as_ref(), request).await?;
    let model = ReportModel::build(inputs, &GradeScale::default());
    let columns = ColumnSet::build(model.has_exam, model.term, 0.0).keys();
    Ok(Json(ReportSummary { model, columns }))
}

/// Renders the report sheet as a PDF.
pub async fn get_result_pdf(
    State(store): State<Arc<dyn ReportStore>>,
    State(images): State<Arc<dyn ImageSource>>,
    State(school): State<SchoolProfile>,
    Path(student_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let term = checked_term(&query)?;
    let request = ReportRequest {
        student_id: &student_id,
        term,
        session: &query.session,
    };
    let prepared = prepare_report(store.as_ref(), images.as_ref(), &school, request).await?;

    // printpdf only serialises a finished document, so the body is buffered.
    let bytes = tokio::task::spawn_blocking(move || {
        let mut out = Vec::new();
        render_pdf(&prepared.document, &mut out).map(|_| out)
    })
    .await
    .map_err(|e| AppError::InternalServerError(format!("render task failed: {}", e)))??;

    tracing::info!(
        "Rendered report for {} ({}, {}): {} bytes",
        student_id,
        term,
        query.session,
        bytes.len()
    );

    let disposition = format!(
        "inline; filename=\"{}\"",
        pdf_file_name(&student_id, term, &query.session)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// `report_<student>_<term>_<session>.pdf` with anything unusual replaced.
pub fn pdf_file_name(student_id: &str, term: Term, session: &str) -> String {
    let raw = format!("report_{}_{}_{}", student_id, term.label(), session);
    let safe: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}.pdf", safe)
}
