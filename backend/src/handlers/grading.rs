// src/handlers/grading.rs

use axum::{Json, extract::Query, response::IntoResponse};

use crate::{
    error::AppError,
    models::report::{GradeQuery, GradeResponse},
    report::grading::{GradeScale, GradeStyle, grade_for_input},
};

/// Looks a total up in the default grade table. Unparsable totals give
/// empty strings rather than an error.
pub async fn lookup_grade(Query(query): Query<GradeQuery>) -> Result<impl IntoResponse, AppError> {
    let scale = GradeScale::default();
    Ok(Json(GradeResponse {
        code: grade_for_input(&query.total, &scale, GradeStyle::Code),
        label: grade_for_input(&query.total, &scale, GradeStyle::Descriptive),
    }))
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
