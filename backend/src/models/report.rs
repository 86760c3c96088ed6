// src/models/report.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::term::Term;

/// Query string shared by the result endpoints (`?term=1st Term&session=2024/25`).
#[derive(Debug, Deserialize, Validate)]
pub struct ReportQuery {
    #[validate(custom(function = validate_term))]
    pub term: String,
    #[validate(length(min = 1, max = 20, message = "Session must be between 1 and 20 characters."))]
    pub session: String,
}

impl ReportQuery {
    /// The parsed term. Only meaningful after `validate()` succeeded.
    pub fn term_key(&self) -> Option<Term> {
        Term::parse(&self.term)
    }
}

fn validate_term(term: &str) -> Result<(), validator::ValidationError> {
    if Term::parse(term).is_none() {
        return Err(validator::ValidationError::new("unknown_term"));
    }
    Ok(())
}

/// Query string for the grade lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct GradeQuery {
    pub total: String,
}

/// Both renderings of a grade band.
#[derive(Debug, Serialize, PartialEq)]
pub struct GradeResponse {
    pub code: String,
    pub label: String,
}
