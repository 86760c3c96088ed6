// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'students' table in the database.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,

    pub fullname: String,

    /// Class the student currently belongs to (e.g. "JSS 2A").
    #[sqlx(rename = "class")]
    #[serde(rename = "class")]
    pub class_name: String,

    pub gender: Option<String>,

    /// Date of birth as entered by the school office; printed verbatim.
    pub dob: Option<String>,

    pub admission_no: Option<String>,

    /// Stored photo reference, usually a path written by the upload endpoint.
    #[sqlx(rename = "photo")]
    #[serde(rename = "photo")]
    pub photo_ref: Option<String>,
}

impl StudentProfile {
    /// Blank profile used when the student row is missing; the report still renders.
    pub fn placeholder(student_id: &str) -> Self {
        StudentProfile {
            student_id: student_id.to_string(),
            ..Default::default()
        }
    }
}
