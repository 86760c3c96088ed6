// src/models/score.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single score component (CA1, CA2 or exam) as stored.
///
/// The upstream store accepts free text, so a mark may be absent, a number,
/// or something that does not parse. Only `Value` contributes to totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Mark {
    Value(f64),
    Text(String),
    #[default]
    Missing,
}

impl Mark {
    /// Parses a raw column value. Blank text counts as missing.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Mark::Missing,
            Some(text) => match text.parse::<f64>() {
                Ok(v) if v.is_finite() => Mark::Value(v),
                _ => Mark::Text(text.to_string()),
            },
        }
    }

    /// Numeric value, with missing or malformed marks counting as zero.
    pub fn value_or_zero(&self) -> f64 {
        match self {
            Mark::Value(v) => *v,
            _ => 0.0,
        }
    }

    /// True when the mark holds any non-blank content, parsable or not.
    pub fn is_present(&self) -> bool {
        !matches!(self, Mark::Missing)
    }

    /// Text printed in a table cell; missing marks print nothing.
    pub fn display(&self) -> String {
        match self {
            Mark::Value(v) => format_number(*v),
            Mark::Text(t) => t.clone(),
            Mark::Missing => String::new(),
        }
    }
}

/// Formats a number the way totals are printed on the sheet: integral values
/// without a fraction, everything else in shortest form.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// One subject result for one student in one term and session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub student_id: String,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub term: String,
    pub session: String,
    #[serde(default)]
    pub ca1: Mark,
    #[serde(default)]
    pub ca2: Mark,
    /// Exam mark. Stored in the `score` column.
    #[serde(default)]
    pub exam: Mark,
    pub grade: Option<String>,
    pub remark: Option<String>,
    pub approved: bool,
}

impl ScoreRecord {
    /// CA1 + CA2, missing components counting as zero.
    pub fn ca_total(&self) -> f64 {
        self.ca1.value_or_zero() + self.ca2.value_or_zero()
    }
}

/// Raw row of the `results` table. Mark columns are selected as text.
#[derive(Debug, Clone, FromRow)]
pub struct ResultRow {
    pub student_id: String,
    pub subject: String,
    pub class: String,
    pub term: String,
    pub session: String,
    pub ca1: Option<String>,
    pub ca2: Option<String>,
    pub score: Option<String>,
    pub grade: Option<String>,
    pub remark: Option<String>,
    pub approved: bool,
}

impl From<ResultRow> for ScoreRecord {
    fn from(row: ResultRow) -> Self {
        ScoreRecord {
            ca1: Mark::parse(row.ca1.as_deref()),
            ca2: Mark::parse(row.ca2.as_deref()),
            exam: Mark::parse(row.score.as_deref()),
            student_id: row.student_id,
            subject: row.subject,
            class_name: row.class,
            term: row.term,
            session: row.session,
            grade: row.grade.filter(|g| !g.trim().is_empty()),
            remark: row.remark.filter(|r| !r.trim().is_empty()),
            approved: row.approved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_null_marks_are_missing() {
        assert_eq!(Mark::parse(None), Mark::Missing);
        assert_eq!(Mark::parse(Some("   ")), Mark::Missing);
        assert!(!Mark::parse(Some("")).is_present());
    }

    #[test]
    fn malformed_marks_are_present_but_worth_zero() {
        let mark = Mark::parse(Some("abs"));
        assert!(mark.is_present());
        assert_eq!(mark.value_or_zero(), 0.0);
        assert_eq!(mark.display(), "abs");
    }

    #[test]
    fn numbers_print_without_trailing_fraction() {
        assert_eq!(Mark::parse(Some("70")).display(), "70");
        assert_eq!(Mark::parse(Some(" 12.5 ")).display(), "12.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn marks_serialize_as_plain_json_values() {
        let json = serde_json::to_value(vec![
            Mark::Value(10.0),
            Mark::Text("abs".into()),
            Mark::Missing,
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!([10.0, "abs", null]));
    }
}
