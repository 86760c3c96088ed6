// src/report/aggregate.rs

//! Turns raw score rows into every number printed on the report.
//!
//! All functions here are pure: identical input rows give identical output.
//! Missing or malformed marks count as zero and no business rule is enforced
//! (negative marks pass through).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{
    score::{ScoreRecord, format_number},
    student::StudentProfile,
    term::Term,
};
use crate::report::grading::{GradeScale, GradeStyle, grade_for, round_half_up};

/// CA1 + CA2 + exam, missing components counting as zero.
pub fn subject_total(record: &ScoreRecord) -> f64 {
    record.ca_total() + record.exam.value_or_zero()
}

pub fn student_grand_total(records: &[ScoreRecord]) -> f64 {
    records.iter().map(subject_total).sum()
}

/// Mean subject total; 0 for an empty record set.
pub fn student_average(records: &[ScoreRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    student_grand_total(records) / records.len() as f64
}

/// Two-decimal rendering with halves rounded up (`60.125` -> `"60.13"`).
pub fn fixed2(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    let cents = round_half_up(value * 100.0);
    let text = format!("{:.2}", cents / 100.0);
    if text == "-0.00" { "0.00".to_string() } else { text }
}

/// True when any record carries a non-blank exam mark.
pub fn has_exam(records: &[ScoreRecord]) -> bool {
    records.iter().any(|r| r.exam.is_present())
}

/// Highest, lowest and mean of a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spread {
    pub highest: f64,
    pub lowest: f64,
    pub mean: f64,
}

impl Spread {
    pub fn of(values: &[f64]) -> Option<Spread> {
        if values.is_empty() {
            return None;
        }
        let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Spread { highest, lowest, mean })
    }
}

/// Per-subject class figures for the current term, unapproved rows included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStatistic {
    pub subject: String,
    pub highest: String,
    pub lowest: String,
    pub average: String,
}

pub fn class_subject_statistics(
    class_records: &[ScoreRecord],
    subject: &str,
) -> Option<SubjectStatistic> {
    let totals: Vec<f64> = class_records
        .iter()
        .filter(|r| r.subject == subject)
        .map(subject_total)
        .collect();
    Spread::of(&totals).map(|s| SubjectStatistic {
        subject: subject.to_string(),
        highest: format_number(s.highest),
        lowest: format_number(s.lowest),
        average: fixed2(s.mean),
    })
}

/// Spread of student averages across the class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortStatistic {
    pub highest: String,
    pub lowest: String,
    pub average: String,
    /// Students that contributed an average.
    pub population: usize,
}

/// Takes each student's approved records for the term. Students with no
/// approved record are left out rather than counted as zero.
pub fn cohort_statistics<'a, I>(approved_per_student: I) -> CohortStatistic
where
    I: IntoIterator<Item = &'a [ScoreRecord]>,
{
    let averages: Vec<f64> = approved_per_student
        .into_iter()
        .filter(|records| !records.is_empty())
        .map(student_average)
        .collect();
    match Spread::of(&averages) {
        Some(s) => CohortStatistic {
            highest: fixed2(s.highest),
            lowest: fixed2(s.lowest),
            average: fixed2(s.mean),
            population: averages.len(),
        },
        None => CohortStatistic {
            highest: fixed2(0.0),
            lowest: fixed2(0.0),
            average: fixed2(0.0),
            population: 0,
        },
    }
}

/// Subject totals of one earlier term. A repeated subject keeps its last row.
pub type TermTotals = BTreeMap<String, f64>;

pub fn term_totals(records: &[ScoreRecord]) -> TermTotals {
    records
        .iter()
        .map(|r| (r.subject.clone(), subject_total(r)))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossTermSummary {
    pub first_term: Option<f64>,
    pub second_term: Option<f64>,
    /// Rounded mean of all known totals up to the current term.
    pub cumulative_average: Option<i64>,
}

/// `prior[i]` holds the totals of `Term::ALL[i]`; only terms before `term`
/// are consulted.
pub fn cross_term_summary(
    subject: &str,
    current_total: f64,
    term: Term,
    prior: &[TermTotals],
) -> CrossTermSummary {
    let earlier = term.earlier();
    let lookup = |t: Term| -> Option<f64> {
        if !earlier.contains(&t) {
            return None;
        }
        prior.get(t.index()).and_then(|totals| totals.get(subject)).copied()
    };

    let first_term = lookup(Term::First);
    let second_term = lookup(Term::Second);

    let cumulative_average = if earlier.is_empty() {
        None
    } else {
        let mut totals: Vec<f64> = earlier.iter().filter_map(|t| lookup(*t)).collect();
        totals.push(current_total);
        let mean = totals.iter().sum::<f64>() / totals.len() as f64;
        Some(round_half_up(mean) as i64)
    };

    CrossTermSummary {
        first_term,
        second_term,
        cumulative_average,
    }
}

/// Everything fetched from the store for one report.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub student: StudentProfile,
    pub term: Term,
    pub session: String,
    /// The student's approved rows for the term, in store order.
    pub approved: Vec<ScoreRecord>,
    /// Every row of the class for the term, approved or not.
    pub class_records: Vec<ScoreRecord>,
    /// One entry per student of the class, their approved rows for the term.
    pub cohort: Vec<Vec<ScoreRecord>>,
    /// Totals of each earlier term, indexed like `Term::ALL`.
    pub prior_terms: Vec<TermTotals>,
    pub class_teacher_remark: Option<String>,
}

/// One line of the main score table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRow {
    pub record: ScoreRecord,
    pub ca_total: f64,
    pub total: f64,
    /// Stored grade, or the computed code when none was entered.
    pub grade: String,
    pub cross_term: CrossTermSummary,
    pub class_stats: Option<SubjectStatistic>,
}

/// Aggregated view of one student's term, ready for layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub student: StudentProfile,
    pub term: Term,
    pub session: String,
    pub rows: Vec<SubjectRow>,
    pub has_exam: bool,
    pub grand_total: f64,
    pub term_average: String,
    pub cumulative_grade: String,
    pub cohort: CohortStatistic,
    pub students_in_class: usize,
    pub class_teacher_remark: Option<String>,
}

impl ReportModel {
    pub fn build(inputs: ReportInputs, scale: &GradeScale) -> ReportModel {
        let has_exam = has_exam(&inputs.approved);
        let grand_total = student_grand_total(&inputs.approved);
        let average = student_average(&inputs.approved);
        let cohort = cohort_statistics(inputs.cohort.iter().map(Vec::as_slice));

        let mut class_stats: BTreeMap<&str, Option<SubjectStatistic>> = BTreeMap::new();
        for record in &inputs.approved {
            class_stats
                .entry(record.subject.as_str())
                .or_insert_with(|| class_subject_statistics(&inputs.class_records, &record.subject));
        }

        let rows = inputs
            .approved
            .iter()
            .map(|record| {
                let total = subject_total(record);
                let grade = match &record.grade {
                    Some(stored) => stored.clone(),
                    None if has_exam => grade_for(total, scale, GradeStyle::Code),
                    None => String::new(),
                };
                SubjectRow {
                    ca_total: record.ca_total(),
                    total,
                    grade,
                    cross_term: cross_term_summary(
                        &record.subject,
                        total,
                        inputs.term,
                        &inputs.prior_terms,
                    ),
                    class_stats: class_stats
                        .get(record.subject.as_str())
                        .cloned()
                        .flatten(),
                    record: record.clone(),
                }
            })
            .collect();

        ReportModel {
            has_exam,
            grand_total,
            term_average: fixed2(average),
            cumulative_grade: grade_for(average, scale, GradeStyle::Descriptive),
            cohort,
            students_in_class: inputs.cohort.len(),
            rows,
            term: inputs.term,
            session: inputs.session,
            class_teacher_remark: inputs.class_teacher_remark,
            student: inputs.student,
        }
    }
}
