// src/report/layout/columns.rs

//! Column schema of the main score table.
//!
//! The set is decided once per report from the data (`has_exam`, current
//! term). Everything else looks columns up by [`ColumnKey`].

use serde::Serialize;

use crate::models::term::Term;
use crate::report::metrics::FontWeight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnKey {
    Subject,
    Ca1,
    Ca2,
    CaTotal,
    Exam,
    Total,
    Grade,
    Remark,
    FirstTerm,
    SecondTerm,
    Cumulative,
    ClassHighest,
    ClassLowest,
    ClassAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnGroup {
    Subject,
    ContinuousAssessment,
    TermsWork,
    PreviousTerms,
    ClassStats,
}

impl ColumnGroup {
    /// Heading printed in the grouped header row.
    pub fn title(self) -> Option<&'static str> {
        match self {
            ColumnGroup::Subject => None,
            ColumnGroup::ContinuousAssessment => Some("SUMMARY OF CONTINUOUS ASSESSMENT TEST"),
            ColumnGroup::TermsWork => Some("SUMMARY OF TERMS WORK"),
            ColumnGroup::PreviousTerms => Some("PREVIOUS TERMS SUMMARIES"),
            ColumnGroup::ClassStats => Some("CLASS STATS THIS TERM"),
        }
    }
}

struct ColumnDef {
    key: ColumnKey,
    group: ColumnGroup,
    width: f32,
    label: &'static str,
    label_size: f32,
    label_weight: FontWeight,
}

const fn def(
    key: ColumnKey,
    group: ColumnGroup,
    width: f32,
    label: &'static str,
    label_size: f32,
    label_weight: FontWeight,
) -> ColumnDef {
    ColumnDef {
        key,
        group,
        width,
        label,
        label_size,
        label_weight,
    }
}

use ColumnGroup as G;
use ColumnKey as K;
use FontWeight::{Bold, Regular};

/// Every possible column in print order.
const ALL_COLUMNS: [ColumnDef; 14] = [
    def(K::Subject, G::Subject, 90.0, "SUBJECTS", 11.0, Bold),
    def(K::Ca1, G::ContinuousAssessment, 22.0, "1ST C.A.", 8.0, Bold),
    def(K::Ca2, G::ContinuousAssessment, 22.0, "2ND C.A.", 7.0, Bold),
    def(K::CaTotal, G::ContinuousAssessment, 23.0, "TOTAL", 7.0, Bold),
    def(K::Exam, G::TermsWork, 25.0, "Exams", 7.0, Bold),
    def(K::Total, G::TermsWork, 23.0, "100%", 7.0, Regular),
    def(K::Grade, G::TermsWork, 25.0, "GRADE SCORE", 7.0, Regular),
    def(K::Remark, G::TermsWork, 35.0, "GRADE REMARKS", 7.0, Regular),
    def(K::FirstTerm, G::PreviousTerms, 60.0, "FIRST TERM SUMMARY", 7.0, Regular),
    def(K::SecondTerm, G::PreviousTerms, 50.0, "SECOND TERM SUMMARY", 7.0, Regular),
    def(K::Cumulative, G::PreviousTerms, 60.0, "CUMULATIVE AVERAGE", 7.0, Regular),
    def(K::ClassHighest, G::ClassStats, 40.0, "HIGHEST", 7.0, Regular),
    def(K::ClassLowest, G::ClassStats, 40.0, "LOWEST", 7.0, Regular),
    def(K::ClassAverage, G::ClassStats, 40.0, "AVERAGE", 7.0, Regular),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub key: ColumnKey,
    pub group: ColumnGroup,
    pub x: f32,
    pub width: f32,
    pub label: &'static str,
    pub label_size: f32,
    pub label_weight: FontWeight,
}

impl Column {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Contiguous run of columns sharing a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSpan {
    pub group: ColumnGroup,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    /// Builds the table schema starting at `left`.
    ///
    /// Exam, total and grade only appear when some record has an exam mark;
    /// the term summaries only for terms that precede `term`. Width given up
    /// by omitted columns goes to the remark column, so the table keeps its
    /// full width.
    pub fn build(has_exam: bool, term: Term, left: f32) -> ColumnSet {
        let included = |key: ColumnKey| match key {
            K::Exam | K::Total | K::Grade => has_exam,
            K::FirstTerm => term.index() >= 1,
            K::SecondTerm => term.index() >= 2,
            _ => true,
        };

        let freed: f32 = ALL_COLUMNS
            .iter()
            .filter(|s| !included(s.key))
            .map(|s| s.width)
            .sum();

        let mut x = left;
        let columns = ALL_COLUMNS
            .iter()
            .filter(|s| included(s.key))
            .map(|s| {
                let width = if s.key == K::Remark { s.width + freed } else { s.width };
                let column = Column {
                    key: s.key,
                    group: s.group,
                    x,
                    width,
                    label: s.label,
                    label_size: s.label_size,
                    label_weight: s.label_weight,
                };
                x += width;
                column
            })
            .collect();

        ColumnSet { columns }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn keys(&self) -> Vec<ColumnKey> {
        self.columns.iter().map(|c| c.key).collect()
    }

    pub fn get(&self, key: ColumnKey) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn contains(&self, key: ColumnKey) -> bool {
        self.get(key).is_some()
    }

    pub fn left(&self) -> f32 {
        self.columns.first().map(|c| c.x).unwrap_or_default()
    }

    pub fn right(&self) -> f32 {
        self.columns.last().map(Column::right).unwrap_or_default()
    }

    /// Every vertical rule position, left edge to right edge.
    pub fn boundaries(&self) -> Vec<f32> {
        let mut xs: Vec<f32> = self.columns.iter().map(|c| c.x).collect();
        xs.push(self.right());
        xs
    }

    pub fn groups(&self) -> Vec<GroupSpan> {
        let mut spans: Vec<GroupSpan> = Vec::new();
        for column in &self.columns {
            match spans.last_mut() {
                Some(span) if span.group == column.group => span.width += column.width,
                _ => spans.push(GroupSpan {
                    group: column.group,
                    x: column.x,
                    width: column.width,
                }),
            }
        }
        spans
    }

    pub fn group(&self, group: ColumnGroup) -> Option<GroupSpan> {
        self.groups().into_iter().find(|s| s.group == group)
    }
}
