// src/report/layout/table.rs

//! The main score table and the grand-total row below it.

use crate::models::score::format_number;
use crate::report::{
    aggregate::{ReportModel, SubjectRow, SubjectStatistic},
    document::{Align, Color, DrawOp, Rect, TextOp, TextRun},
    metrics::{self, ASCENT, FontWeight},
};

use super::{
    Canvas,
    columns::{ColumnGroup, ColumnKey, ColumnSet},
};

pub const HEADER_ROW_HEIGHT: f32 = 44.0;
pub const ROW_HEIGHT: f32 = 20.0;
const GROUP_RULE: f32 = 1.2;
const CELL_SIZE: f32 = 9.0;

/// Draws the two header rows and one row per subject. Returns the bottom edge.
pub fn draw_score_table(canvas: &mut Canvas, columns: &ColumnSet, model: &ReportModel, top: f32) -> f32 {
    let left = columns.left();
    let right = columns.right();
    let first_header_bottom = top + HEADER_ROW_HEIGHT;
    let data_top = top + 2.0 * HEADER_ROW_HEIGHT;
    let bottom = data_top + model.rows.len() as f32 * ROW_HEIGHT;

    let subject_right = columns
        .get(ColumnKey::Subject)
        .map(|c| c.right())
        .unwrap_or(left);

    // Outer frame of the header; the subject cell spans both header rows.
    canvas.line((left, top), (right, top));
    canvas.line((subject_right, first_header_bottom), (right, first_header_bottom));
    canvas.line((left, data_top), (right, data_top));
    for row in 1..=model.rows.len() {
        let y = data_top + row as f32 * ROW_HEIGHT;
        canvas.line((left, y), (right, y));
    }

    for x in columns.boundaries() {
        let from = if x == left || x == subject_right || x == right { top } else { first_header_bottom };
        canvas.line((x, from), (x, bottom));
    }

    let groups = columns.groups();
    for span in &groups {
        if span.group != ColumnGroup::Subject {
            canvas.line_with((span.x, top), (span.x, bottom), GROUP_RULE);
        }
        if let Some(title) = span.group.title() {
            canvas.text_box(
                title,
                span.x + 1.0,
                top + HEADER_ROW_HEIGHT / 4.0,
                span.width - 2.0,
                Align::Center,
                FontWeight::Bold,
                8.0,
            );
        }
    }
    if let Some(total) = columns.get(ColumnKey::Total) {
        canvas.line_with((total.x, top), (total.x, bottom), GROUP_RULE);
    }

    if let Some(subject) = columns.get(ColumnKey::Subject) {
        draw_rotated_label(canvas, subject.label, subject.x, subject.width, top, subject.label_size);
    }

    let label_top = first_header_bottom + HEADER_ROW_HEIGHT / 4.0;
    for column in columns.iter().filter(|c| c.key != ColumnKey::Subject) {
        canvas.text_box(
            column.label,
            column.x,
            label_top,
            column.width,
            Align::Center,
            column.label_weight,
            column.label_size,
        );
    }

    for (i, row) in model.rows.iter().enumerate() {
        let row_top = data_top + i as f32 * ROW_HEIGHT;
        for column in columns.iter() {
            let text = cell_text(column.key, row);
            if text.is_empty() {
                continue;
            }
            canvas.text_box(
                &text,
                column.x,
                row_top + 5.0,
                column.width,
                Align::Center,
                FontWeight::Regular,
                CELL_SIZE,
            );
        }
    }

    bottom
}

/// Reads bottom-to-top, centred in the two header rows of the subject column.
fn draw_rotated_label(canvas: &mut Canvas, text: &str, x: f32, width: f32, top: f32, size: f32) {
    let length = metrics::text_width(text, FontWeight::Bold, size);
    let middle = top + HEADER_ROW_HEIGHT;
    canvas.push(DrawOp::Text(TextOp {
        x: x + width / 2.0 + (ASCENT * size) / 2.0,
        y: middle + length / 2.0,
        size,
        runs: vec![TextRun::new(text, FontWeight::Bold)],
        rotation: 90.0,
        color: Color::BLACK,
    }));
}

/// Text of one cell. Empty string means the cell stays blank.
pub fn cell_text(key: ColumnKey, row: &SubjectRow) -> String {
    let record = &row.record;
    let optional = |v: Option<f64>| v.map(format_number).unwrap_or_default();
    let stat = |pick: fn(&SubjectStatistic) -> &String| {
        row.class_stats.as_ref().map(|s| pick(s).clone()).unwrap_or_default()
    };
    match key {
        ColumnKey::Subject => record.subject.clone(),
        ColumnKey::Ca1 => record.ca1.display(),
        ColumnKey::Ca2 => record.ca2.display(),
        ColumnKey::CaTotal => format_number(row.ca_total),
        ColumnKey::Exam => record.exam.display(),
        ColumnKey::Total => format_number(row.total),
        ColumnKey::Grade => row.grade.clone(),
        ColumnKey::Remark => record.remark.clone().unwrap_or_default(),
        ColumnKey::FirstTerm => optional(row.cross_term.first_term),
        ColumnKey::SecondTerm => optional(row.cross_term.second_term),
        ColumnKey::Cumulative => row
            .cross_term
            .cumulative_average
            .map(|v| v.to_string())
            .unwrap_or_default(),
        ColumnKey::ClassHighest => stat(|s| &s.highest),
        ColumnKey::ClassLowest => stat(|s| &s.lowest),
        ColumnKey::ClassAverage => stat(|s| &s.average),
    }
}

pub const GRAND_TOTAL_HEIGHT: f32 = 30.0;

/// Boxed grand total under the table. Returns the top of the box, which is
/// what the footer pagination decision is based on.
pub fn draw_grand_total(canvas: &mut Canvas, columns: &ColumnSet, model: &ReportModel, table_bottom: f32) -> f32 {
    let top = table_bottom + 10.0;
    let left = columns.left();
    let right = columns
        .group(ColumnGroup::TermsWork)
        .map(|span| span.x + span.width)
        .unwrap_or_else(|| columns.right());

    canvas.stroke_rect(Rect::new(left, top, right - left, GRAND_TOTAL_HEIGHT));
    canvas.runs(
        vec![
            TextRun::new("Grand Total=", FontWeight::Bold),
            TextRun::new(format!(" {}", format_number(model.grand_total)), FontWeight::Bold),
        ],
        left + 10.0,
        top + 7.0,
        14.0,
    );
    top
}
