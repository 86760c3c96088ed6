// src/report/layout/footer.rs

//! Promotional status, the two remark boxes and the grading key.

use crate::report::{
    aggregate::ReportModel,
    document::{Align, Rect},
    metrics::{self, FontWeight},
};

use super::{Canvas, SchoolProfile, geometry::PageGeometry};

/// Room kept on the right for the grading key.
const KEY_AREA_WIDTH: f32 = 180.0;
const REMARK_LABEL_WIDTH: f32 = 140.0;
const REMARK_SIZE: f32 = 9.0;
const REMARK_MIN_HEIGHT: f32 = 30.0;
const REMARK_PADDING: f32 = 14.0;

pub const DEFAULT_CLASS_REMARK: &str = "No remark provided.";
pub const PROMOTION_STATUS: &str = "Passed";

pub const GRADING_KEY: [(&str, &str); 7] = [
    ("A", "75%-100%"),
    ("B", "70%-74.9%"),
    ("C", "65%-69.9%"),
    ("D", "60%-64.9%"),
    ("E", "55%-59.9%"),
    ("F", "50%-54.9%"),
    ("G", "0%-49.9%"),
];
const KEY_COLUMNS: [f32; 2] = [40.0, 80.0];
const KEY_ROW_HEIGHT: f32 = 18.0;

pub fn remarks_width(geometry: &PageGeometry) -> f32 {
    geometry.usable_width() - KEY_AREA_WIDTH
}

/// Height of a remark box holding `text`, never below the minimum.
pub fn remark_box_height(text: &str, geometry: &PageGeometry) -> f32 {
    let measured = metrics::text_height(text, FontWeight::Regular, REMARK_SIZE, remark_text_width(geometry));
    (measured + REMARK_PADDING).max(REMARK_MIN_HEIGHT)
}

fn remark_text_width(geometry: &PageGeometry) -> f32 {
    remarks_width(geometry) - REMARK_LABEL_WIDTH - 5.0
}

/// Draws the footer from `top` and returns its bottom edge.
pub fn draw_footer(
    canvas: &mut Canvas,
    geometry: &PageGeometry,
    school: &SchoolProfile,
    model: &ReportModel,
    top: f32,
) -> f32 {
    let left = geometry.left();
    let width = remarks_width(geometry);

    canvas.stroke_rect(Rect::new(left, top, width, 20.0));
    canvas.label_value("Promotional Status: ", PROMOTION_STATUS, left + 5.0, top + 5.0, 10.0);

    let class_remark = model
        .class_teacher_remark
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or(DEFAULT_CLASS_REMARK);
    let y = draw_remark_box(canvas, geometry, "Class Teacher's Remark:", class_remark, top + 20.0);

    let principal = school.principal_remark_for(&model.student.fullname);
    let remarks_bottom = draw_remark_box(canvas, geometry, "Principal's Remark:", &principal, y);

    let key_bottom = draw_grading_key(canvas, left + width + 24.0, top);
    remarks_bottom.max(key_bottom)
}

fn draw_remark_box(canvas: &mut Canvas, geometry: &PageGeometry, label: &str, text: &str, top: f32) -> f32 {
    let left = geometry.left();
    let height = remark_box_height(text, geometry);
    canvas.text_box(label, left + 5.0, top + 7.0, REMARK_LABEL_WIDTH - 10.0, Align::Left, FontWeight::Bold, REMARK_SIZE);
    canvas.stroke_rect(Rect::new(left, top, remarks_width(geometry), height));
    canvas.text_box(
        text,
        left + REMARK_LABEL_WIDTH,
        top + 7.0,
        remark_text_width(geometry),
        Align::Left,
        FontWeight::Regular,
        REMARK_SIZE,
    );
    top + height
}

fn draw_grading_key(canvas: &mut Canvas, x: f32, top: f32) -> f32 {
    let [grade_w, range_w] = KEY_COLUMNS;
    canvas.text_box("KEY TO GRADING", x, top, grade_w + range_w, Align::Center, FontWeight::Bold, 11.0);

    let header_top = top + 18.0;
    canvas.stroke_rect(Rect::new(x, header_top - 3.0, grade_w + range_w, KEY_ROW_HEIGHT));
    canvas.text_box("Grade", x, header_top, grade_w, Align::Center, FontWeight::Bold, 10.0);
    canvas.text_box("Range", x + grade_w, header_top, range_w, Align::Center, FontWeight::Bold, 10.0);

    let mut y = header_top + 15.0;
    for (grade, range) in GRADING_KEY {
        canvas.stroke_rect(Rect::new(x, y, grade_w, KEY_ROW_HEIGHT));
        canvas.stroke_rect(Rect::new(x + grade_w, y, range_w, KEY_ROW_HEIGHT));
        canvas.text_box(grade, x, y + 3.0, grade_w, Align::Center, FontWeight::Regular, 10.0);
        canvas.text_box(range, x + grade_w, y + 3.0, range_w, Align::Center, FontWeight::Regular, 10.0);
        y += KEY_ROW_HEIGHT;
    }
    y
}
