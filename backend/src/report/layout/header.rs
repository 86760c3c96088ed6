// src/report/layout/header.rs

//! Watermark, letterhead, student details and the character tables.

use crate::report::{
    aggregate::ReportModel,
    document::{Align, Color, Placement, Rect, TextRun},
    metrics::FontWeight,
};

use super::{Canvas, LayoutAssets, SchoolProfile, geometry::PageGeometry};

const WATERMARK_OPACITY: f32 = 0.10;
const LOGO_WIDTH: f32 = 60.0;
const PASSPORT_SIZE: f32 = 60.0;
const INFO_ROW_HEIGHT: f32 = 20.0;

/// Faint logo behind everything else on the first page.
pub fn draw_watermark(canvas: &mut Canvas, geometry: &PageGeometry, assets: &LayoutAssets) {
    let Some(logo) = &assets.logo else {
        return;
    };
    let side = (geometry.width - 100.0).min(400.0);
    let bounds = Rect::new(
        (geometry.width - side) / 2.0,
        (geometry.height - side) / 2.0,
        side,
        side,
    );
    canvas.image(logo, Placement::Fit(bounds), WATERMARK_OPACITY);
}

/// School name, address, contact line, report title and the rule beneath.
pub fn draw_letterhead(
    canvas: &mut Canvas,
    geometry: &PageGeometry,
    school: &SchoolProfile,
    assets: &LayoutAssets,
    model: &ReportModel,
) -> f32 {
    let left = geometry.left();
    let width = geometry.usable_width();
    let logo_top = geometry.border + 5.0;

    if let Some(logo) = &assets.logo {
        canvas.image(
            logo,
            Placement::Width {
                x: left,
                y: logo_top,
                width: LOGO_WIDTH,
            },
            1.0,
        );
    }

    let top = logo_top + 1.0;
    canvas.text_box(&school.name, left, top, width, Align::Center, FontWeight::Bold, 20.0);
    canvas.text_box(&school.address, left, top + 19.0, width, Align::Center, FontWeight::Regular, 9.0);
    canvas.text_box(&school.contact, left, top + 28.0, width, Align::Center, FontWeight::Regular, 9.0);

    let title = format!(
        "REPORT SHEET FOR {}, {} ACADEMIC SESSION",
        model.term.label().to_uppercase(),
        model.session
    );
    canvas.text_box(&title, left, top + 40.0, width, Align::Center, FontWeight::Bold, 13.0);
    canvas.line((left, top + 60.0), (geometry.right(), top + 60.0));

    top + 65.0
}

/// Name row with the passport box, the details grid and the averages lines.
pub fn draw_student_info(
    canvas: &mut Canvas,
    geometry: &PageGeometry,
    assets: &LayoutAssets,
    model: &ReportModel,
    top: f32,
) -> f32 {
    let left = geometry.left();
    let width = geometry.usable_width();
    let student = &model.student;

    canvas.label_value("STUDENT NAME: ", &student.fullname, left + 5.0, top + 5.0, 11.0);

    let passport = Rect::new(left + width - PASSPORT_SIZE - 10.0, top, PASSPORT_SIZE, PASSPORT_SIZE);
    canvas.stroke_rect(passport);
    match &assets.photo {
        Some(photo) => {
            let inner = Rect::new(passport.x + 3.0, passport.y + 3.0, passport.width - 6.0, passport.height - 6.0);
            canvas.image(photo, Placement::Fit(inner), 1.0);
        }
        None => {
            canvas.text_box(
                "Passport\nPhoto",
                passport.x + 6.0,
                passport.y + passport.height / 2.0 - 8.0,
                passport.width - 12.0,
                Align::Center,
                FontWeight::Regular,
                8.0,
            );
        }
    }

    let grid_top = top + INFO_ROW_HEIGHT;
    let col = width / 3.0;
    let xs = [left, left + col, left + 2.0 * col, left + 3.0 * col];

    // Horizontal rules stop short of the passport box.
    let gap_start = passport.x - 6.0;
    let gap_end = passport.right() + 6.0;
    for row in 0..=2 {
        let y = grid_top + row as f32 * INFO_ROW_HEIGHT;
        if xs[0] < gap_start {
            canvas.line((xs[0], y), (gap_start.min(xs[3]), y));
        }
        if gap_end < xs[3] {
            canvas.line((gap_end.max(xs[0]), y), (xs[3], y));
        }
    }
    for x in xs {
        canvas.line((x, grid_top), (x, grid_top + 2.0 * INFO_ROW_HEIGHT));
    }

    let cell = |i: usize| xs[i] + 5.0;
    let or_blank = |v: &Option<String>| v.clone().unwrap_or_default();
    canvas.label_value("Gender: ", &or_blank(&student.gender), cell(0), grid_top + 5.0, 11.0);
    canvas.label_value("Date of Birth: ", &or_blank(&student.dob), cell(1), grid_top + 5.0, 11.0);
    canvas.label_value("Admission No: ", &or_blank(&student.admission_no), cell(2), grid_top + 6.0, 9.0);
    canvas.label_value("Class: ", &student.class_name, cell(0), grid_top + 25.0, 11.0);
    canvas.label_value(
        "Students in Class: ",
        &model.students_in_class.to_string(),
        cell(1),
        grid_top + 25.0,
        11.0,
    );

    let summary_top = grid_top + 2.0 * INFO_ROW_HEIGHT + 4.0;
    let pair = |label: &str, value: &str| {
        vec![
            TextRun::new(label, FontWeight::Bold),
            TextRun::new(value, FontWeight::Regular),
        ]
    };
    let mut first = pair("TERM'S AVERAGE: ", &model.term_average);
    first.extend(pair("   CUMULATIVE GRADE: ", &model.cumulative_grade));
    first.extend(pair("   SESSION: ", &model.session));
    canvas.runs(first, cell(0), summary_top, 9.0);

    let mut second = pair("HIGHEST CLASS AVG: ", &model.cohort.highest);
    second.extend(pair("   LOWEST CLASS AVG: ", &model.cohort.lowest));
    second.extend(pair("   CLASS AVG: ", &model.cohort.average));
    canvas.runs(second, cell(0), summary_top + 12.0, 9.0);

    summary_top + 26.0
}

/// Layout of one character table. Rating columns have their own widths.
pub struct CharacterTable<'a> {
    pub title: &'a str,
    pub traits: [&'a str; 3],
    pub name_width: f32,
    pub rating_widths: [f32; 5],
}

pub const RATINGS: [&str; 5] = ["Excellent", "Very good", "Good", "Fair", "Poor"];

const TABLE_GAP: f32 = 12.0;
const TABLE_HEADER_HEIGHT: f32 = 18.0;
const TABLE_ROW_HEIGHT: f32 = 14.0;
const TABLE_HEADER_FILL: Color = Color::rgb(0xF7, 0xCF, 0xE6);

pub const CHARACTER_TABLES: [CharacterTable<'static>; 2] = [
    CharacterTable {
        title: "Character",
        traits: ["Attendance", "Attentiveness", "Punctuality"],
        name_width: 110.0,
        rating_widths: [39.0, 26.0, 26.0, 36.0, 36.0],
    },
    CharacterTable {
        title: "Character (cont)'d",
        traits: ["Neatness", "Politeness", "Relationship with others"],
        name_width: 120.0,
        rating_widths: [38.0, 26.0, 26.0, 26.0, 36.0],
    },
];

/// The two rating tables side by side.
pub fn draw_character_tables(canvas: &mut Canvas, geometry: &PageGeometry, top: f32) -> f32 {
    let table_width = (geometry.usable_width() - TABLE_GAP) / 2.0;
    let start = top + 8.0;
    let mut bottom = start;
    for (i, table) in CHARACTER_TABLES.iter().enumerate() {
        let x = geometry.left() + i as f32 * (table_width + TABLE_GAP);
        bottom = bottom.max(draw_character_table(canvas, table, x, start, table_width));
    }
    bottom + 12.0
}

fn draw_character_table(
    canvas: &mut Canvas,
    table: &CharacterTable<'_>,
    x: f32,
    top: f32,
    width: f32,
) -> f32 {
    let body_bottom = top + TABLE_HEADER_HEIGHT + table.traits.len() as f32 * TABLE_ROW_HEIGHT;

    canvas.fill_rect(Rect::new(x, top, width, TABLE_HEADER_HEIGHT), 4.0, TABLE_HEADER_FILL);
    canvas.text_box(
        table.title,
        x + 6.0,
        top + 4.0,
        table.name_width - 12.0,
        Align::Left,
        FontWeight::Bold,
        10.0,
    );
    canvas.line((x, top + TABLE_HEADER_HEIGHT), (x + width, top + TABLE_HEADER_HEIGHT));

    let mut rx = x + table.name_width;
    for (label, w) in RATINGS.iter().zip(table.rating_widths) {
        canvas.line((rx, top), (rx, body_bottom));
        canvas.text_box(label, rx + 2.0, top + 2.0, w - 4.0, Align::Center, FontWeight::Regular, 8.0);
        rx += w;
    }

    for (r, name) in table.traits.iter().enumerate() {
        let row_top = top + TABLE_HEADER_HEIGHT + r as f32 * TABLE_ROW_HEIGHT;
        canvas.stroke_rect(Rect::new(x, row_top, table.name_width, TABLE_ROW_HEIGHT));
        canvas.text_box(
            name,
            x + 4.0,
            row_top + 2.0,
            table.name_width - 8.0,
            Align::Left,
            FontWeight::Regular,
            9.0,
        );
        let mut cx = x + table.name_width;
        for w in table.rating_widths {
            canvas.stroke_rect(Rect::new(cx, row_top, w, TABLE_ROW_HEIGHT));
            cx += w;
        }
    }

    body_bottom
}

/// Optional artwork band; its height follows the picture's aspect ratio.
pub fn draw_extra_section(
    canvas: &mut Canvas,
    geometry: &PageGeometry,
    assets: &LayoutAssets,
    top: f32,
) -> f32 {
    match &assets.extra_section {
        Some(band) => {
            let placement = Placement::Width {
                x: geometry.left(),
                y: top + 10.0,
                width: geometry.usable_width(),
            };
            canvas.image(band, placement, 1.0).bottom()
        }
        None => top,
    }
}
