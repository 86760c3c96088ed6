// src/report/layout/mod.rs

//! Computes absolute positions for every element of the report sheet.
//!
//! Layout is a single forward pass over the sections. Each section draws onto
//! the [`Canvas`] and returns the y position where the next one starts.

pub mod columns;
pub mod footer;
pub mod geometry;
pub mod header;
pub mod table;

use std::sync::Arc;

use crate::report::{
    aggregate::ReportModel,
    assets::ImageAsset,
    document::{Align, Color, DrawOp, Page, Placement, Rect, ReportDocument, TextOp, TextRun},
    metrics::{self, ASCENT, FontWeight},
};

use columns::ColumnSet;
use geometry::{FooterPlacement, PageGeometry, footer_placement};

/// Letterhead and fixed wording printed on every report.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolProfile {
    pub name: String,
    pub address: String,
    pub contact: String,
    /// `{name}` is replaced with the student's full name.
    pub principal_remark: String,
}

impl Default for SchoolProfile {
    fn default() -> Self {
        SchoolProfile {
            name: "MUBITO HIGH SCHOOL.".to_string(),
            address: "59, BAYO OLUFEMI STREET, HERITAGE ESTATE, ABORU, IYANA-IPAJA, LAGOS STATE"
                .to_string(),
            contact: "Phone: 08150749181, 07082998471 | Email: mubitohighschool@gmail.com | Web: www.mubitoschools.com"
                .to_string(),
            principal_remark:
                "Commendable result indeed, you have very large room to perform better. {name} MORE! MORE!"
                    .to_string(),
        }
    }
}

impl SchoolProfile {
    pub fn principal_remark_for(&self, fullname: &str) -> String {
        self.principal_remark.replace("{name}", fullname)
    }
}

/// Pictures available to this report. Missing ones are simply not drawn.
#[derive(Debug, Clone, Default)]
pub struct LayoutAssets {
    pub logo: Option<Arc<ImageAsset>>,
    pub photo: Option<Arc<ImageAsset>>,
    pub extra_section: Option<Arc<ImageAsset>>,
}

/// Instruction sink with one open page at a time.
#[derive(Debug)]
pub struct Canvas {
    pages: Vec<Page>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            pages: vec![Page::default()],
        }
    }
}

impl Canvas {
    pub fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn stroke_rect(&mut self, rect: Rect) {
        self.push(DrawOp::Rect {
            rect,
            radius: 0.0,
            stroke: Some(1.0),
            fill: None,
        });
    }

    pub fn fill_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push(DrawOp::Rect {
            rect,
            radius,
            stroke: None,
            fill: Some(color),
        });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.line_with(from, to, 1.0);
    }

    pub fn line_with(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32) {
        self.push(DrawOp::Line { from, to, thickness });
    }

    /// Wraps `text` inside a box `width` wide whose first line starts at `top`.
    /// Returns the height used.
    #[allow(clippy::too_many_arguments)]
    pub fn text_box(
        &mut self,
        text: &str,
        x: f32,
        top: f32,
        width: f32,
        align: Align,
        weight: FontWeight,
        size: f32,
    ) -> f32 {
        let lines = metrics::wrap(text, weight, size, width);
        let line_height = metrics::line_height(size);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let used = metrics::text_width(line, weight, size);
            let offset = match align {
                Align::Left => 0.0,
                Align::Center => ((width - used) / 2.0).max(0.0),
                Align::Right => (width - used).max(0.0),
            };
            self.push(DrawOp::Text(TextOp {
                x: x + offset,
                y: top + i as f32 * line_height + ASCENT * size,
                size,
                runs: vec![TextRun::new(line.clone(), weight)],
                rotation: 0.0,
                color: Color::BLACK,
            }));
        }
        lines.len() as f32 * line_height
    }

    /// Several runs on one line, each continuing where the previous ended.
    pub fn runs(&mut self, runs: Vec<TextRun>, x: f32, top: f32, size: f32) {
        self.push(DrawOp::Text(TextOp {
            x,
            y: top + ASCENT * size,
            size,
            runs,
            rotation: 0.0,
            color: Color::BLACK,
        }));
    }

    /// Bold label followed by a regular value.
    pub fn label_value(&mut self, label: &str, value: &str, x: f32, top: f32, size: f32) {
        self.runs(
            vec![
                TextRun::new(label, FontWeight::Bold),
                TextRun::new(value, FontWeight::Regular),
            ],
            x,
            top,
            size,
        );
    }

    /// Places an image and returns the area it covers.
    pub fn image(&mut self, asset: &Arc<ImageAsset>, placement: Placement, opacity: f32) -> Rect {
        let area = placement.resolve(asset.width(), asset.height());
        self.push(DrawOp::Image {
            asset: Arc::clone(asset),
            placement,
            opacity,
        });
        area
    }
}

/// Produces the draw instructions for one report.
pub fn layout_report(
    model: &ReportModel,
    assets: &LayoutAssets,
    school: &SchoolProfile,
    geometry: &PageGeometry,
) -> ReportDocument {
    let mut canvas = Canvas::default();

    header::draw_watermark(&mut canvas, geometry, assets);
    let y = header::draw_letterhead(&mut canvas, geometry, school, assets, model);
    let y = header::draw_student_info(&mut canvas, geometry, assets, model, y);
    let y = header::draw_character_tables(&mut canvas, geometry, y);
    let y = header::draw_extra_section(&mut canvas, geometry, assets, y);

    let columns = ColumnSet::build(model.has_exam, model.term, geometry.left());
    let table_bottom = table::draw_score_table(&mut canvas, &columns, model, y + 10.0);
    let grand_total_top = table::draw_grand_total(&mut canvas, &columns, model, table_bottom);

    let placement = footer_placement(geometry, grand_total_top);
    if let FooterPlacement::NewPage { .. } = placement {
        canvas.new_page();
    }
    footer::draw_footer(&mut canvas, geometry, school, model, placement.top());

    ReportDocument {
        width: geometry.width,
        height: geometry.height,
        pages: canvas.into_pages(),
    }
}
