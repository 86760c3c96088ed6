// src/report/render.rs

//! Turns a [`ReportDocument`] into PDF bytes with `printpdf`.
//!
//! Layout works top-down in points; PDF user space grows upwards, so every
//! y coordinate is flipped against the page height here and nowhere else.

use std::io::Write;

use printpdf::{
    BuiltinFont, Color as PdfColor, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt, Px, Rgb, TextMatrix,
};

use crate::report::{
    document::{Color, DrawOp, Placement, Rect, ReportDocument, TextOp},
    error::ReportError,
    metrics::FontWeight,
};

const LAYER: &str = "Layer 1";
/// Points per rounded corner; enough for radii of a few points.
const CORNER_STEPS: usize = 4;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points as f64))
}

fn rgb(color: Color) -> PdfColor {
    let (r, g, b) = color.unit();
    PdfColor::Rgb(Rgb::new(r as f64, g as f64, b as f64, None))
}

/// Writes `document` to `sink`.
///
/// The whole file is written or the call fails: a failing sink yields
/// [`ReportError::Sink`] and nothing more is written to it; any other backend
/// failure yields [`ReportError::Render`].
pub fn render_pdf<W: Write>(document: &ReportDocument, mut sink: W) -> Result<(), ReportError> {
    let (width, height) = (mm(document.width), mm(document.height));
    let (doc, first_page, first_layer) = PdfDocument::new("Report Sheet", width, height, LAYER);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(format!("{:?}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(format!("{:?}", e)))?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        let painter = Painter {
            layer,
            fonts: &fonts,
            page_height: document.height,
        };
        for op in &page.ops {
            painter.draw(op);
        }
    }
    tracing::debug!("Serialising report with {} page(s)", document.pages.len());

    // printpdf issues a single `write` for the whole file and ignores short
    // writes, so serialise first and hand the bytes over with `write_all`.
    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ReportError::Render(format!("{:?}", e)))?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}

struct Painter<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    page_height: f32,
}

impl Painter<'_> {
    fn point(&self, x: f32, y: f32) -> (Point, bool) {
        (Point::new(mm(x), mm(self.page_height - y)), false)
    }

    fn draw(&self, op: &DrawOp) {
        match op {
            DrawOp::Rect { rect, radius, stroke, fill } => self.rect(rect, *radius, *stroke, *fill),
            DrawOp::Line { from, to, thickness } => {
                self.layer.set_outline_color(rgb(Color::BLACK));
                self.layer.set_outline_thickness(*thickness as f64);
                self.layer.add_shape(Line {
                    points: vec![self.point(from.0, from.1), self.point(to.0, to.1)],
                    is_closed: false,
                    has_fill: false,
                    has_stroke: true,
                    is_clipping_path: false,
                });
            }
            DrawOp::Text(text) => self.text(text),
            DrawOp::Image { asset, placement, opacity } => {
                let area = placement.resolve(asset.width(), asset.height());
                let pixels = if *opacity < 1.0 {
                    asset.faded(*opacity)
                } else {
                    asset.rgb_bytes().to_vec()
                };
                self.image(asset.width(), asset.height(), pixels, area, placement);
            }
        }
    }

    fn rect(&self, rect: &Rect, radius: f32, stroke: Option<f32>, fill: Option<Color>) {
        if stroke.is_none() && fill.is_none() {
            return;
        }
        if let Some(color) = fill {
            self.layer.set_fill_color(rgb(color));
        }
        if let Some(thickness) = stroke {
            self.layer.set_outline_color(rgb(Color::BLACK));
            self.layer.set_outline_thickness(thickness as f64);
        }
        self.layer.add_shape(Line {
            points: self.outline(rect, radius),
            is_closed: true,
            has_fill: fill.is_some(),
            has_stroke: stroke.is_some(),
            is_clipping_path: false,
        });
    }

    /// Corner points clockwise from the top-left. Rounded corners become a
    /// short polyline.
    fn outline(&self, rect: &Rect, radius: f32) -> Vec<(Point, bool)> {
        let radius = radius.clamp(0.0, rect.width.min(rect.height) / 2.0);
        if radius <= 0.0 {
            return vec![
                self.point(rect.x, rect.y),
                self.point(rect.right(), rect.y),
                self.point(rect.right(), rect.bottom()),
                self.point(rect.x, rect.bottom()),
            ];
        }
        // centre of each corner arc and the angle the arc starts at
        let corners = [
            (rect.x + radius, rect.y + radius, 180.0_f32),
            (rect.right() - radius, rect.y + radius, 270.0),
            (rect.right() - radius, rect.bottom() - radius, 0.0),
            (rect.x + radius, rect.bottom() - radius, 90.0),
        ];
        let mut points = Vec::with_capacity(corners.len() * (CORNER_STEPS + 1));
        for (cx, cy, start) in corners {
            for step in 0..=CORNER_STEPS {
                let angle = (start + 90.0 * step as f32 / CORNER_STEPS as f32).to_radians();
                points.push(self.point(cx + radius * angle.cos(), cy + radius * angle.sin()));
            }
        }
        points
    }

    fn text(&self, op: &TextOp) {
        if op.runs.iter().all(|r| r.text.is_empty()) {
            return;
        }
        let baseline = self.page_height - op.y;
        self.layer.set_fill_color(rgb(op.color));
        self.layer.begin_text_section();
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            Pt(op.x as f64),
            Pt(baseline as f64),
            op.rotation as f64,
        ));
        for run in op.runs.iter().filter(|r| !r.text.is_empty()) {
            let font = self.fonts.get(run.weight);
            self.layer.set_font(font, op.size as f64);
            self.layer.write_text(run.text.as_str(), font);
        }
        self.layer.end_text_section();
    }

    fn image(&self, px_width: u32, px_height: u32, pixels: Vec<u8>, area: Rect, placement: &Placement) {
        if px_width == 0 || px_height == 0 {
            tracing::debug!("Skipping empty image at {:?}", placement);
            return;
        }
        let xobject = ImageXObject {
            width: Px(px_width as usize),
            height: Px(px_height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: pixels,
            image_filter: None,
            clipping_bbox: None,
        };
        // at 72 dpi one pixel is one point before scaling
        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(area.x)),
                translate_y: Some(mm(self.page_height - area.bottom())),
                scale_x: Some((area.width / px_width as f32) as f64),
                scale_y: Some((area.height / px_height as f32) as f64),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
    }
}
