// src/report/document.rs

//! Draw instructions produced by layout and consumed by the renderer.
//!
//! Coordinates are PDF points with the origin at the top-left corner of the
//! page and y growing downwards. Text positions are baselines.

use std::sync::Arc;

use crate::report::{assets::ImageAsset, metrics::FontWeight};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Components scaled to 0..=1.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A piece of text sharing one font. Consecutive runs of a [`TextOp`] follow
/// each other on the same line.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub weight: FontWeight,
}

impl TextRun {
    pub fn new(text: impl Into<String>, weight: FontWeight) -> Self {
        TextRun {
            text: text.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    /// Baseline of the first run.
    pub y: f32,
    pub size: f32,
    pub runs: Vec<TextRun>,
    /// Counter-clockwise rotation in degrees around (x, y).
    pub rotation: f32,
    pub color: Color,
}

impl TextOp {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Where an image goes. Sizes that depend on the picture's aspect ratio are
/// resolved against its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Stretched to the rectangle.
    Exact(Rect),
    /// Fixed width, height from the aspect ratio.
    Width { x: f32, y: f32, width: f32 },
    /// Largest size that fits inside the box, centred in it.
    Fit(Rect),
}

impl Placement {
    pub fn resolve(&self, pixel_width: u32, pixel_height: u32) -> Rect {
        let (pw, ph) = (pixel_width.max(1) as f32, pixel_height.max(1) as f32);
        match *self {
            Placement::Exact(rect) => rect,
            Placement::Width { x, y, width } => Rect::new(x, y, width, width * ph / pw),
            Placement::Fit(bounds) => {
                let scale = (bounds.width / pw).min(bounds.height / ph);
                let (w, h) = (pw * scale, ph * scale);
                Rect::new(
                    bounds.x + (bounds.width - w) / 2.0,
                    bounds.y + (bounds.height - h) / 2.0,
                    w,
                    h,
                )
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        radius: f32,
        /// Outline thickness; `None` leaves the outline undrawn.
        stroke: Option<f32>,
        fill: Option<Color>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
    },
    Text(TextOp),
    Image {
        asset: Arc<ImageAsset>,
        placement: Placement,
        /// 1.0 is fully opaque.
        opacity: f32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text drawn on the page, one entry per text instruction.
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    /// Finds the first text instruction whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<(usize, &TextOp)> {
        self.pages.iter().enumerate().find_map(|(index, page)| {
            page.texts().find(|t| t.text() == text).map(|t| (index, t))
        })
    }
}
