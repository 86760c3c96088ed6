// src/report/mod.rs

//! Report card generation: query, aggregate, lay out, render.

pub mod aggregate;
pub mod assets;
pub mod document;
pub mod error;
pub mod grading;
pub mod layout;
pub mod metrics;
pub mod pipeline;
pub mod render;
pub mod store;

pub use error::ReportError;
pub use pipeline::{ReportRequest, generate_report, prepare_report};
