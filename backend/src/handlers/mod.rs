// src/handlers/mod.rs

pub mod grading;
pub mod report;
