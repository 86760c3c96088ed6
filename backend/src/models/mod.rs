// src/models/mod.rs

pub mod report;
pub mod score;
pub mod student;
pub mod term;
