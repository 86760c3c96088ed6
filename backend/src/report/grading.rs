// src/report/grading.rs

//! Grade bands for subject totals and averages.
//!
//! One table drives both renderings: the short code written into the score
//! sheet (`B2`) and the descriptive label printed as the cumulative grade
//! (`B2 (Very Good)`).

/// How a band is rendered at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeStyle {
    Code,
    Descriptive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeBand {
    /// Inclusive lower bound on the 0-100 scale.
    pub min: i64,
    pub code: &'static str,
    pub qualifier: &'static str,
}

impl GradeBand {
    pub fn render(&self, style: GradeStyle) -> String {
        match style {
            GradeStyle::Code => self.code.to_string(),
            GradeStyle::Descriptive => format!("{} ({})", self.code, self.qualifier),
        }
    }
}

/// Ordered bands, best first. The last band must start at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeScale {
    bands: Vec<GradeBand>,
}

impl Default for GradeScale {
    fn default() -> Self {
        let band = |min, code, qualifier| GradeBand { min, code, qualifier };
        GradeScale {
            bands: vec![
                band(75, "A1", "Excellent"),
                band(70, "B2", "Very Good"),
                band(65, "B3", "Good"),
                band(60, "C6", "Credit"),
                band(55, "D7", "Pass"),
                band(50, "E8", "Fair"),
                band(0, "F9", "Fail"),
            ],
        }
    }
}

impl GradeScale {
    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    /// Band for a total given either as a percentage or as a 0-1 fraction.
    /// Returns `None` for NaN and infinities.
    pub fn band_for(&self, total: f64) -> Option<&GradeBand> {
        let percent = normalize_percent(total)?;
        self.bands
            .iter()
            .find(|b| percent >= b.min)
            .or_else(|| self.bands.last())
    }

    /// Position of the band in the table, 0 being the best grade.
    pub fn rank_of(&self, total: f64) -> Option<usize> {
        let band = self.band_for(total)?;
        self.bands.iter().position(|b| b == band)
    }
}

/// Maps a total to its grade label. Never panics; non-finite input gives "".
pub fn grade_for(total: f64, scale: &GradeScale, style: GradeStyle) -> String {
    scale
        .band_for(total)
        .map(|band| band.render(style))
        .unwrap_or_default()
}

/// Same as [`grade_for`] for raw user input; unparsable text gives "".
pub fn grade_for_input(raw: &str, scale: &GradeScale, style: GradeStyle) -> String {
    match raw.trim().parse::<f64>() {
        Ok(total) => grade_for(total, scale, style),
        Err(_) => String::new(),
    }
}

/// Fraction detection, rounding and clamping ahead of the band lookup.
fn normalize_percent(total: f64) -> Option<i64> {
    if !total.is_finite() {
        return None;
    }
    let scaled = if total > 0.0 && total <= 1.0 { total * 100.0 } else { total };
    Some(round_half_up(scaled).clamp(0.0, 100.0) as i64)
}

/// Rounds halves towards positive infinity (2.5 -> 3, -2.5 -> -2).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
