// src/report/layout/geometry.rs

/// Fixed page model. All sections derive their positions from these numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Uniform margin around the printed area.
    pub border: f32,
    /// Top margin of continuation pages and bottom reserve for the footer.
    pub page_margin: f32,
    /// Space the remarks and grading key need below the grand total.
    pub footer_budget: f32,
}

impl Default for PageGeometry {
    /// A4 portrait.
    fn default() -> Self {
        PageGeometry {
            width: 595.28,
            height: 841.89,
            border: 20.0,
            page_margin: 60.0,
            footer_budget: 300.0,
        }
    }
}

impl PageGeometry {
    pub fn left(&self) -> f32 {
        self.border
    }

    pub fn right(&self) -> f32 {
        self.width - self.border
    }

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.border
    }

    /// Lowest grand-total position that still keeps the footer on the page.
    pub fn footer_threshold(&self) -> f32 {
        self.height - self.footer_budget - self.page_margin
    }
}

/// Gap between the grand-total box and the footer on the same page.
pub const FOOTER_GAP: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FooterPlacement {
    SamePage { top: f32 },
    NewPage { top: f32 },
}

impl FooterPlacement {
    pub fn top(&self) -> f32 {
        match *self {
            FooterPlacement::SamePage { top } | FooterPlacement::NewPage { top } => top,
        }
    }
}

/// Decides where the footer starts given the top of the grand-total row.
/// A grand total exactly at the threshold keeps the footer on the same page.
pub fn footer_placement(geometry: &PageGeometry, grand_total_top: f32) -> FooterPlacement {
    if grand_total_top > geometry.footer_threshold() {
        FooterPlacement::NewPage {
            top: geometry.page_margin,
        }
    } else {
        FooterPlacement::SamePage {
            top: grand_total_top + FOOTER_GAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_width_excludes_both_borders() {
        let g = PageGeometry::default();
        assert!((g.usable_width() - 555.28).abs() < 1e-3);
        assert_eq!(g.left(), 20.0);
    }

    #[test]
    fn footer_stays_when_there_is_room() {
        let g = PageGeometry::default();
        assert_eq!(footer_placement(&g, 300.0), FooterPlacement::SamePage { top: 340.0 });
    }

    #[test]
    fn footer_moves_when_space_runs_out() {
        let g = PageGeometry::default();
        assert_eq!(footer_placement(&g, 500.0), FooterPlacement::NewPage { top: 60.0 });
    }

    #[test]
    fn footer_threshold_itself_stays_on_page() {
        let g = PageGeometry::default();
        let at = g.footer_threshold();
        assert!(matches!(footer_placement(&g, at), FooterPlacement::SamePage { .. }));
        let past = at + 0.01;
        assert!(matches!(footer_placement(&g, past), FooterPlacement::NewPage { .. }));
    }
}
