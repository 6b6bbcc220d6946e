//! Viewport locator for the "quick add" shortcut.
//!
//! # Invariants
//! - Only headings at or above the viewport midpoint are eligible.
//! - Falls back to the first heading in render order.

/// Rendered heading position relative to the top of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingPosition {
    pub section: String,
    /// Distance from the viewport top; negative once scrolled past.
    pub top: f64,
}

impl HeadingPosition {
    pub fn new(section: impl Into<String>, top: f64) -> Self {
        Self {
            section: section.into(),
            top,
        }
    }
}

/// Picks the section the user is currently looking at.
///
/// That is the heading closest to, but not below, the vertical midpoint of
/// a viewport `viewport_height` tall. Ties keep the earlier heading.
pub fn locate_visible_section(headings: &[HeadingPosition], viewport_height: f64) -> Option<&str> {
    let midpoint = viewport_height / 2.0;
    let mut best: Option<(&HeadingPosition, f64)> = None;

    for heading in headings.iter().filter(|heading| heading.top <= midpoint) {
        let distance = midpoint - heading.top;
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((heading, distance));
        }
    }

    best.map(|(heading, _)| heading)
        .or_else(|| headings.first())
        .map(|heading| heading.section.as_str())
}

#[cfg(test)]
mod tests {
    use super::{locate_visible_section, HeadingPosition};

    fn headings(tops: &[(&str, f64)]) -> Vec<HeadingPosition> {
        tops.iter()
            .map(|(name, top)| HeadingPosition::new(*name, *top))
            .collect()
    }

    #[test]
    fn picks_last_heading_scrolled_past_midpoint() {
        let list = headings(&[("Grocery", -300.0), ("Household", 120.0), ("Sweets", 700.0)]);
        assert_eq!(locate_visible_section(&list, 800.0), Some("Household"));
    }

    #[test]
    fn heading_exactly_on_midpoint_qualifies() {
        let list = headings(&[("Grocery", 10.0), ("Household", 400.0)]);
        assert_eq!(locate_visible_section(&list, 800.0), Some("Household"));
    }

    #[test]
    fn falls_back_to_first_heading_when_all_below_midpoint() {
        let list = headings(&[("Grocery", 500.0), ("Household", 900.0)]);
        assert_eq!(locate_visible_section(&list, 800.0), Some("Grocery"));
    }

    #[test]
    fn no_headings_yields_none() {
        assert_eq!(locate_visible_section(&[], 800.0), None);
    }
}
