//! Plain-text rendition of a [`ListView`] for terminal frontends.

use super::list_view::{ListView, SectionView};
use super::viewport::HeadingPosition;

/// Rendered lines plus where each section heading landed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedText {
    pub lines: Vec<String>,
    /// Heading line numbers, in render order.
    pub headings: Vec<(String, usize)>,
}

impl RenderedText {
    /// Heading positions relative to a viewport scrolled down by
    /// `scroll_offset` lines.
    pub fn heading_positions(&self, scroll_offset: usize) -> Vec<HeadingPosition> {
        self.headings
            .iter()
            .map(|(section, line)| {
                HeadingPosition::new(section.clone(), *line as f64 - scroll_offset as f64)
            })
            .collect()
    }

    pub fn to_text(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Renders the navigation bar followed by every section.
pub fn render_text(view: &ListView) -> RenderedText {
    let mut rendered = RenderedText::default();

    let nav = view
        .nav
        .iter()
        .map(|button| format!("[{}]", button.label))
        .collect::<Vec<_>>()
        .join(" ");
    rendered.lines.push(nav);

    for section in &view.sections {
        rendered.lines.push(String::new());
        push_section(&mut rendered, section);
    }
    rendered
}

/// Renders a single section, as shown after jumping to it.
pub fn render_section_text(section: &SectionView) -> RenderedText {
    let mut rendered = RenderedText::default();
    push_section(&mut rendered, section);
    rendered
}

fn push_section(rendered: &mut RenderedText, section: &SectionView) {
    rendered
        .headings
        .push((section.name.clone(), rendered.lines.len()));
    rendered
        .lines
        .push(format!("## {}  [+ Add Item]", section.name));
    for row in &section.rows {
        let mark = if row.checked { 'x' } else { ' ' };
        rendered
            .lines
            .push(format!("{:>3}. [{mark}] {}", row.index, row.name));
    }
}
