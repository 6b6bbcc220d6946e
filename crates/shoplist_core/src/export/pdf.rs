//! PDF export of the current selection.
//!
//! Layout runs top-down in millimetres on A4 pages and is computed
//! separately from rendering so pagination can be checked without decoding
//! PDF bytes.

use super::summary::SelectionBlock;
use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default download name for the exported selection.
pub const PDF_FILE_NAME: &str = "Selected_Items.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MARGIN_MM: f32 = 10.0;
const HEADER_X_MM: f32 = 10.0;
const ITEM_X_MM: f32 = 14.0;
const LINE_ADVANCE_MM: f32 = 5.0;
const SECTION_GAP_MM: f32 = 5.0;
const PAGE_BREAK_AFTER_MM: f32 = 280.0;
const FONT_SIZE_PT: f32 = 12.0;
const LAYER_NAME: &str = "Layer 1";

/// One positioned text line. `y_mm` is measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub bold: bool,
}

/// Paginated layout: one vector of lines per page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PdfLayout {
    pub pages: Vec<Vec<PdfLine>>,
}

impl PdfLayout {
    /// Lines of every page, in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PdfLine> {
        self.pages.iter().flatten()
    }
}

#[derive(Debug)]
pub enum PdfError {
    Render(printpdf::Error),
}

impl Display for PdfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(err) => write!(f, "failed to render pdf: {err}"),
        }
    }
}

impl Error for PdfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
        }
    }
}

impl From<printpdf::Error> for PdfError {
    fn from(value: printpdf::Error) -> Self {
        Self::Render(value)
    }
}

/// Lays out section headers and `- item` lines.
///
/// A new page starts whenever the cursor has moved past the break
/// threshold before an item line is placed. Headers never break.
pub fn layout_selection(blocks: &[SelectionBlock]) -> PdfLayout {
    let mut pages: Vec<Vec<PdfLine>> = vec![Vec::new()];
    let mut y = TOP_MARGIN_MM;

    for block in blocks {
        place_line(&mut pages, &mut y, block.section.clone(), HEADER_X_MM, true);
        for item in &block.items {
            if y > PAGE_BREAK_AFTER_MM {
                pages.push(Vec::new());
                y = TOP_MARGIN_MM;
            }
            place_line(&mut pages, &mut y, format!("- {item}"), ITEM_X_MM, false);
        }
        y += SECTION_GAP_MM;
    }

    PdfLayout { pages }
}

fn place_line(pages: &mut [Vec<PdfLine>], y: &mut f32, text: String, x_mm: f32, bold: bool) {
    if let Some(page) = pages.last_mut() {
        page.push(PdfLine {
            text,
            x_mm,
            y_mm: *y,
            bold,
        });
    }
    *y += LINE_ADVANCE_MM;
}

/// Renders a layout to PDF bytes with Helvetica / Helvetica-Bold.
pub fn render_pdf(layout: &PdfLayout, title: &str) -> Result<Vec<u8>, PdfError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (page_index, lines) in layout.pages.iter().enumerate() {
        let (page, layer) = if page_index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME)
        };
        let layer = doc.get_page(page).get_layer(layer);
        for line in lines {
            let font = if line.bold { &bold } else { &regular };
            layer.use_text(
                line.text.as_str(),
                FONT_SIZE_PT,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                font,
            );
        }
    }

    let bytes = doc.save_to_bytes()?;
    info!(
        "event=pdf_export module=export status=ok pages={} bytes={}",
        layout.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}
