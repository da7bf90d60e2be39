//! Post-layout stamping pass.
//!
//! Runs exactly once, after the content pass has produced the final page
//! list. Only here is the total page count known, so only here are the
//! "Page n of total" footers and the table-of-contents body drawn. Stamps
//! are appended as overlay commands; content commands are never rewritten.

use crate::fonts::Font;
use crate::layout::{ASCENT_FACTOR, Layout, TOC_BODY_TOP_OFFSET};
use crate::sink::{DrawCommand, LineCommand, Measure, TextCommand};

const FOOTER_SIZE: f32 = 8.0;
const FOOTER_COLOR: [u8; 3] = [100, 100, 100];
const FOOTER_TEXT: &str = "This report was generated electronically and is valid without signature.";

const WATERMARK_SIZE: f32 = 46.0;
const WATERMARK_COLOR: [u8; 3] = [225, 225, 225];
const WATERMARK_ANGLE_DEG: f32 = 45.0;
const WATERMARK_STEP_X: f32 = 230.0;
const WATERMARK_STEP_Y: f32 = 190.0;

const TOC_ENTRY_SIZE: f32 = 10.0;
const TOC_ENTRY_STEP: f32 = 17.0;

/// Stamp footers, page numbers, the watermark and the TOC body onto the
/// finished pages. The cover page (index 0) is left untouched.
pub fn stamp_pages(layout: &mut Layout, measure: &dyn Measure) {
    let total = layout.pages.len();
    let g = layout.geometry;

    if let Some(toc_page) = layout.toc_page {
        stamp_toc_body(layout, toc_page, measure);
    }

    for page in layout.pages.iter_mut().skip(1) {
        let n = page.index + 1;

        if let Some(text) = &layout.watermark {
            let mut y = 140.0;
            while y < g.height {
                let mut x = 40.0;
                while x < g.width - g.margin {
                    page.commands.push(DrawCommand::Text(TextCommand {
                        x,
                        y,
                        text: text.clone(),
                        font: Font::HelveticaBold,
                        size: WATERMARK_SIZE,
                        color: WATERMARK_COLOR,
                        angle_deg: WATERMARK_ANGLE_DEG,
                    }));
                    x += WATERMARK_STEP_X;
                }
                y += WATERMARK_STEP_Y;
            }
        }

        let rule_y = g.limit_y() + 8.0;
        page.commands.push(DrawCommand::Line(LineCommand {
            x1: g.margin,
            y1: rule_y,
            x2: g.width - g.margin,
            y2: rule_y,
            width: 0.6,
            color: [150, 150, 150],
        }));

        let baseline = rule_y + 4.0 + FOOTER_SIZE * ASCENT_FACTOR;
        page.commands.push(DrawCommand::Text(TextCommand {
            x: g.margin,
            y: baseline,
            text: FOOTER_TEXT.to_string(),
            font: Font::Helvetica,
            size: FOOTER_SIZE,
            color: FOOTER_COLOR,
            angle_deg: 0.0,
        }));

        let page_label = format!("Page {n} of {total}");
        let label_w = measure.measure(&page_label, Font::Helvetica, FOOTER_SIZE);
        page.commands.push(DrawCommand::Text(TextCommand {
            x: g.width - g.margin - label_w,
            y: baseline,
            text: page_label,
            font: Font::Helvetica,
            size: FOOTER_SIZE,
            color: FOOTER_COLOR,
            angle_deg: 0.0,
        }));
    }
}

/// Draw the captured TOC entries onto the reserved page with a dot leader
/// between the title and its 1-based page number.
fn stamp_toc_body(layout: &mut Layout, toc_page: usize, measure: &dyn Measure) {
    let g = layout.geometry;
    let Some(page) = layout.pages.get_mut(toc_page) else {
        return;
    };

    let mut y = g.margin + TOC_BODY_TOP_OFFSET;
    for (idx, entry) in layout.toc.iter().enumerate() {
        if y + TOC_ENTRY_STEP > g.limit_y() {
            log::warn!(
                "table of contents overflows its page; {} entries clipped",
                layout.toc.len() - idx
            );
            break;
        }
        let baseline = y + TOC_ENTRY_SIZE * ASCENT_FACTOR;
        let number = (entry.page_index + 1).to_string();
        let number_w = measure.measure(&number, Font::Helvetica, TOC_ENTRY_SIZE);
        let number_x = g.width - g.margin - number_w;

        page.commands.push(DrawCommand::Text(TextCommand {
            x: g.margin,
            y: baseline,
            text: entry.title.clone(),
            font: Font::Helvetica,
            size: TOC_ENTRY_SIZE,
            color: [0, 0, 0],
            angle_deg: 0.0,
        }));

        // dot leader between title and number, sized from real metrics
        let title_end =
            g.margin + measure.measure(&entry.title, Font::Helvetica, TOC_ENTRY_SIZE);
        let dot_w = measure.measure(".", Font::Helvetica, TOC_ENTRY_SIZE);
        let gap = number_x - 6.0 - (title_end + 6.0);
        if dot_w > 0.0 && gap > dot_w * 2.0 {
            let count = (gap / dot_w).floor() as usize;
            let dots: String = ".".repeat(count);
            page.commands.push(DrawCommand::Text(TextCommand {
                x: number_x - 6.0 - count as f32 * dot_w,
                y: baseline,
                text: dots,
                font: Font::Helvetica,
                size: TOC_ENTRY_SIZE,
                color: [130, 130, 130],
                angle_deg: 0.0,
            }));
        }

        page.commands.push(DrawCommand::Text(TextCommand {
            x: number_x,
            y: baseline,
            text: number,
            font: Font::Helvetica,
            size: TOC_ENTRY_SIZE,
            color: [0, 0, 0],
            angle_deg: 0.0,
        }));

        y += TOC_ENTRY_STEP;
    }
}
