//! The paginated layout engine.
//!
//! A single forward pass walks the block sequence, maintains the [`Cursor`],
//! and records draw commands into append-only [`Page`]s. Every block type
//! goes through [`LayoutEngine::place`]; that is the only place a page-break
//! decision is made. Forward references (the table of contents) are captured
//! against live cursor state while headings are placed, never estimated.

pub mod table;

use crate::blocks::{Block, ParagraphStyle};
use crate::fonts::Font;
use crate::sink::{
    DrawCommand, EmbeddedImage, ImageCommand, LineCommand, Measure, Page, RectCommand, TextCommand,
};

/// Baseline-to-baseline distance as a multiple of font size.
pub(crate) const LINE_FACTOR: f32 = 1.2;
/// Distance from line top to baseline as a multiple of font size.
pub(crate) const ASCENT_FACTOR: f32 = 0.75;

const RULE_GAP: f32 = 5.0;
const IMAGE_GAP: f32 = 8.0;
const KV_FONT_SIZE: f32 = 10.0;
const KV_PAD_V: f32 = 3.0;
const KV_LABEL_SHARE: f32 = 0.32;

pub(crate) const TOC_TITLE: &str = "Table of Contents";
/// Vertical offset from the top margin at which the stamped TOC body starts
/// (clears the heading drawn when the TOC page is reserved).
pub(crate) const TOC_BODY_TOP_OFFSET: f32 = 40.0;

/// Fixed page geometry for one generation call. US Letter by default.
#[derive(Clone, Copy, Debug)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    /// Space above the bottom margin reserved for the stamped footer.
    pub footer_reserve: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            width: 612.0,
            height: 792.0,
            margin: 54.0,
            footer_reserve: 36.0,
        }
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y content may reach before the footer zone begins.
    pub fn limit_y(&self) -> f32 {
        self.height - self.margin - self.footer_reserve
    }

    /// Usable height of a completely empty page.
    pub fn capacity(&self) -> f32 {
        self.limit_y() - self.margin
    }
}

/// Per-invocation layout position. Never shared across generations.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    pub page_index: usize,
    /// Top-down offset of the next free position on the current page.
    pub y: f32,
    pub geometry: PageGeometry,
}

/// A heading and the finished page it actually landed on.
#[derive(Clone, Debug, PartialEq)]
pub struct TocEntry {
    pub title: String,
    pub page_index: usize,
}

/// Result of the content pass, input to the stamp pass.
pub struct Layout {
    pub pages: Vec<Page>,
    pub toc: Vec<TocEntry>,
    pub watermark: Option<String>,
    /// Page reserved for the table of contents body, if any.
    pub toc_page: Option<usize>,
    pub geometry: PageGeometry,
}

pub struct LayoutEngine<'a> {
    measure: &'a dyn Measure,
    cursor: Cursor,
    pages: Vec<Page>,
    toc: Vec<TocEntry>,
    watermark: Option<String>,
    toc_page: Option<usize>,
}

/// Greedy word-wrap shared by paragraphs and table cells.
///
/// Tokens are whitespace-delimited; a token is appended to the current line
/// while the joined line still measures within `max_width`. A single token
/// wider than `max_width` is placed alone on its own line, never truncated.
pub fn wrap_text(
    measure: &dyn Measure,
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }
        let candidate = format!("{current} {token}");
        if measure.measure(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lay out a full block sequence into finished pages.
pub fn layout_document(
    blocks: &[Block],
    geometry: PageGeometry,
    measure: &dyn Measure,
) -> Layout {
    let mut engine = LayoutEngine::new(geometry, measure);
    for block in blocks {
        engine.place(block);
    }
    engine.finish()
}

fn heading_metrics(level: u8) -> (f32, f32, f32) {
    // (font size, gap before, gap after)
    match level {
        0 | 1 => (16.0, 14.0, 6.0),
        2 => (13.0, 12.0, 5.0),
        _ => (11.0, 10.0, 4.0),
    }
}

impl<'a> LayoutEngine<'a> {
    pub fn new(geometry: PageGeometry, measure: &'a dyn Measure) -> Self {
        LayoutEngine {
            measure,
            cursor: Cursor {
                page_index: 0,
                y: geometry.margin,
                geometry,
            },
            pages: vec![Page::new(0)],
            toc: Vec::new(),
            watermark: None,
            toc_page: None,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The single pagination entry point. Every block type is placed here.
    pub fn place(&mut self, block: &Block) {
        match block {
            Block::Heading { level, text } => self.place_heading(*level, text),
            Block::Paragraph { text, style } => self.place_paragraph(text, *style),
            Block::KeyValueTable { rows } => self.place_key_values(rows),
            Block::DataTable(spec) => table::place_table(self, spec),
            Block::Spacer { height } => self.place_spacer(*height),
            Block::PageBreak => {
                if !self.at_page_top() {
                    self.break_page();
                }
            }
            Block::Toc => self.place_toc_marker(),
            Block::Watermark { text } => self.watermark = Some(text.clone()),
            Block::Image {
                bytes,
                width,
                height,
            } => self.place_image(bytes, *width, *height),
        }
    }

    pub fn finish(self) -> Layout {
        log::debug!(
            "layout finished: {} pages, {} toc entries",
            self.pages.len(),
            self.toc.len()
        );
        Layout {
            pages: self.pages,
            toc: self.toc,
            watermark: self.watermark,
            toc_page: self.toc_page,
            geometry: self.cursor.geometry,
        }
    }

    fn at_page_top(&self) -> bool {
        (self.cursor.y - self.cursor.geometry.margin).abs() < 0.5
    }

    fn break_page(&mut self) {
        self.cursor.page_index += 1;
        self.cursor.y = self.cursor.geometry.margin;
        self.pages.push(Page::new(self.cursor.page_index));
    }

    fn push(&mut self, cmd: DrawCommand) {
        // pages is never empty and cursor.page_index always names the last
        self.pages
            .last_mut()
            .expect("current page")
            .commands
            .push(cmd);
    }

    /// Make room for `height` points, breaking the page when needed.
    ///
    /// Returns false when the block cannot fit even on an empty page; the
    /// cursor is then at the top of a fresh page and the caller may emit
    /// past the limit (the overflow is clipped visually, not torn).
    fn ensure_room(&mut self, height: f32) -> bool {
        let g = self.cursor.geometry;
        if height > g.capacity() {
            if !self.at_page_top() {
                self.break_page();
            }
            log::warn!(
                "block height {:.1}pt exceeds usable page height {:.1}pt; placing with overflow",
                height,
                g.capacity()
            );
            return false;
        }
        if self.cursor.y + height > g.limit_y() && !self.at_page_top() {
            self.break_page();
        }
        true
    }

    /// Emit wrapped lines at the cursor and advance past them.
    fn emit_lines(
        &mut self,
        lines: &[String],
        font: Font,
        size: f32,
        centered: bool,
        color: [u8; 3],
    ) {
        let g = self.cursor.geometry;
        let lh = size * LINE_FACTOR;
        for line in lines {
            let x = if centered {
                g.margin + (g.content_width() - self.measure.measure(line, font, size)) / 2.0
            } else {
                g.margin
            };
            let baseline = self.cursor.y + size * ASCENT_FACTOR;
            self.push(DrawCommand::Text(TextCommand {
                x,
                y: baseline,
                text: line.clone(),
                font,
                size,
                color,
                angle_deg: 0.0,
            }));
            self.cursor.y += lh;
        }
    }

    fn emit_heading_text(&mut self, text: &str, size: f32, rule: bool) {
        let g = self.cursor.geometry;
        let lines = wrap_text(self.measure, text, Font::HelveticaBold, size, g.content_width());
        self.emit_lines(&lines, Font::HelveticaBold, size, false, [0, 0, 0]);
        if rule {
            let y = self.cursor.y + 1.0;
            self.push(DrawCommand::Line(LineCommand {
                x1: g.margin,
                y1: y,
                x2: g.width - g.margin,
                y2: y,
                width: 1.0,
                color: [60, 60, 60],
            }));
            self.cursor.y += RULE_GAP;
        }
    }

    fn place_heading(&mut self, level: u8, text: &str) {
        let g = self.cursor.geometry;
        let (size, gap_before, gap_after) = heading_metrics(level);
        let lines = wrap_text(self.measure, text, Font::HelveticaBold, size, g.content_width());
        let rule = level <= 1;
        let body_h =
            lines.len() as f32 * size * LINE_FACTOR + if rule { RULE_GAP } else { 0.0 };
        self.ensure_room(gap_before + body_h + gap_after);
        if !self.at_page_top() {
            self.cursor.y += gap_before;
        }
        // captured against the live cursor, after any page break above
        self.toc.push(TocEntry {
            title: text.to_string(),
            page_index: self.cursor.page_index,
        });
        self.emit_heading_text(text, size, rule);
        self.cursor.y += gap_after;
    }

    fn place_paragraph(&mut self, text: &str, style: ParagraphStyle) {
        let g = self.cursor.geometry;
        let font = style.font();
        let size = style.size();
        let lines = wrap_text(self.measure, text, font, size, g.content_width());
        if lines.is_empty() {
            return;
        }
        let body_h = lines.len() as f32 * size * LINE_FACTOR;
        let fits = self.ensure_room(body_h + style.gap_after());
        self.emit_lines(&lines, font, size, style.centered(), style.color());
        if fits {
            self.cursor.y += style.gap_after();
        }
        // on overflow the cursor is already past the limit, so the next
        // block naturally opens a fresh page
    }

    fn place_key_values(&mut self, rows: &[(String, String)]) {
        if rows.is_empty() {
            return;
        }
        let g = self.cursor.geometry;
        let label_w = g.content_width() * KV_LABEL_SHARE;
        let value_w = g.content_width() - label_w;
        let lh = KV_FONT_SIZE * LINE_FACTOR;

        struct KvRow {
            label_lines: Vec<String>,
            value_lines: Vec<String>,
            height: f32,
        }

        let laid_out: Vec<KvRow> = rows
            .iter()
            .map(|(label, value)| {
                let label_lines = wrap_text(
                    self.measure,
                    label,
                    Font::HelveticaBold,
                    KV_FONT_SIZE,
                    label_w - 6.0,
                );
                let value_lines =
                    wrap_text(self.measure, value, Font::Helvetica, KV_FONT_SIZE, value_w - 6.0);
                let line_count = label_lines.len().max(value_lines.len()).max(1);
                KvRow {
                    label_lines,
                    value_lines,
                    height: line_count as f32 * lh + 2.0 * KV_PAD_V,
                }
            })
            .collect();

        let total: f32 = laid_out.iter().map(|r| r.height).sum();
        let fits = self.ensure_room(total + 6.0);

        for row in &laid_out {
            let row_top = self.cursor.y;
            for (i, line) in row.label_lines.iter().enumerate() {
                self.push(DrawCommand::Text(TextCommand {
                    x: g.margin,
                    y: row_top + KV_PAD_V + i as f32 * lh + KV_FONT_SIZE * ASCENT_FACTOR,
                    text: line.clone(),
                    font: Font::HelveticaBold,
                    size: KV_FONT_SIZE,
                    color: [0, 0, 0],
                    angle_deg: 0.0,
                }));
            }
            for (i, line) in row.value_lines.iter().enumerate() {
                self.push(DrawCommand::Text(TextCommand {
                    x: g.margin + label_w,
                    y: row_top + KV_PAD_V + i as f32 * lh + KV_FONT_SIZE * ASCENT_FACTOR,
                    text: line.clone(),
                    font: Font::Helvetica,
                    size: KV_FONT_SIZE,
                    color: [0, 0, 0],
                    angle_deg: 0.0,
                }));
            }
            self.cursor.y = row_top + row.height;
            self.push(DrawCommand::Line(LineCommand {
                x1: g.margin,
                y1: self.cursor.y,
                x2: g.width - g.margin,
                y2: self.cursor.y,
                width: 0.4,
                color: [210, 210, 210],
            }));
        }

        if fits {
            self.cursor.y += 6.0;
        }
    }

    fn place_spacer(&mut self, height: f32) {
        let g = self.cursor.geometry;
        if self.cursor.y + height > g.limit_y() {
            // a spacer never carries over; it collapses at the page top
            if !self.at_page_top() {
                self.break_page();
            }
        } else {
            self.cursor.y += height;
        }
    }

    fn place_toc_marker(&mut self) {
        if self.toc_page.is_some() {
            log::warn!("duplicate table-of-contents block ignored");
            return;
        }
        if !self.at_page_top() {
            self.break_page();
        }
        self.toc_page = Some(self.cursor.page_index);
        self.emit_heading_text(TOC_TITLE, 16.0, true);
        // rest of the page is reserved; entries are stamped after the
        // content pass when real page numbers exist
        self.break_page();
    }

    fn place_image(&mut self, bytes: &[u8], width: f32, height: f32) {
        let g = self.cursor.geometry;
        let cw = g.content_width();
        match EmbeddedImage::decode_png(bytes) {
            Ok(image) => {
                let scale = if width > cw { cw / width } else { 1.0 };
                let (w, h) = (width * scale, height * scale);
                let fits = self.ensure_room(h + IMAGE_GAP);
                let x = g.margin + (cw - w) / 2.0;
                self.push(DrawCommand::Image(ImageCommand {
                    x,
                    y: self.cursor.y,
                    width: w,
                    height: h,
                    image,
                }));
                // when taller than the page the cursor moves past the
                // limit, which keeps the image alone on this page
                self.cursor.y += h;
                if fits {
                    self.cursor.y += IMAGE_GAP;
                }
            }
            Err(e) => {
                log::warn!("image decode failed ({e}); substituting blank placeholder");
                let h = height.min(g.capacity() - IMAGE_GAP).max(24.0);
                let w = width.min(cw);
                self.ensure_room(h + IMAGE_GAP);
                let x = g.margin + (cw - w) / 2.0;
                self.push(DrawCommand::Rect(RectCommand {
                    x,
                    y: self.cursor.y,
                    width: w,
                    height: h,
                    fill: [235, 235, 235],
                }));
                self.cursor.y += h + IMAGE_GAP;
            }
        }
    }
}
