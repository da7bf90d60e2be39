//! The flat content model the layout engine consumes.
//!
//! Builders turn a domain report into an ordered `Vec<Block>`; blocks are
//! immutable once built and carry no layout state of their own.

use crate::fonts::Font;

#[derive(Clone, Debug)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        style: ParagraphStyle,
    },
    /// Two-column label/value table (report metadata, per-entity details).
    KeyValueTable {
        rows: Vec<(String, String)>,
    },
    DataTable(TableSpec),
    Spacer {
        height: f32,
    },
    /// Forces a new page regardless of remaining space.
    PageBreak,
    /// Reserves a page for the table of contents. The entry list is drawn
    /// during the stamp pass, once real page numbers exist.
    Toc,
    /// Sets the watermark text stamped across every content page. Occupies
    /// no vertical space.
    Watermark {
        text: String,
    },
    /// A raster image (PNG). `width`/`height` are the requested display
    /// size in points; the engine scales down to fit the content width.
    Image {
        bytes: Vec<u8>,
        width: f32,
        height: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParagraphStyle {
    /// Cover page title.
    Title,
    /// Cover page subtitle.
    Subtitle,
    Body,
    /// Fine print (cover footer lines, annotations).
    Small,
    /// Centered oblique gray text (empty-state messages).
    Muted,
}

impl ParagraphStyle {
    pub(crate) fn font(self) -> Font {
        match self {
            ParagraphStyle::Title => Font::HelveticaBold,
            ParagraphStyle::Subtitle | ParagraphStyle::Body | ParagraphStyle::Small => {
                Font::Helvetica
            }
            ParagraphStyle::Muted => Font::HelveticaOblique,
        }
    }

    pub(crate) fn size(self) -> f32 {
        match self {
            ParagraphStyle::Title => 22.0,
            ParagraphStyle::Subtitle => 13.0,
            ParagraphStyle::Body | ParagraphStyle::Muted => 10.0,
            ParagraphStyle::Small => 8.5,
        }
    }

    pub(crate) fn centered(self) -> bool {
        matches!(
            self,
            ParagraphStyle::Title | ParagraphStyle::Subtitle | ParagraphStyle::Muted
        )
    }

    pub(crate) fn color(self) -> [u8; 3] {
        match self {
            ParagraphStyle::Small | ParagraphStyle::Muted => [90, 90, 90],
            _ => [0, 0, 0],
        }
    }

    /// Vertical gap left below the paragraph.
    pub(crate) fn gap_after(self) -> f32 {
        match self {
            ParagraphStyle::Title | ParagraphStyle::Subtitle => 4.0,
            ParagraphStyle::Body | ParagraphStyle::Muted => 6.0,
            ParagraphStyle::Small => 3.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnAlign {
    Left,
    /// Numeric/currency columns.
    Right,
}

#[derive(Clone, Debug)]
pub struct Column {
    pub header: String,
    pub align: ColumnAlign,
    /// Proportional width hint. Columns without hints share width evenly;
    /// when any hint is present, missing hints count as 1.0.
    pub width: Option<f32>,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Column {
        Column {
            header: header.into(),
            align: ColumnAlign::Left,
            width: None,
        }
    }

    pub fn right(header: impl Into<String>) -> Column {
        Column {
            header: header.into(),
            align: ColumnAlign::Right,
            width: None,
        }
    }

    pub fn with_width(mut self, hint: f32) -> Column {
        self.width = Some(hint);
        self
    }
}

#[derive(Clone, Debug)]
pub struct TableSpec {
    pub columns: Vec<Column>,
    /// Cell text per row. Rows shorter than the column list render empty
    /// trailing cells.
    pub rows: Vec<Vec<String>>,
}
