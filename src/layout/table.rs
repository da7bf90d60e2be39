//! Table layout: column sizing, cell wrapping, row heights, and row-level
//! pagination with header re-emission.
//!
//! A row is the atomic pagination unit. When a row does not fit in the
//! remaining vertical space, the page is closed, the header row is drawn
//! again at the top of the next page, and the row is placed there. Row
//! content is never split across two pages.

use crate::blocks::{ColumnAlign, TableSpec};
use crate::fonts::Font;
use crate::sink::{DrawCommand, LineCommand, Measure, RectCommand, TextCommand};

use super::{ASCENT_FACTOR, LINE_FACTOR, LayoutEngine, wrap_text};

pub(crate) const HEADER_SIZE: f32 = 9.0;
pub(crate) const BODY_SIZE: f32 = 9.0;
pub const CELL_PAD_X: f32 = 4.0;
pub const CELL_PAD_Y: f32 = 3.0;
const TABLE_GAP_AFTER: f32 = 8.0;

/// Resolve column widths for the available table width.
///
/// Width splits evenly unless proportional hints are supplied; with hints,
/// columns without one count as 1.0.
pub fn column_widths(spec: &TableSpec, available: f32) -> Vec<f32> {
    let n = spec.columns.len();
    if n == 0 {
        return Vec::new();
    }
    if spec.columns.iter().all(|c| c.width.is_none()) {
        return vec![available / n as f32; n];
    }
    let hints: Vec<f32> = spec
        .columns
        .iter()
        .map(|c| c.width.unwrap_or(1.0).max(0.05))
        .collect();
    let total: f32 = hints.iter().sum();
    hints.iter().map(|h| h / total * available).collect()
}

/// One row's wrapped cell text and resulting height.
pub struct RowLayout {
    pub height: f32,
    pub cell_lines: Vec<Vec<String>>,
}

/// Wrap every cell of a row against its column width and derive the row
/// height from the tallest cell.
pub fn layout_row(
    cells: &[String],
    widths: &[f32],
    font: Font,
    size: f32,
    measure: &dyn Measure,
) -> RowLayout {
    let lh = size * LINE_FACTOR;
    let mut max_lines = 1usize;
    let cell_lines: Vec<Vec<String>> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            let lines = wrap_text(measure, text, font, size, (w - 2.0 * CELL_PAD_X).max(1.0));
            max_lines = max_lines.max(lines.len());
            lines
        })
        .collect();
    RowLayout {
        height: max_lines as f32 * lh + 2.0 * CELL_PAD_Y,
        cell_lines,
    }
}

pub(crate) fn place_table(engine: &mut LayoutEngine, spec: &TableSpec) {
    if spec.columns.is_empty() {
        return;
    }
    let g = engine.cursor.geometry;
    let widths = column_widths(spec, g.content_width());
    let headers: Vec<String> = spec.columns.iter().map(|c| c.header.clone()).collect();
    let header = layout_row(
        &headers,
        &widths,
        Font::HelveticaBold,
        HEADER_SIZE,
        engine.measure,
    );
    let rows: Vec<RowLayout> = spec
        .rows
        .iter()
        .map(|r| layout_row(r, &widths, Font::Helvetica, BODY_SIZE, engine.measure))
        .collect();

    // keep the header attached to the first row
    let first_h = rows.first().map(|r| r.height).unwrap_or(0.0);
    engine.ensure_room(header.height + first_h);
    emit_header(engine, spec, &widths, &header);
    let mut under_fresh_header = true;

    for (row_idx, row) in rows.iter().enumerate() {
        log::debug!(
            "table row={} height={:.1} page={} y={:.1}",
            row_idx,
            row.height,
            engine.cursor.page_index,
            engine.cursor.y
        );
        if engine.cursor.y + row.height > g.limit_y() {
            if !under_fresh_header {
                engine.break_page();
                emit_header(engine, spec, &widths, &header);
            }
            if engine.cursor.y + row.height > g.limit_y() {
                log::warn!(
                    "table row {} taller than a full page; overflow clipped",
                    row_idx
                );
            }
        }
        emit_row(engine, spec, &widths, row);
        under_fresh_header = false;
    }

    if engine.cursor.y + TABLE_GAP_AFTER <= g.limit_y() {
        engine.cursor.y += TABLE_GAP_AFTER;
    }
}

fn cell_x(align: ColumnAlign, col_x: f32, col_w: f32, line_w: f32) -> f32 {
    match align {
        ColumnAlign::Left => col_x + CELL_PAD_X,
        ColumnAlign::Right => col_x + col_w - CELL_PAD_X - line_w,
    }
}

fn emit_header(engine: &mut LayoutEngine, spec: &TableSpec, widths: &[f32], header: &RowLayout) {
    let g = engine.cursor.geometry;
    let table_w: f32 = widths.iter().sum();
    let top = engine.cursor.y;

    engine.push(DrawCommand::Rect(RectCommand {
        x: g.margin,
        y: top,
        width: table_w,
        height: header.height,
        fill: [230, 230, 230],
    }));

    let mut col_x = g.margin;
    for ((column, lines), &col_w) in spec.columns.iter().zip(&header.cell_lines).zip(widths) {
        for (i, line) in lines.iter().enumerate() {
            let line_w = engine
                .measure
                .measure(line, Font::HelveticaBold, HEADER_SIZE);
            engine.push(DrawCommand::Text(TextCommand {
                x: cell_x(column.align, col_x, col_w, line_w),
                y: top + CELL_PAD_Y + i as f32 * HEADER_SIZE * LINE_FACTOR
                    + HEADER_SIZE * ASCENT_FACTOR,
                text: line.clone(),
                font: Font::HelveticaBold,
                size: HEADER_SIZE,
                color: [0, 0, 0],
                angle_deg: 0.0,
            }));
        }
        col_x += col_w;
    }

    let bottom = top + header.height;
    engine.push(DrawCommand::Line(LineCommand {
        x1: g.margin,
        y1: bottom,
        x2: g.margin + table_w,
        y2: bottom,
        width: 0.8,
        color: [60, 60, 60],
    }));
    engine.cursor.y = bottom;
}

fn emit_row(engine: &mut LayoutEngine, spec: &TableSpec, widths: &[f32], row: &RowLayout) {
    let g = engine.cursor.geometry;
    let table_w: f32 = widths.iter().sum();
    let top = engine.cursor.y;

    let mut col_x = g.margin;
    for ((column, lines), &col_w) in spec.columns.iter().zip(&row.cell_lines).zip(widths) {
        for (i, line) in lines.iter().enumerate() {
            let line_w = engine.measure.measure(line, Font::Helvetica, BODY_SIZE);
            engine.push(DrawCommand::Text(TextCommand {
                x: cell_x(column.align, col_x, col_w, line_w),
                y: top + CELL_PAD_Y + i as f32 * BODY_SIZE * LINE_FACTOR
                    + BODY_SIZE * ASCENT_FACTOR,
                text: line.clone(),
                font: Font::Helvetica,
                size: BODY_SIZE,
                color: [0, 0, 0],
                angle_deg: 0.0,
            }));
        }
        col_x += col_w;
    }

    let bottom = top + row.height;
    engine.push(DrawCommand::Line(LineCommand {
        x1: g.margin,
        y1: bottom,
        x2: g.margin + table_w,
        y2: bottom,
        width: 0.4,
        color: [210, 210, 210],
    }));
    engine.cursor.y = bottom;
}
