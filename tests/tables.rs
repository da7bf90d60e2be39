mod common;

use caseledger_pdf::Font;
use caseledger_pdf::blocks::{Block, Column, TableSpec};
use caseledger_pdf::layout::table::{CELL_PAD_X, column_widths, layout_row};
use caseledger_pdf::layout::{PageGeometry, layout_document};
use caseledger_pdf::pdf::PdfSink;
use caseledger_pdf::sink::Measure;

use common::{pages_containing, texts};

#[test]
fn columns_split_evenly_without_hints() {
    let spec = TableSpec {
        columns: vec![Column::left("A"), Column::left("B"), Column::left("C")],
        rows: vec![],
    };
    let widths = column_widths(&spec, 300.0);
    assert_eq!(widths, vec![100.0, 100.0, 100.0]);
}

#[test]
fn width_hints_are_proportional() {
    let spec = TableSpec {
        columns: vec![
            Column::left("A").with_width(2.0),
            Column::left("B"),
            Column::left("C"),
        ],
        rows: vec![],
    };
    let widths = column_widths(&spec, 400.0);
    assert_eq!(widths, vec![200.0, 100.0, 100.0]);
    let total: f32 = widths.iter().sum();
    assert!((total - 400.0).abs() < 0.01);
}

#[test]
fn row_height_follows_tallest_cell() {
    let sink = PdfSink::new(PageGeometry::default());
    let widths = vec![80.0, 80.0];
    let short = layout_row(
        &["a".to_string(), "b".to_string()],
        &widths,
        Font::Helvetica,
        9.0,
        &sink,
    );
    let tall = layout_row(
        &[
            "a".to_string(),
            "a much longer cell value that needs to wrap onto several lines".to_string(),
        ],
        &widths,
        Font::Helvetica,
        9.0,
        &sink,
    );
    assert!(tall.height > short.height);
    let tallest_lines = tall.cell_lines.iter().map(Vec::len).max().unwrap();
    assert!(tallest_lines > 1);
}

// 50 rows at 12 rows per page must yield ceil(50/12) = 5 table pages, each
// beginning with a repeated header row.
#[test]
fn fifty_rows_paginate_as_five_pages_with_repeated_headers() {
    let geometry = PageGeometry {
        width: 612.0,
        height: 350.0,
        margin: 50.0,
        footer_reserve: 30.0,
    };
    let sink = PdfSink::new(geometry);

    let spec = TableSpec {
        columns: vec![
            Column::left("Alpha"),
            Column::left("Beta"),
            Column::left("Gamma"),
        ],
        rows: (0..50)
            .map(|i| vec![format!("row-{i:02}"), "x".into(), "y".into()])
            .collect(),
    };

    // single-line rows at this width: header and each row are the same height
    let widths = column_widths(&spec, geometry.content_width());
    let row_h = layout_row(
        &spec.rows[0],
        &widths,
        Font::Helvetica,
        9.0,
        &sink,
    )
    .height;
    let fits = ((geometry.capacity() - row_h) / row_h).floor() as usize;
    assert_eq!(fits, 12, "geometry no longer fits 12 rows under the header");

    let layout = layout_document(&[Block::DataTable(spec)], geometry, &sink);
    assert_eq!(layout.pages.len(), 50usize.div_ceil(12));

    for page in &layout.pages {
        let texts = texts(page);
        assert_eq!(texts[0].text, "Alpha", "page {} missing header", page.index);
        assert_eq!(texts[0].font, Font::HelveticaBold);
    }

    // rows appear in order, 12 per page
    for i in 0..50 {
        let marker = format!("row-{i:02}");
        let on = pages_containing(&layout.pages, &marker);
        assert_eq!(on, vec![i / 12], "row {i} landed on pages {on:?}");
    }
}

// A wrapped row's lines all stay on one page.
#[test]
fn multiline_rows_are_never_split_across_pages() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);

    let spec = TableSpec {
        columns: vec![
            Column::left("Entry"),
            Column::left("Detail").with_width(2.0),
        ],
        rows: (0..40)
            .map(|i| {
                let marker = format!("m{i:02}");
                vec![
                    std::iter::repeat_n(marker.clone(), 10)
                        .collect::<Vec<_>>()
                        .join(" "),
                    std::iter::repeat_n(marker, 14).collect::<Vec<_>>().join(" "),
                ]
            })
            .collect(),
    };

    let layout = layout_document(&[Block::DataTable(spec)], geometry, &sink);
    assert!(layout.pages.len() > 1, "expected the table to span pages");

    for i in 0..40 {
        let marker = format!("m{i:02}");
        let on = pages_containing(&layout.pages, &marker);
        assert_eq!(on.len(), 1, "row {i} split across pages {on:?}");
    }
}

#[test]
fn numeric_columns_right_align_to_the_column_edge() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);

    let spec = TableSpec {
        columns: vec![Column::left("Item"), Column::right("Amount")],
        rows: vec![vec!["Paving".into(), "$1,234.56".into()]],
    };
    let layout = layout_document(&[Block::DataTable(spec)], geometry, &sink);

    let page = &layout.pages[0];
    let amount = texts(page)
        .into_iter()
        .find(|t| t.text == "$1,234.56")
        .expect("amount cell");
    let right_edge = geometry.margin + geometry.content_width() - CELL_PAD_X;
    let reached = amount.x + sink.measure(&amount.text, amount.font, amount.size);
    assert!(
        (reached - right_edge).abs() < 0.1,
        "right-aligned cell ends at {reached}, expected {right_edge}"
    );
}
