mod common;

use caseledger_pdf::blocks::{Block, ParagraphStyle};
use caseledger_pdf::builder::financial_blocks;
use caseledger_pdf::layout::{PageGeometry, layout_document};
use caseledger_pdf::model::FinancialReport;
use caseledger_pdf::pdf::PdfSink;
use caseledger_pdf::sink::DrawCommand;

use common::{page_contains, png_bytes, sample_financial_report};

fn body(text: &str) -> Block {
    Block::Paragraph {
        text: text.into(),
        style: ParagraphStyle::Body,
    }
}

fn filler(n: usize) -> Vec<Block> {
    (0..n)
        .map(|i| {
            body(&format!(
                "Filler paragraph {i}: the quick brown fox jumps over the lazy dog, \
                 then circles back to jump again in case the first pass was missed."
            ))
        })
        .collect()
}

#[test]
fn page_indices_are_contiguous_from_zero() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);
    let layout = layout_document(&filler(120), geometry, &sink);

    assert!(layout.pages.len() > 2);
    for (i, page) in layout.pages.iter().enumerate() {
        assert_eq!(page.index, i);
    }
    for entry in &layout.toc {
        assert!(entry.page_index < layout.pages.len());
    }
}

#[test]
fn forced_page_break_always_starts_a_new_page() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);

    let blocks = vec![body("first"), Block::PageBreak, body("second")];
    let layout = layout_document(&blocks, geometry, &sink);
    assert_eq!(layout.pages.len(), 2);
    assert!(page_contains(&layout.pages[0], "first"));
    assert!(page_contains(&layout.pages[1], "second"));

    // a break with plenty of room left still breaks
    let tiny = vec![body("a"), Block::PageBreak, body("b"), Block::PageBreak, body("c")];
    let layout = layout_document(&tiny, geometry, &sink);
    assert_eq!(layout.pages.len(), 3);
}

#[test]
fn toc_entries_record_the_live_page_of_each_heading() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);

    let mut blocks = vec![body("cover line"), Block::PageBreak, Block::Toc];
    blocks.push(Block::Heading {
        level: 1,
        text: "Section One".into(),
    });
    blocks.extend(filler(40));
    blocks.push(Block::Heading {
        level: 1,
        text: "Section Two".into(),
    });
    blocks.extend(filler(40));
    blocks.push(Block::Heading {
        level: 2,
        text: "Appendix Alpha".into(),
    });

    let layout = layout_document(&blocks, geometry, &sink);

    assert_eq!(layout.toc_page, Some(1));
    assert_eq!(layout.toc.len(), 3);
    for entry in &layout.toc {
        assert!(
            page_contains(&layout.pages[entry.page_index], &entry.title),
            "toc says {:?} is on page {}, but it is not",
            entry.title,
            entry.page_index
        );
    }
    // sections span pages, so the later entries sit on later pages
    assert!(layout.toc[0].page_index < layout.toc[1].page_index);
    assert!(layout.toc[1].page_index <= layout.toc[2].page_index);
}

// A report with zero child entities: cover page plus exactly one content
// page carrying the empty-state message, and no table-of-contents page.
#[test]
fn empty_report_is_cover_plus_one_content_page() {
    let report = FinancialReport {
        projects: Vec::new(),
        ..sample_financial_report()
    };
    let blocks = financial_blocks(&report).expect("valid report");

    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);
    let layout = layout_document(&blocks, geometry, &sink);

    assert_eq!(layout.pages.len(), 2);
    assert_eq!(layout.toc_page, None);
    assert!(page_contains(
        &layout.pages[1],
        "No projects have been recorded"
    ));
    // no table header fill anywhere: no DataTable was emitted
    let any_header_fill = layout.pages.iter().any(|p| {
        p.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Rect(r) if r.fill == [230, 230, 230]))
    });
    assert!(!any_header_fill);
}

// An image taller than a page is placed alone on its own page; generation
// completes instead of erroring.
#[test]
fn oversized_image_gets_its_own_page_without_failing() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);

    let blocks = vec![
        body("before"),
        Block::Image {
            bytes: png_bytes(40, 40),
            width: 200.0,
            height: 1600.0,
        },
        body("after"),
    ];
    let layout = layout_document(&blocks, geometry, &sink);

    assert_eq!(layout.pages.len(), 3);
    let image_pages: Vec<usize> = layout
        .pages
        .iter()
        .filter(|p| {
            p.commands
                .iter()
                .any(|c| matches!(c, DrawCommand::Image(_)))
        })
        .map(|p| p.index)
        .collect();
    assert_eq!(image_pages, vec![1]);
    // nothing else shares the image's page
    assert!(common::texts(&layout.pages[1]).is_empty());
    assert!(page_contains(&layout.pages[2], "after"));
}

#[test]
fn undecodable_image_degrades_to_a_placeholder() {
    let geometry = PageGeometry::default();
    let sink = PdfSink::new(geometry);

    let blocks = vec![
        Block::Image {
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
            width: 120.0,
            height: 80.0,
        },
        body("still here"),
    ];
    let layout = layout_document(&blocks, geometry, &sink);

    assert_eq!(layout.pages.len(), 1);
    let placeholders = layout.pages[0]
        .commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Rect(r) if r.fill == [235, 235, 235]))
        .count();
    assert_eq!(placeholders, 1);
    assert!(page_contains(&layout.pages[0], "still here"));
}

#[test]
fn concurrent_generations_are_independent_and_deterministic() {
    let report = sample_financial_report();
    let reference = caseledger_pdf::render_financial_report(&report).expect("render");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let report = report.clone();
            std::thread::spawn(move || caseledger_pdf::render_financial_report(&report))
        })
        .collect();
    for handle in handles {
        let bytes = handle.join().expect("thread").expect("render");
        assert_eq!(bytes, reference);
    }
}
