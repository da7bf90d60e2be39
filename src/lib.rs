pub mod blocks;
pub mod builder;
mod error;
mod fonts;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod sink;
pub mod stamp;

pub use error::Error;
pub use fonts::Font;

use std::time::Instant;

use crate::blocks::Block;
use crate::layout::PageGeometry;
use crate::model::{CaseReport, FinancialReport, ReportRequest};
use crate::pdf::PdfSink;

pub fn render_financial_report(report: &FinancialReport) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    let blocks = builder::financial_blocks(report)?;
    let t_build = t0.elapsed();

    let bytes = render_blocks(&blocks)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: build={:.1}ms, layout+assembly={:.1}ms, total={:.1}ms (output {} bytes)",
        t_build.as_secs_f64() * 1000.0,
        (t_total - t_build).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}

pub fn render_case_report(report: &CaseReport) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    let blocks = builder::case_blocks(report)?;
    let t_build = t0.elapsed();

    let bytes = render_blocks(&blocks)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: build={:.1}ms, layout+assembly={:.1}ms, total={:.1}ms (output {} bytes)",
        t_build.as_secs_f64() * 1000.0,
        (t_total - t_build).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}

pub fn render_report(request: &ReportRequest) -> Result<Vec<u8>, Error> {
    match request {
        ReportRequest::Financial(report) => render_financial_report(report),
        ReportRequest::Case(report) => render_case_report(report),
    }
}

/// Lay out, stamp, and assemble a prepared block sequence.
///
/// Every generation call constructs its own engine and sink, so concurrent
/// calls share no mutable state.
pub fn render_blocks(blocks: &[Block]) -> Result<Vec<u8>, Error> {
    let geometry = PageGeometry::default();
    let mut sink = PdfSink::new(geometry);
    let mut layout = layout::layout_document(blocks, geometry, &sink);
    stamp::stamp_pages(&mut layout, &sink);
    pdf::assemble(&layout, &mut sink)
}
