mod common;

use caseledger_pdf::model::ReportRequest;
use caseledger_pdf::{Error, render_case_report, render_financial_report, render_report};

use common::{png_bytes, sample_case_report, sample_financial_report};

#[test]
fn financial_report_renders_to_a_pdf() {
    let bytes = render_financial_report(&sample_financial_report()).expect("render");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
}

#[test]
fn case_report_renders_to_a_pdf() {
    let bytes = render_case_report(&sample_case_report()).expect("render");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn report_with_logo_and_watermark_renders() {
    let mut report = sample_financial_report();
    report.logo_png = Some(png_bytes(64, 64));
    report.watermark = Some("UNAUDITED".into());
    let bytes = render_financial_report(&report).expect("render");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn validation_failures_surface_before_any_layout() {
    let mut report = sample_financial_report();
    report.fiscal_year = String::new();
    match render_financial_report(&report) {
        Err(Error::Validation(msg)) => assert!(msg.contains("fiscal_year")),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn rendering_is_byte_for_byte_deterministic() {
    let report = sample_case_report();
    let a = render_case_report(&report).expect("render");
    let b = render_case_report(&report).expect("render");
    assert_eq!(a, b);
}

#[test]
fn request_dispatch_matches_direct_calls() {
    let request = ReportRequest::Financial(sample_financial_report());
    let via_request = render_report(&request).expect("render");
    let direct = render_financial_report(&sample_financial_report()).expect("render");
    assert_eq!(via_request, direct);
}
