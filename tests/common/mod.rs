#![allow(dead_code)]

use caseledger_pdf::model::{
    CaseEvent, CaseReport, Defendant, Expense, FinancialReport, Hearing, Milestone, Project,
};
use caseledger_pdf::sink::{DrawCommand, Page, TextCommand};

/// All text commands on a page, in emission order.
pub fn texts(page: &Page) -> Vec<&TextCommand> {
    page.commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            _ => None,
        })
        .collect()
}

pub fn page_contains(page: &Page, needle: &str) -> bool {
    texts(page).iter().any(|t| t.text.contains(needle))
}

/// Pages (by index) on which `needle` occurs in any text command.
pub fn pages_containing(pages: &[Page], needle: &str) -> Vec<usize> {
    pages
        .iter()
        .filter(|p| page_contains(p, needle))
        .map(|p| p.index)
        .collect()
}

/// A solid-color PNG of the given pixel size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 60, 120, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn milestone(title: &str, status: &str) -> Milestone {
    Milestone {
        title: title.into(),
        due: "2026-09-30".into(),
        status: status.into(),
        notes: String::new(),
    }
}

pub fn expense(date: &str, vendor: &str, amount: f64) -> Expense {
    Expense {
        date: date.into(),
        vendor: vendor.into(),
        description: "Progress payment".into(),
        amount,
    }
}

pub fn project(name: &str, code: &str) -> Project {
    Project {
        name: name.into(),
        code: code.into(),
        status: "Active".into(),
        budget: 250_000.0,
        committed: 180_000.0,
        spent: 96_500.25,
        description: "Resurfacing and drainage improvements along the corridor.".into(),
        milestones: vec![
            milestone("Design complete", "Done"),
            milestone("Construction start", "Pending"),
        ],
        expenses: vec![
            expense("2026-02-11", "Granite Paving LLC", 48_200.00),
            expense("2026-04-03", "Lakeside Engineering", 12_300.25),
        ],
    }
}

pub fn sample_financial_report() -> FinancialReport {
    FinancialReport {
        program_name: "Road and Bridge Program".into(),
        fiscal_year: "2026".into(),
        department: "Public Works".into(),
        prepared_by: "M. Okafor, Treasurer".into(),
        generated_on: "June 30, 2026".into(),
        watermark: None,
        logo_png: None,
        projects: vec![project("Main Street Resurfacing", "RB-101"), {
            let mut p = project("Cedar Creek Bridge Deck", "RB-204");
            p.budget = 610_000.0;
            p.spent = 75_000.0;
            p
        }],
    }
}

pub fn hearing(date: &str, kind: &str) -> Hearing {
    Hearing {
        date: date.into(),
        time: "09:30".into(),
        kind: kind.into(),
        location: "Courtroom 4".into(),
        outcome: "Continued".into(),
    }
}

pub fn case_event(date: &str, entry: &str) -> CaseEvent {
    CaseEvent {
        date: date.into(),
        entry: entry.into(),
        recorded_by: "Clerk A. Ruiz".into(),
    }
}

pub fn sample_case_report() -> CaseReport {
    CaseReport {
        case_number: "2026-CR-0142".into(),
        title: "State v. Hollings".into(),
        status: "Open".into(),
        opened_on: "2026-01-17".into(),
        lead_officer: "Det. P. Whitfield".into(),
        court: "District Court, Division 2".into(),
        generated_on: "June 30, 2026".into(),
        watermark: None,
        logo_png: None,
        synopsis: "Charges arising from a commercial burglary reported on Jan 15.".into(),
        defendants: vec![Defendant {
            name: "Jordan Hollings".into(),
            role: "Defendant".into(),
            status: "Released on bond".into(),
            counsel: "T. Nakamura".into(),
            hearings: vec![hearing("2026-02-02", "Arraignment"), hearing("2026-03-15", "Motions")],
            history: vec![
                case_event("2026-01-17", "Case opened and assigned."),
                case_event("2026-02-02", "Defendant arraigned; plea of not guilty entered."),
            ],
        }],
    }
}
