//! Builders that turn domain reports into the flat block sequence.
//!
//! Pure transforms: no layout math happens here, and the output order is
//! exactly the rendered order (cover, metadata, summary, then one section
//! per child entity). Sub-tables backed by empty collections are omitted
//! entirely rather than rendered empty.

use crate::blocks::{Block, Column, ParagraphStyle, TableSpec};
use crate::error::Error;
use crate::model::{CaseReport, Defendant, FinancialReport, Project, ReportRequest};

const EMPTY_PROJECTS: &str = "No projects have been recorded for this reporting period.";
const EMPTY_DEFENDANTS: &str = "No defendants are associated with this case.";

/// Build the block sequence for an AIP financial report.
pub fn financial_blocks(report: &FinancialReport) -> Result<Vec<Block>, Error> {
    if report.program_name.trim().is_empty() {
        return Err(Error::Validation("program_name is required".into()));
    }
    if report.fiscal_year.trim().is_empty() {
        return Err(Error::Validation("fiscal_year is required".into()));
    }

    let mut blocks = Vec::new();
    if let Some(text) = &report.watermark {
        blocks.push(Block::Watermark { text: text.clone() });
    }

    push_cover(
        &mut blocks,
        &report.program_name,
        &format!("Annual Improvement Program, Fiscal Year {}", report.fiscal_year),
        report.logo_png.as_deref(),
        &cover_lines(&[
            ("Prepared by", &report.prepared_by),
            ("Department", &report.department),
            ("Generated", &report.generated_on),
        ]),
    );

    if !report.projects.is_empty() {
        blocks.push(Block::Toc);
    }

    blocks.push(Block::Heading {
        level: 1,
        text: "Program Overview".into(),
    });

    let total_budget: f64 = report.projects.iter().map(|p| p.budget).sum();
    let total_spent: f64 = report.projects.iter().map(|p| p.spent).sum();
    let mut overview = vec![
        ("Program".to_string(), report.program_name.clone()),
        ("Fiscal year".to_string(), report.fiscal_year.clone()),
    ];
    if !report.department.is_empty() {
        overview.push(("Department".to_string(), report.department.clone()));
    }
    if !report.prepared_by.is_empty() {
        overview.push(("Prepared by".to_string(), report.prepared_by.clone()));
    }
    overview.push(("Projects".to_string(), report.projects.len().to_string()));
    overview.push(("Total budget".to_string(), format_currency(total_budget)));
    overview.push(("Total spent".to_string(), format_currency(total_spent)));
    overview.push((
        "Available balance".to_string(),
        format_currency(total_budget - total_spent),
    ));
    blocks.push(Block::KeyValueTable { rows: overview });

    if report.projects.is_empty() {
        blocks.push(Block::Paragraph {
            text: EMPTY_PROJECTS.into(),
            style: ParagraphStyle::Muted,
        });
        return Ok(blocks);
    }

    blocks.push(Block::Heading {
        level: 1,
        text: "Budget Summary".into(),
    });
    blocks.push(Block::DataTable(TableSpec {
        columns: vec![
            Column::left("Project").with_width(2.0),
            Column::left("Code"),
            Column::left("Status"),
            Column::right("Budget"),
            Column::right("Spent"),
            Column::right("Balance"),
        ],
        rows: report
            .projects
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.code.clone(),
                    p.status.clone(),
                    format_currency(p.budget),
                    format_currency(p.spent),
                    format_currency(p.balance()),
                ]
            })
            .collect(),
    }));

    for project in &report.projects {
        project_section(&mut blocks, project);
    }

    Ok(blocks)
}

fn project_section(blocks: &mut Vec<Block>, project: &Project) {
    let title = if project.code.is_empty() {
        project.name.clone()
    } else {
        format!("{} ({})", project.name, project.code)
    };
    blocks.push(Block::Heading {
        level: 2,
        text: title,
    });

    let mut details = vec![("Status".to_string(), project.status.clone())];
    details.push(("Budget".to_string(), format_currency(project.budget)));
    details.push(("Committed".to_string(), format_currency(project.committed)));
    details.push(("Spent".to_string(), format_currency(project.spent)));
    details.push(("Balance".to_string(), format_currency(project.balance())));
    blocks.push(Block::KeyValueTable { rows: details });

    if !project.description.is_empty() {
        blocks.push(Block::Paragraph {
            text: project.description.clone(),
            style: ParagraphStyle::Body,
        });
    }

    if !project.milestones.is_empty() {
        blocks.push(Block::Heading {
            level: 3,
            text: "Milestones".into(),
        });
        blocks.push(Block::DataTable(TableSpec {
            columns: vec![
                Column::left("Milestone").with_width(2.0),
                Column::left("Due"),
                Column::left("Status"),
                Column::left("Notes").with_width(2.0),
            ],
            rows: project
                .milestones
                .iter()
                .map(|m| {
                    vec![
                        m.title.clone(),
                        m.due.clone(),
                        m.status.clone(),
                        m.notes.clone(),
                    ]
                })
                .collect(),
        }));
    }

    if !project.expenses.is_empty() {
        let total: f64 = project.expenses.iter().map(|e| e.amount).sum();
        let mut rows: Vec<Vec<String>> = project
            .expenses
            .iter()
            .map(|e| {
                vec![
                    e.date.clone(),
                    e.vendor.clone(),
                    e.description.clone(),
                    format_currency(e.amount),
                ]
            })
            .collect();
        rows.push(vec![
            String::new(),
            String::new(),
            "Total".into(),
            format_currency(total),
        ]);
        blocks.push(Block::Heading {
            level: 3,
            text: "Expenses".into(),
        });
        blocks.push(Block::DataTable(TableSpec {
            columns: vec![
                Column::left("Date"),
                Column::left("Vendor").with_width(1.5),
                Column::left("Description").with_width(2.0),
                Column::right("Amount"),
            ],
            rows,
        }));
    }
}

/// Build the block sequence for a case blotter report.
pub fn case_blocks(report: &CaseReport) -> Result<Vec<Block>, Error> {
    if report.case_number.trim().is_empty() {
        return Err(Error::Validation("case_number is required".into()));
    }
    if report.title.trim().is_empty() {
        return Err(Error::Validation("title is required".into()));
    }

    let mut blocks = Vec::new();
    if let Some(text) = &report.watermark {
        blocks.push(Block::Watermark { text: text.clone() });
    }

    push_cover(
        &mut blocks,
        "Case Blotter Report",
        &format!("{}: {}", report.case_number, report.title),
        report.logo_png.as_deref(),
        &cover_lines(&[
            ("Lead officer", &report.lead_officer),
            ("Court", &report.court),
            ("Generated", &report.generated_on),
        ]),
    );

    if !report.defendants.is_empty() {
        blocks.push(Block::Toc);
    }

    blocks.push(Block::Heading {
        level: 1,
        text: "Case Summary".into(),
    });

    let mut summary = vec![
        ("Case number".to_string(), report.case_number.clone()),
        ("Title".to_string(), report.title.clone()),
    ];
    if !report.status.is_empty() {
        summary.push(("Status".to_string(), report.status.clone()));
    }
    if !report.opened_on.is_empty() {
        summary.push(("Opened".to_string(), report.opened_on.clone()));
    }
    if !report.lead_officer.is_empty() {
        summary.push(("Lead officer".to_string(), report.lead_officer.clone()));
    }
    if !report.court.is_empty() {
        summary.push(("Court".to_string(), report.court.clone()));
    }
    summary.push(("Defendants".to_string(), report.defendants.len().to_string()));
    blocks.push(Block::KeyValueTable { rows: summary });

    if !report.synopsis.is_empty() {
        blocks.push(Block::Heading {
            level: 1,
            text: "Synopsis".into(),
        });
        blocks.push(Block::Paragraph {
            text: report.synopsis.clone(),
            style: ParagraphStyle::Body,
        });
    }

    if report.defendants.is_empty() {
        blocks.push(Block::Paragraph {
            text: EMPTY_DEFENDANTS.into(),
            style: ParagraphStyle::Muted,
        });
        return Ok(blocks);
    }

    for defendant in &report.defendants {
        defendant_section(&mut blocks, defendant);
    }

    Ok(blocks)
}

fn defendant_section(blocks: &mut Vec<Block>, defendant: &Defendant) {
    blocks.push(Block::Heading {
        level: 2,
        text: defendant.name.clone(),
    });

    let mut details = Vec::new();
    if !defendant.role.is_empty() {
        details.push(("Role".to_string(), defendant.role.clone()));
    }
    if !defendant.status.is_empty() {
        details.push(("Status".to_string(), defendant.status.clone()));
    }
    if !defendant.counsel.is_empty() {
        details.push(("Counsel".to_string(), defendant.counsel.clone()));
    }
    if !details.is_empty() {
        blocks.push(Block::KeyValueTable { rows: details });
    }

    if !defendant.hearings.is_empty() {
        blocks.push(Block::Heading {
            level: 3,
            text: "Hearings".into(),
        });
        blocks.push(Block::DataTable(TableSpec {
            columns: vec![
                Column::left("Date"),
                Column::left("Time"),
                Column::left("Type").with_width(1.5),
                Column::left("Location").with_width(1.5),
                Column::left("Outcome").with_width(1.5),
            ],
            rows: defendant
                .hearings
                .iter()
                .map(|h| {
                    vec![
                        h.date.clone(),
                        h.time.clone(),
                        h.kind.clone(),
                        h.location.clone(),
                        h.outcome.clone(),
                    ]
                })
                .collect(),
        }));
    }

    if !defendant.history.is_empty() {
        blocks.push(Block::Heading {
            level: 3,
            text: "Case History".into(),
        });
        blocks.push(Block::DataTable(TableSpec {
            columns: vec![
                Column::left("Date"),
                Column::left("Entry").with_width(3.0),
                Column::left("Recorded by"),
            ],
            rows: defendant
                .history
                .iter()
                .map(|e| vec![e.date.clone(), e.entry.clone(), e.recorded_by.clone()])
                .collect(),
        }));
    }
}

fn cover_lines(pairs: &[(&str, &String)]) -> Vec<String> {
    pairs
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect()
}

fn push_cover(
    blocks: &mut Vec<Block>,
    title: &str,
    subtitle: &str,
    logo_png: Option<&[u8]>,
    lines: &[String],
) {
    blocks.push(Block::Spacer { height: 150.0 });
    blocks.push(Block::Paragraph {
        text: title.into(),
        style: ParagraphStyle::Title,
    });
    blocks.push(Block::Spacer { height: 6.0 });
    blocks.push(Block::Paragraph {
        text: subtitle.into(),
        style: ParagraphStyle::Subtitle,
    });
    if let Some(bytes) = logo_png {
        blocks.push(Block::Spacer { height: 24.0 });
        blocks.push(Block::Image {
            bytes: bytes.to_vec(),
            width: 120.0,
            height: 120.0,
        });
    }
    blocks.push(Block::Spacer { height: 36.0 });
    for line in lines {
        blocks.push(Block::Paragraph {
            text: line.clone(),
            style: ParagraphStyle::Small,
        });
    }
    blocks.push(Block::PageBreak);
}

/// Deterministic attachment filename for a report request.
pub fn report_filename(request: &ReportRequest) -> String {
    match request {
        ReportRequest::Financial(r) => format!(
            "aip-report-{}-{}.pdf",
            slug(&r.fiscal_year),
            slug(&r.program_name)
        ),
        ReportRequest::Case(r) => format!("case-blotter-{}.pdf", slug(&r.case_number)),
    }
}

fn slug(s: &str) -> String {
    let mut out = String::new();
    let mut prev_dash = true;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() { "report".into() } else { out }
}

/// Format a dollar amount with thousands separators, e.g. `-$12,034.50`.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < -0.004;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (dollars, rem) = (cents / 100, cents % 100);
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();
    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{rem:02}")
}
