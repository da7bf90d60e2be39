//! Domain input types.
//!
//! These are fully-resolved snapshots of what the data layer fetched; the
//! generators never load anything lazily. All date fields are preformatted
//! display strings so a report rendered twice from the same snapshot is
//! byte-for-byte identical.

use serde::{Deserialize, Serialize};

/// Annual Improvement Program financial report input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinancialReport {
    pub program_name: String,
    pub fiscal_year: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub prepared_by: String,
    /// Display date the snapshot was taken, e.g. "March 4, 2026".
    #[serde(default)]
    pub generated_on: String,
    #[serde(default)]
    pub watermark: Option<String>,
    /// PNG bytes for the cover logo.
    #[serde(default)]
    pub logo_png: Option<Vec<u8>>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub committed: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Project {
    pub fn balance(&self) -> f64 {
        self.budget - self.spent
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub date: String,
    pub vendor: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// Case blotter report input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseReport {
    pub case_number: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub opened_on: String,
    #[serde(default)]
    pub lead_officer: String,
    #[serde(default)]
    pub court: String,
    #[serde(default)]
    pub generated_on: String,
    #[serde(default)]
    pub watermark: Option<String>,
    #[serde(default)]
    pub logo_png: Option<Vec<u8>>,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default)]
    pub defendants: Vec<Defendant>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Defendant {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub counsel: String,
    #[serde(default)]
    pub hearings: Vec<Hearing>,
    #[serde(default)]
    pub history: Vec<CaseEvent>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hearing {
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub outcome: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseEvent {
    pub date: String,
    pub entry: String,
    #[serde(default)]
    pub recorded_by: String,
}

/// A report request as received at the service or CLI boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportRequest {
    Financial(FinancialReport),
    Case(CaseReport),
}
