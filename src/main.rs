use std::path::PathBuf;

use clap::Parser;

use caseledger_pdf::builder::report_filename;
use caseledger_pdf::model::ReportRequest;

/// Generate a paginated PDF report from a domain-report JSON file.
#[derive(Parser)]
#[command(name = "caseledger-pdf", version, about)]
struct Args {
    /// Report request JSON (`{"type": "financial", ...}` or `{"type": "case", ...}`)
    input: PathBuf,

    /// Output path. Defaults to the deterministic report filename in the
    /// current directory.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.input)?;
    let request: ReportRequest = serde_json::from_str(&raw)
        .map_err(|e| format!("{} is not a valid report request: {e}", args.input.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(report_filename(&request)));

    let bytes = caseledger_pdf::render_report(&request)?;
    std::fs::write(&output, &bytes)?;

    log::info!("wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}
